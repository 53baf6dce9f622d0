//! Layers defaults, the config file, and environment/CLI overrides into a `Config`.

use super::file::ConfigFile;
use super::validation::validate_config;
use super::Config;
use crate::core::error::{AppError, Result};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builder applying configuration layers in increasing precedence:
/// defaults, then the TOML file, then explicit overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: ConfigFile,
    file_path: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
    api_base: Option<String>,
    sender_email: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: ConfigFile, path: &Path) -> Self {
        self.file = file;
        self.file_path = Some(path.display().to_string());
        self
    }

    pub fn api_key(mut self, value: Option<String>) -> Self {
        if let Some(value) = non_blank(value) {
            self.api_key = Some(value);
        }
        self
    }

    pub fn api_secret(mut self, value: Option<String>) -> Self {
        if let Some(value) = non_blank(value) {
            self.api_secret = Some(value);
        }
        self
    }

    pub fn api_base(mut self, value: Option<String>) -> Self {
        if let Some(value) = non_blank(value) {
            self.api_base = Some(value);
        }
        self
    }

    pub fn sender_email(mut self, value: Option<String>) -> Self {
        if let Some(value) = non_blank(value) {
            self.sender_email = Some(value);
        }
        self
    }

    pub fn request_timeout_secs(mut self, value: Option<u64>) -> Self {
        if value.is_some() {
            self.request_timeout_secs = value;
        }
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();
        let ConfigFile { api, network } = self.file;

        if let Some(key) = self.api_key.or(non_blank(api.api_key)) {
            config.api_key = key;
        }
        if let Some(secret) = self.api_secret.or(non_blank(api.api_secret)) {
            config.api_secret = secret;
        }
        if let Some(base) = self.api_base.or(non_blank(api.api_base)) {
            config.api_base = Url::parse(base.trim()).map_err(|e| {
                AppError::Config(format!("Invalid API base URL '{}': {}", base, e))
            })?;
        }
        if let Some(sender) = self.sender_email.or(non_blank(api.sender_email)) {
            config.sender_email = sender.trim().to_string();
        }
        if let Some(secs) = self.request_timeout_secs.or(network.request_timeout) {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(agent) = network.user_agent {
            config.user_agent = agent;
        }
        config.loaded_config_path = self.file_path;

        validate_config(&config)?;
        tracing::debug!(target: "config", "Effective configuration: {:?}", config);
        Ok(config)
    }
}

/// Empty or whitespace-only values (e.g. `KEY=` in a `.env` file) count as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
