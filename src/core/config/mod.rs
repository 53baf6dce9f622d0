//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::{load_config_file, DEFAULT_CONFIG_FILE};

use std::time::Duration;
use url::Url;

/// Base URL used when neither the environment nor a config file names one.
pub const DEFAULT_API_BASE: &str = "https://xeams.yourcompanycom/api";

/// Runtime configuration, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub api_base: Url,
    /// Sent as the `se` query parameter on every upstream call; may be empty.
    pub sender_email: String,

    pub request_timeout: Option<Duration>,
    pub user_agent: String,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let api_base = Url::parse(DEFAULT_API_BASE)
            .expect("Default API base URL failed to parse. This is a bug.");

        Config {
            api_key: String::new(),
            api_secret: String::new(),
            api_base,
            sender_email: String::new(),
            request_timeout: None,
            user_agent: format!("xeams-mcp-server/{}", env!("CARGO_PKG_VERSION")),
            loaded_config_path: None,
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("api_secret_set", &!self.api_secret.is_empty())
            .field("api_base", &self.api_base.as_str())
            .field("sender_email", &self.sender_email)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert!(config.sender_email.is_empty());
        assert!(config.request_timeout.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config {
            api_key: "top-key".into(),
            api_secret: "top-secret".into(),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-key"));
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("api_secret_set: true"));
    }
}
