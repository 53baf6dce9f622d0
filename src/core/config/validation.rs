//! Sanity checks applied to a fully built `Config`.

use super::Config;
use crate::core::error::{AppError, Result};
use crate::utils::email::is_valid_email;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    match config.api_base.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::Config(format!(
                "API base URL must use http or https, got '{}'",
                other
            )));
        }
    }
    if config.api_base.cannot_be_a_base() || config.api_base.host_str().is_none() {
        return Err(AppError::Config(format!(
            "API base URL '{}' has no host",
            config.api_base
        )));
    }

    if !config.sender_email.is_empty() && !is_valid_email(&config.sender_email) {
        tracing::warn!(
            target: "config",
            "SENDER_EMAIL '{}' does not look like an email address; sending it as 'se' anyway",
            config.sender_email
        );
    }

    if config.request_timeout.is_some_and(|t| t.is_zero()) {
        return Err(AppError::Config(
            "request_timeout must be greater than zero".to_string(),
        ));
    }

    if !config.has_credentials() {
        tracing::warn!(
            target: "config",
            "XEAMS_API_KEY or XEAMS_SECRET is not set; upstream calls will use empty credentials"
        );
    }
    if config.sender_email.is_empty() {
        tracing::warn!(target: "config", "SENDER_EMAIL is not set; 'se' will be sent empty");
    }

    Ok(())
}
