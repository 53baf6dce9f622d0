//! Command-line arguments for the `xeams-mcp-server` binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "xeams-mcp-server",
    version,
    about = "MCP server exposing Xeams email validation and delivery-status tools over stdio."
)]
pub struct Cli {
    /// Prompt on the console for addresses to validate and check, then exit.
    #[arg(long = "test")]
    pub test: bool,

    /// Address used by --test when the first prompt is left empty.
    #[arg(long = "test-email", alias = "testEmail", value_name = "EMAIL")]
    pub test_email: Option<String>,

    /// TOML configuration file (defaults to ./xeams-mcp.toml when present).
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Xeams API key.
    #[arg(long, env = "XEAMS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Xeams API secret.
    #[arg(long, env = "XEAMS_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Base URL of the Xeams server.
    #[arg(long, env = "XEAMS_API_BASE")]
    pub api_base: Option<String>,

    /// Sender address passed to the API on every call.
    #[arg(long, env = "SENDER_EMAIL")]
    pub sender_email: Option<String>,

    /// Upstream request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_test_mode_flags() {
        let cli = Cli::try_parse_from([
            "xeams-mcp-server",
            "--test",
            "--testEmail=someone@example.com",
            "--api-base",
            "https://mail.example.com/api",
        ])
        .unwrap();
        assert!(cli.test);
        assert_eq!(cli.test_email.as_deref(), Some("someone@example.com"));
        assert_eq!(cli.api_base.as_deref(), Some("https://mail.example.com/api"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
