mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use xeams_mcp_core::core::config::{load_config_file, ConfigBuilder};
use xeams_mcp_core::diagnostic::{self, DEFAULT_TEST_EMAIL};
use xeams_mcp_core::utils::logging::init_tracing;
use xeams_mcp_core::{McpServer, ToolAdapter, XeamsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Populate the environment before clap reads its `env` fallbacks.
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut builder = ConfigBuilder::new();
    if let Some((file, path)) = load_config_file(cli.config.as_deref())? {
        tracing::info!("Using config file {}", path.display());
        builder = builder.with_file(file, &path);
    }
    let config = builder
        .api_key(cli.api_key)
        .api_secret(cli.api_secret)
        .api_base(cli.api_base)
        .sender_email(cli.sender_email)
        .request_timeout_secs(cli.request_timeout)
        .build()
        .context("Invalid configuration")?;

    let client = XeamsClient::new(Arc::new(config)).context("Failed to create API client")?;

    if cli.test {
        let default_email = cli.test_email.as_deref().unwrap_or(DEFAULT_TEST_EMAIL);
        diagnostic::run(&client, default_email).await?;
        return Ok(());
    }

    McpServer::new(ToolAdapter::new(client))
        .serve_stdio()
        .await
        .context("MCP server stopped with an error")?;
    Ok(())
}
