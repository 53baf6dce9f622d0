#![allow(dead_code)]

use std::sync::Arc;
use url::Url;
use wiremock::MockServer;
use xeams_mcp_core::{Config, McpServer, ToolAdapter, XeamsClient};

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";
pub const SENDER: &str = "noreply@sender.example";

/// `Basic base64("test-key:test-secret")`
pub const AUTH_HEADER: &str = "Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ=";

pub fn client_for(server: &MockServer) -> XeamsClient {
    let config = Config {
        api_key: API_KEY.to_string(),
        api_secret: API_SECRET.to_string(),
        api_base: Url::parse(&server.uri()).unwrap(),
        sender_email: SENDER.to_string(),
        ..Config::default()
    };
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client");
    XeamsClient::with_http_client(Arc::new(config), http)
}

pub fn adapter_for(server: &MockServer) -> ToolAdapter {
    ToolAdapter::new(client_for(server))
}

pub fn mcp_server_for(server: &MockServer) -> McpServer {
    McpServer::new(adapter_for(server))
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> XeamsClient {
    let config = Config {
        api_base: Url::parse("http://127.0.0.1:9").unwrap(),
        ..Config::default()
    };
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    XeamsClient::with_http_client(Arc::new(config), http)
}
