//! Newline-delimited JSON-RPC server loop for the MCP stdio transport.

use super::protocol::{
    methods, JsonRpcError, JsonRpcRequest, JsonRpcResponse, LATEST_PROTOCOL_VERSION,
    SUPPORTED_PROTOCOL_VERSIONS,
};
use super::tools::ToolAdapter;
use super::types::{
    CallToolParams, Implementation, InitializeParams, InitializeResult, ListToolsResult,
    ServerCapabilities, ToolsCapability,
};
use crate::core::error::{AppError, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

pub const SERVER_NAME: &str = "xeams-mcp-server";

/// Stateless MCP server exposing the [`ToolAdapter`] tools.
#[derive(Debug, Clone)]
pub struct McpServer {
    adapter: Arc<ToolAdapter>,
    info: Implementation,
}

impl McpServer {
    pub fn new(adapter: ToolAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
            info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Serves stdin/stdout until the host closes stdin.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Reads one message per line from `reader` and writes responses to `writer`.
    ///
    /// `tools/call` requests run on their own task so a slow upstream call does
    /// not hold up other requests; everything else is answered inline. A single
    /// writer task owns `writer`, so response lines never interleave.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let mut line = serde_json::to_vec(&response)?;
                line.push(b'\n');
                writer.write_all(&line).await?;
                writer.flush().await?;
            }
            Ok::<(), AppError>(())
        });

        tracing::info!(
            target: "mcp_server",
            "{} {} listening on stdio",
            server.info.name,
            server.info.version
        );

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let request = match parse_line(&line) {
                Ok(request) => request,
                Err(response) => {
                    if tx.send(response).is_err() {
                        break;
                    }
                    continue;
                }
            };

            if request.method == methods::TOOLS_CALL {
                let server = Arc::clone(&server);
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_request(request).await {
                        let _ = tx.send(response);
                    }
                });
            } else if let Some(response) = server.handle_request(request).await {
                if tx.send(response).is_err() {
                    break;
                }
            }
            if tx.is_closed() {
                // Writer task has exited; its error is returned below.
                break;
            }
        }

        tracing::info!(target: "mcp_server", "Input closed, draining in-flight calls");
        // In-flight tool calls hold their own sender; the writer ends once they finish.
        drop(tx);
        writer_task
            .await
            .map_err(|e| AppError::Generic(anyhow::anyhow!("writer task failed: {}", e)))?
    }

    /// Parses and answers a single line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match parse_line(line) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => Some(response),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest { id, method, params, .. } = request;

        let Some(id) = id else {
            match method.as_str() {
                methods::INITIALIZED => {
                    tracing::debug!(target: "mcp_server", "Client finished initialization")
                }
                methods::CANCELLED => {
                    tracing::debug!(target: "mcp_server", "Ignoring cancellation notice")
                }
                other => tracing::debug!(target: "mcp_server", "Ignoring notification {}", other),
            }
            return None;
        };

        tracing::debug!(target: "mcp_server", "Request {} ({})", id, method);
        let outcome = match method.as_str() {
            methods::INITIALIZE => self.initialize(params),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => to_value(ListToolsResult {
                tools: ToolAdapter::definitions(),
            }),
            methods::TOOLS_CALL => self.call_tool(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(Some(id), result),
            Err(error) => {
                tracing::warn!(target: "mcp_server", "Request {} ({}) failed: {}", id, method, error);
                JsonRpcResponse::error(Some(id), error)
            }
        })
    }

    fn initialize(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(raw) => serde_json::from_value(raw).map_err(|e| {
                JsonRpcError::invalid_params(format!("Invalid initialize params: {}", e))
            })?,
            None => InitializeParams::default(),
        };

        let protocol_version = params
            .protocol_version
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(&v.as_str()))
            .unwrap_or_else(|| LATEST_PROTOCOL_VERSION.to_string());

        if let Some(client) = &params.client_info {
            tracing::info!(
                target: "mcp_server",
                "Initialized by {} {} (protocol {})",
                client.name,
                client.version,
                protocol_version
            );
        }

        to_value(InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tools/call params"))
            .and_then(|raw| {
                serde_json::from_value(raw).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e))
                })
            })?;

        match self.adapter.call(&params.name, params.arguments).await {
            Ok(result) => to_value(result),
            Err(AppError::UnknownTool(name)) => Err(JsonRpcError::invalid_params(format!(
                "Tool {} not found",
                name
            ))),
            Err(AppError::InvalidArguments(message)) => Err(JsonRpcError::invalid_params(message)),
            Err(other) => Err(JsonRpcError::internal_error(other.to_string())),
        }
    }
}

fn to_value<T: serde::Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Decodes one line, producing the error response to send when it is not a request.
fn parse_line(line: &str) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line.trim()).map_err(|e| {
        tracing::warn!(target: "mcp_server", "Unparsable message: {}", e);
        JsonRpcResponse::error(None, JsonRpcError::parse_error())
    })?;

    let id = value
        .get("id")
        .cloned()
        .and_then(|id| serde_json::from_value(id).ok());
    serde_json::from_value::<JsonRpcRequest>(value)
        .map_err(|e| JsonRpcResponse::error(id, JsonRpcError::invalid_request(e)))
}
