//! Core library for the Xeams MCP server: configuration, the upstream API
//! client, and the MCP tool surface.

pub mod core;
pub mod diagnostic;
pub mod mcp;
pub mod upstream;
pub mod utils;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{DeliveryStatus, EmailStatusRecord, ValidationOutcome};
pub use crate::mcp::{McpServer, ToolAdapter};
pub use crate::upstream::XeamsClient;
