//! Model Context Protocol surface: wire types, tool declarations, stdio server.

pub mod protocol;
pub mod server;
pub mod tools;
pub mod types;

pub use server::McpServer;
pub use tools::ToolAdapter;
