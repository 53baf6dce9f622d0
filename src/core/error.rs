//! Defines the custom error types for the xeams-mcp-server application.

use std::io;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for configuration, transport and upstream plumbing.
///
/// Upstream failures never surface through this type to a tool caller; the
/// upstream client converts them into sentinel values at its boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., the HTTP client).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to stdio or file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with a body of an unexpected shape.
    #[error("Unexpected Upstream Payload: {0}")]
    UpstreamPayload(String),

    /// A tool was invoked with arguments that do not satisfy its input schema.
    #[error("Invalid Tool Arguments: {0}")]
    InvalidArguments(String),

    /// A tool name that this server does not declare.
    #[error("Unknown Tool: {0}")]
    UnknownTool(String),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
