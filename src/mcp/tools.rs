//! The two agent-facing tools and their input/output schemas.

use super::types::{CallToolResult, Tool};
use crate::core::error::{AppError, Result};
use crate::core::models::EmailStatusRecord;
use crate::upstream::XeamsClient;
use crate::utils::email::is_valid_email;
use serde::Deserialize;
use serde_json::{json, Value};

pub const VALIDATE_ADDRESS: &str = "ValidateAddress";
pub const CHECK_EMAIL_STATUS: &str = "CheckEmailStatus";

const STATUS_CODES_DOC: &str = "Status code (1 for delivered, 2 for failed, 3 for not found, 4 for quarantined, 5 for queued, 6 for received, 0 for processing)";

#[derive(Debug, Deserialize)]
struct EmailArgs {
    email: String,
}

/// Maps tool calls onto [`XeamsClient`] and wraps the results for the host.
#[derive(Debug, Clone)]
pub struct ToolAdapter {
    client: XeamsClient,
}

impl ToolAdapter {
    pub fn new(client: XeamsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &XeamsClient {
        &self.client
    }

    /// Tool declarations in `tools/list` order.
    pub fn definitions() -> Vec<Tool> {
        vec![validate_address_tool(), check_email_status_tool()]
    }

    /// Validates `arguments` against the tool's input schema, then runs it.
    ///
    /// Errors are limited to unknown tool names and schema violations; upstream
    /// problems come back as sentinel values inside a normal result.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Result<CallToolResult> {
        match name {
            VALIDATE_ADDRESS => {
                let email = parse_email_argument(name, arguments)?;
                Ok(self.validate_address(&email).await)
            }
            CHECK_EMAIL_STATUS => {
                let email = parse_email_argument(name, arguments)?;
                Ok(self.check_email_status(&email).await)
            }
            other => Err(AppError::UnknownTool(other.to_string())),
        }
    }

    pub async fn validate_address(&self, email: &str) -> CallToolResult {
        let outcome = self
            .client
            .validate(email, self.client.sender_email())
            .await;
        let code = outcome.code();
        let verdict = if outcome.is_valid() { "valid" } else { "invalid" };
        CallToolResult::structured(
            format!("Email {} is {} (result: {})", email, verdict, code),
            json!({ "result": code }),
        )
    }

    pub async fn check_email_status(&self, email: &str) -> CallToolResult {
        let results: Vec<EmailStatusRecord> = self
            .client
            .check_status(email, self.client.sender_email())
            .await;
        let summary = format!(
            "Found {} email status record(s) for {}",
            results.len(),
            email
        );
        CallToolResult::structured(summary, json!({ "results": results }))
    }
}

fn parse_email_argument(tool: &str, arguments: Option<Value>) -> Result<String> {
    let args: EmailArgs = serde_json::from_value(arguments.unwrap_or_else(|| json!({})))
        .map_err(|e| {
            AppError::InvalidArguments(format!("Invalid arguments for tool {}: {}", tool, e))
        })?;
    if !is_valid_email(&args.email) {
        return Err(AppError::InvalidArguments(format!(
            "Invalid arguments for tool {}: 'email' must be a valid email address",
            tool
        )));
    }
    Ok(args.email)
}

fn email_input_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "email": {
                "type": "string",
                "format": "email",
                "description": description
            }
        },
        "required": ["email"],
        "additionalProperties": false,
        "$schema": "http://json-schema.org/draft-07/schema#"
    })
}

fn validate_address_tool() -> Tool {
    Tool {
        name: VALIDATE_ADDRESS.to_string(),
        title: Some("Validate Email Address".to_string()),
        description: Some("Validates an email address".to_string()),
        input_schema: email_input_schema("Email address to validate."),
        output_schema: Some(json!({
            "type": "object",
            "properties": {
                "result": {
                    "type": "number",
                    "description": "1 if valid, 2 if email address has a syntax error, 3 if domain is invalid, 4 if the user does not exist, 5 if the test is inconclusive."
                }
            },
            "required": ["result"],
            "additionalProperties": false,
            "$schema": "http://json-schema.org/draft-07/schema#"
        })),
    }
}

fn check_email_status_tool() -> Tool {
    Tool {
        name: CHECK_EMAIL_STATUS.to_string(),
        title: Some("Check Email Status".to_string()),
        description: Some(
            "Checks the status of an email that was sent and returns an array of email status objects."
                .to_string(),
        ),
        input_schema: email_input_schema("Recipient's email address."),
        output_schema: Some(json!({
            "type": "object",
            "properties": {
                "results": {
                    "type": "array",
                    "description": "Array of email status objects",
                    "items": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "number", "description": STATUS_CODES_DOC },
                            "statusStr": { "type": "string", "description": "Human-readable status description" },
                            "receivedOn": { "type": "string", "description": "Date and time when email was received (ISO 8601)" },
                            "sentOn": { "type": "string", "description": "Date and time when email was sent (ISO 8601)" },
                            "subject": { "type": "string", "description": "Email subject" },
                            "senderIP": { "type": "string", "description": "Sender's IP address" },
                            "recipientIP": { "type": "string", "description": "Recipient's SMTP server IP address" },
                            "inboundEncryption": { "type": "boolean", "description": "Whether inbound email was encrypted" },
                            "outboundEncryption": { "type": "boolean", "description": "Whether outbound email was encrypted" }
                        },
                        "required": [
                            "status", "statusStr", "receivedOn", "sentOn", "subject",
                            "senderIP", "recipientIP", "inboundEncryption", "outboundEncryption"
                        ],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["results"],
            "additionalProperties": false,
            "$schema": "http://json-schema.org/draft-07/schema#"
        })),
    }
}
