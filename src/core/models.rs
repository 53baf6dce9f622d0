//! Data types shared between the upstream client and the tool adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of an address validation call, before it is flattened to the wire
/// integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The upstream API answered with a verdict code (1..=5 when well-behaved).
    Code(i64),
    /// The upstream API answered with a non-success HTTP status.
    HttpFailure(u16),
    /// The upstream body parsed but carried no usable `code` field.
    MissingCode,
    /// The request could not be sent or the body could not be read/parsed.
    RequestFailed(String),
}

impl ValidationOutcome {
    pub const HTTP_FAILURE: i64 = -1;
    pub const MISSING_CODE: i64 = -2;
    pub const REQUEST_FAILED: i64 = -3;

    /// Flattens the outcome to the integer carried in `structuredContent.result`.
    pub fn code(&self) -> i64 {
        match self {
            ValidationOutcome::Code(code) => *code,
            ValidationOutcome::HttpFailure(_) => Self::HTTP_FAILURE,
            ValidationOutcome::MissingCode => Self::MISSING_CODE,
            ValidationOutcome::RequestFailed(_) => Self::REQUEST_FAILED,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code() == 1
    }

    /// Human-readable meaning of the flattened code.
    pub fn describe(&self) -> &'static str {
        match self.code() {
            1 => "valid",
            2 => "syntax error",
            3 => "invalid domain",
            4 => "user does not exist",
            5 => "inconclusive",
            Self::HTTP_FAILURE => "upstream HTTP failure",
            Self::MISSING_CODE => "upstream response missing code",
            Self::REQUEST_FAILED => "request failed",
            _ => "unknown code",
        }
    }
}

/// Named view of the integer `status` field of a delivery record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Processing,
    Delivered,
    Failed,
    NotFound,
    Quarantined,
    Queued,
    Received,
}

impl DeliveryStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DeliveryStatus::Processing),
            1 => Some(DeliveryStatus::Delivered),
            2 => Some(DeliveryStatus::Failed),
            3 => Some(DeliveryStatus::NotFound),
            4 => Some(DeliveryStatus::Quarantined),
            5 => Some(DeliveryStatus::Queued),
            6 => Some(DeliveryStatus::Received),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeliveryStatus::Processing => "processing",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::NotFound => "not found",
            DeliveryStatus::Quarantined => "quarantined",
            DeliveryStatus::Queued => "queued",
            DeliveryStatus::Received => "received",
        };
        f.write_str(label)
    }
}

/// One delivery event for a recipient address, in the shape declared by the
/// `CheckEmailStatus` output schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailStatusRecord {
    pub status: i64,
    pub status_str: String,
    pub received_on: String,
    pub sent_on: String,
    pub subject: String,
    #[serde(rename = "senderIP")]
    pub sender_ip: String,
    #[serde(rename = "recipientIP")]
    pub recipient_ip: String,
    pub inbound_encryption: bool,
    pub outbound_encryption: bool,
}

impl EmailStatusRecord {
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        DeliveryStatus::from_code(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_flatten() {
        assert_eq!(ValidationOutcome::Code(4).code(), 4);
        assert_eq!(ValidationOutcome::HttpFailure(500).code(), -1);
        assert_eq!(ValidationOutcome::MissingCode.code(), -2);
        assert_eq!(ValidationOutcome::RequestFailed("boom".into()).code(), -3);
        assert!(ValidationOutcome::Code(1).is_valid());
        assert!(!ValidationOutcome::HttpFailure(200).is_valid());
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = EmailStatusRecord {
            status: 1,
            sender_ip: "10.0.0.1".into(),
            recipient_ip: "10.0.0.2".into(),
            inbound_encryption: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["senderIP"], "10.0.0.1");
        assert_eq!(value["recipientIP"], "10.0.0.2");
        assert_eq!(value["statusStr"], "");
        assert_eq!(value["inboundEncryption"], true);
        assert_eq!(value["outboundEncryption"], false);
        assert!(value.get("receivedOn").is_some());
    }

    #[test]
    fn delivery_status_labels() {
        assert_eq!(DeliveryStatus::from_code(4), Some(DeliveryStatus::Quarantined));
        assert_eq!(DeliveryStatus::from_code(9), None);
        assert_eq!(DeliveryStatus::Received.to_string(), "received");
    }
}
