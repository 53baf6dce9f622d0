//! Field normalization for delivery-status records returned by the Xeams API.
//!
//! The upstream payload is loosely typed: fields go missing, timestamps come in
//! several shapes, and one field name is misspelled on some server versions.
//! Each output field has exactly one rule, listed on [`normalize_record`].

use crate::core::models::EmailStatusRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Correct spelling of the inbound encryption flag.
pub const INBOUND_ENCRYPTION_FIELD: &str = "inboundEncryption";
/// Misspelling emitted by some Xeams releases.
pub const INBOUND_ENCRYPTION_FIELD_MISSPELLED: &str = "inhoundEncryption";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    // Java `DateFormat` / Gson default renderings.
    "%b %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M:%S %p",
    "%b %d, %Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

/// Maps one upstream status object onto an [`EmailStatusRecord`].
///
/// | field | rule |
/// |---|---|
/// | `status` | integer value, otherwise `0` |
/// | `statusStr`, `subject`, `senderIP`, `recipientIP` | string value, otherwise `""` |
/// | `receivedOn`, `sentOn` | [`normalize_timestamp`] |
/// | `inboundEncryption` | `inboundEncryption` if boolean, else `inhoundEncryption` if boolean, else `false` |
/// | `outboundEncryption` | boolean value, otherwise `false` |
///
/// A non-object element yields a record of defaults.
pub fn normalize_record(item: &Value) -> EmailStatusRecord {
    EmailStatusRecord {
        status: integer_field(item, "status"),
        status_str: string_field(item, "statusStr"),
        received_on: normalize_timestamp(item.get("receivedOn")),
        sent_on: normalize_timestamp(item.get("sentOn")),
        subject: string_field(item, "subject"),
        sender_ip: string_field(item, "senderIP"),
        recipient_ip: string_field(item, "recipientIP"),
        inbound_encryption: bool_field(item, INBOUND_ENCRYPTION_FIELD)
            .or_else(|| bool_field(item, INBOUND_ENCRYPTION_FIELD_MISSPELLED))
            .unwrap_or(false),
        outbound_encryption: bool_field(item, "outboundEncryption").unwrap_or(false),
    }
}

/// Maps a whole status response body. Anything but a JSON array yields no records.
pub fn normalize_records(body: &Value) -> Option<Vec<EmailStatusRecord>> {
    body.as_array()
        .map(|items| items.iter().map(normalize_record).collect())
}

/// Renders an upstream timestamp as ISO-8601 UTC with millisecond precision.
///
/// Accepts RFC 3339 / RFC 2822 strings, offset-less date-times (ISO-style or
/// Java `DateFormat` style such as `Mar 5, 2024 10:15:30 AM`) and plain dates,
/// both read as UTC, and numbers as milliseconds since the Unix epoch.
/// Missing, `null`, empty, zero or unparsable values become `""`.
pub fn normalize_timestamp(value: Option<&Value>) -> String {
    let parsed = match value {
        Some(Value::String(raw)) => parse_timestamp_str(raw.trim()),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .filter(|millis| *millis != 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn integer_field(item: &Value, key: &str) -> i64 {
    match item.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_field(item: &Value, key: &str) -> Option<bool> {
    item.get(key).and_then(Value::as_bool)
}
