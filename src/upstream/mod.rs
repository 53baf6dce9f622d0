//! Access to the Xeams email API and normalization of its responses.

pub mod client;
pub mod normalize;

pub use client::XeamsClient;
pub use normalize::{normalize_record, normalize_timestamp};
