//! HTTP client for the Xeams email API.
//!
//! Both public calls are fail-soft: every failure is logged and turned into a
//! sentinel value so the tool layer can always build a response.

use super::normalize::normalize_records;
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{EmailStatusRecord, ValidationOutcome};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

pub const VALIDATE_PATH: &str = "/api/email/validate";
pub const STATUS_PATH: &str = "/api/email/status";

/// Authenticated client for the `validate` and `status` endpoints.
#[derive(Debug, Clone)]
pub struct XeamsClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl XeamsClient {
    /// Builds the underlying HTTP client from the configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    /// Uses a caller-supplied HTTP client.
    pub fn with_http_client(config: Arc<Config>, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// The configured sender address passed as `se`.
    pub fn sender_email(&self) -> &str {
        &self.config.sender_email
    }

    /// Asks the API for a deep validation verdict on `email`.
    ///
    /// Non-success status maps to [`ValidationOutcome::HttpFailure`], a body
    /// without a usable `code` to [`ValidationOutcome::MissingCode`], and any
    /// transport or decoding error to [`ValidationOutcome::RequestFailed`].
    pub async fn validate(&self, email: &str, sender_email: &str) -> ValidationOutcome {
        let started = Instant::now();
        let outcome = match self.try_validate(email, sender_email).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(target: "upstream", "Error validating email {}: {}", email, e);
                ValidationOutcome::RequestFailed(e.to_string())
            }
        };
        tracing::info!(
            target: "upstream",
            "validate {} -> {} ({}) in {:.2?}",
            email,
            outcome.code(),
            outcome.describe(),
            started.elapsed()
        );
        outcome
    }

    /// Fetches delivery-status records for `email`.
    ///
    /// Returns an empty list on a non-success status, a non-array body, or any
    /// transport or decoding error.
    pub async fn check_status(&self, email: &str, sender_email: &str) -> Vec<EmailStatusRecord> {
        let started = Instant::now();
        let records = match self.try_check_status(email, sender_email).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(target: "upstream", "Error checking status for {}: {}", email, e);
                Vec::new()
            }
        };
        tracing::info!(
            target: "upstream",
            "status {} -> {} record(s) in {:.2?}",
            email,
            records.len(),
            started.elapsed()
        );
        records
    }

    async fn try_validate(&self, email: &str, sender_email: &str) -> Result<ValidationOutcome> {
        let url = self.endpoint(
            VALIDATE_PATH,
            &[("re", email), ("se", sender_email), ("deep", "true")],
        )?;
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "upstream", "API request failed with status: {}", status);
            return Ok(ValidationOutcome::HttpFailure(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(extract_code(&body))
    }

    async fn try_check_status(
        &self,
        email: &str,
        sender_email: &str,
    ) -> Result<Vec<EmailStatusRecord>> {
        let url = self.endpoint(STATUS_PATH, &[("re", email), ("se", sender_email)])?;
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "upstream", "API request failed with status: {}", status);
            return Ok(Vec::new());
        }

        let body: Value = response.json().await?;
        normalize_records(&body).ok_or_else(|| {
            AppError::UpstreamPayload("status response is not a JSON array".to_string())
        })
    }

    /// Resolves `path` against the base URL and appends the query pairs.
    ///
    /// `path` is absolute, so it replaces whatever path the base URL carries.
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.config.api_base.join(path)?;
        url.query_pairs_mut().extend_pairs(params.iter().copied());
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tracing::debug!(target: "upstream", "GET {}", url);
        let response = self
            .http
            .get(url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        Ok(response)
    }
}

/// Reads the verdict from a validate response body.
///
/// A missing, non-numeric or zero `code` is treated as absent.
pub fn extract_code(body: &Value) -> ValidationOutcome {
    let code = body.get("code").and_then(|code| {
        code.as_i64()
            .or_else(|| code.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
    });
    match code {
        Some(code) if code != 0 => ValidationOutcome::Code(code),
        _ => ValidationOutcome::MissingCode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with_base(base: &str) -> XeamsClient {
        let config = Config {
            api_base: Url::parse(base).unwrap(),
            ..Config::default()
        };
        XeamsClient::new(Arc::new(config)).unwrap()
    }

    #[test]
    fn endpoint_replaces_base_path() {
        let client = client_with_base("https://xeams.example.com/api");
        let url = client
            .endpoint(VALIDATE_PATH, &[("re", "a+b@example.com"), ("se", ""), ("deep", "true")])
            .unwrap();
        assert_eq!(url.path(), "/api/email/validate");
        assert_eq!(url.host_str(), Some("xeams.example.com"));
        assert_eq!(url.query(), Some("re=a%2Bb%40example.com&se=&deep=true"));
    }

    #[test]
    fn endpoint_keeps_port() {
        let client = client_with_base("http://127.0.0.1:8443");
        let url = client.endpoint(STATUS_PATH, &[("re", "x@y.com")]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8443/api/email/status?re=x%40y.com");
    }

    #[test]
    fn extract_code_variants() {
        assert_eq!(extract_code(&json!({ "code": 1 })), ValidationOutcome::Code(1));
        assert_eq!(extract_code(&json!({ "code": 4.0 })), ValidationOutcome::Code(4));
        assert_eq!(extract_code(&json!({})), ValidationOutcome::MissingCode);
        assert_eq!(extract_code(&json!({ "code": null })), ValidationOutcome::MissingCode);
        assert_eq!(extract_code(&json!({ "code": "1" })), ValidationOutcome::MissingCode);
        assert_eq!(extract_code(&json!({ "code": 0 })), ValidationOutcome::MissingCode);
        assert_eq!(extract_code(&json!([1, 2])), ValidationOutcome::MissingCode);
    }

    #[tokio::test]
    async fn non_array_status_body_is_a_payload_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(STATUS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1 })))
            .mount(&server)
            .await;
        let config = Config {
            api_base: Url::parse(&server.uri()).unwrap(),
            ..Config::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = XeamsClient::with_http_client(Arc::new(config), http);

        let err = client.try_check_status("x@y.com", "").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamPayload(_)));
        assert!(client.check_status("x@y.com", "").await.is_empty());
    }
}
