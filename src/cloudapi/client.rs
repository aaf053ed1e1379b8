//! CloudAPI HTTP client implementation.
//!
//! This module provides the HTTP client for the Stratovia CloudAPI REST
//! endpoints, including authentication, retry of idempotent calls, and
//! decoding of the provider's error payloads.

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{CloudApiError, Result, StratoviaError};

use super::requests::RequestRef;

/// Default CloudAPI base URL.
pub const DEFAULT_API_URL: &str = "https://api.stratovia.cloud/cloudapi/v5";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default nesting depth requested for GET responses.
const DEFAULT_DEPTH: u8 = 1;

/// Maximum number of attempts for transient failures on idempotent calls.
const MAX_RETRIES: u32 = 3;

/// Delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Stratovia CloudAPI client.
#[derive(Debug, Clone)]
pub struct CloudApiClient {
    /// HTTP client.
    client: Client,
    /// Base URL of the API, without a trailing slash.
    endpoint: String,
    /// Basic-auth username.
    username: String,
    /// Basic-auth password.
    password: String,
    /// Entity nesting depth sent with GET requests.
    depth: u8,
}

/// Provider error payload.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    messages: Vec<ErrorMessage>,
}

/// A single message inside a provider error payload.
#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Decoded HTTP response before JSON parsing.
#[derive(Debug)]
struct ApiResponse {
    /// `Location` header, present on accepted mutations.
    location: Option<String>,
    /// Raw response body.
    body: String,
}

impl CloudApiClient {
    /// Creates a new CloudAPI client against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        Self::build(username, password, DEFAULT_API_URL, DEFAULT_DEPTH, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client against a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_endpoint(username: &str, password: &str, endpoint: &str) -> Result<Self> {
        Self::build(username, password, endpoint, DEFAULT_DEPTH, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing from both the
    /// configuration and the environment, or if the HTTP client cannot
    /// be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let (username, password) = config.credentials()?;
        Self::build(
            &username,
            &password,
            &config.api.endpoint,
            config.api.depth,
            config.api.timeout_secs,
        )
    }

    /// Shared constructor.
    fn build(
        username: &str,
        password: &str,
        endpoint: &str,
        depth: u8,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CloudApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            depth,
        })
    }

    /// Returns the API base URL this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the entity nesting depth sent with GET requests.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Sets the entity nesting depth sent with GET requests.
    #[must_use]
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Checks whether the configured credentials are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than rejected credentials.
    pub async fn validate_credentials(&self) -> Result<bool> {
        match self.execute(Method::GET, "/datacenters", None).await {
            Ok(_) => Ok(true),
            Err(StratoviaError::CloudApi(CloudApiError::AuthenticationFailed { .. })) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Executes a GET and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, None).await?;
        parse_json(&response.body)
    }

    /// Executes a POST and decodes the body plus the request reference
    /// from the `Location` header.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(T, Option<RequestRef>)> {
        let body = serde_json::to_value(body)
            .map_err(|e| StratoviaError::internal(format!("Failed to serialize request body: {e}")))?;
        let response = self.execute(Method::POST, path, Some(&body)).await?;
        let parsed = parse_json(&response.body)?;
        let request = response.location.as_deref().and_then(RequestRef::from_location);

        Ok((parsed, request))
    }

    /// Executes a PATCH and decodes the body plus the request reference
    /// from the `Location` header.
    pub(crate) async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(T, Option<RequestRef>)> {
        let body = serde_json::to_value(body)
            .map_err(|e| StratoviaError::internal(format!("Failed to serialize request body: {e}")))?;
        let response = self.execute(Method::PATCH, path, Some(&body)).await?;
        let parsed = parse_json(&response.body)?;
        let request = response.location.as_deref().and_then(RequestRef::from_location);

        Ok((parsed, request))
    }

    /// Executes a DELETE and returns the deletion request reference.
    pub(crate) async fn delete_path(&self, path: &str) -> Result<RequestRef> {
        let response = self.execute(Method::DELETE, path, None).await?;

        response
            .location
            .as_deref()
            .and_then(RequestRef::from_location)
            .ok_or_else(|| {
                StratoviaError::CloudApi(CloudApiError::invalid_response(
                    "Delete response carried no request location",
                ))
            })
    }

    /// Executes a request with bounded retry of transient failures.
    ///
    /// Only idempotent methods (GET, DELETE) are retried; others fail on
    /// the first transient error to avoid duplicating mutations.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let idempotent = matches!(method, Method::GET | Method::DELETE);
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                debug!("Retry attempt {attempt} of {MAX_RETRIES}");
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt)))
                    .await;
            }

            match self.execute_once(method.clone(), path, body).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if idempotent && e.is_retryable() {
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            StratoviaError::CloudApi(CloudApiError::NetworkError {
                message: String::from("Max retries exceeded"),
            })
        }))
    }

    /// Executes a single HTTP request.
    async fn execute_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{path}", self.endpoint);
        trace!("{method} {url}");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, "application/json");

        if method == Method::GET {
            request = request.query(&[("depth", u32::from(self.depth))]);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            StratoviaError::CloudApi(CloudApiError::NetworkError {
                message: format!("Request failed: {e}"),
            })
        })?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or_default();
            let retry_after = if retry_after == 0 { 60 } else { retry_after };

            return Err(StratoviaError::CloudApi(CloudApiError::RateLimited {
                retry_after_secs: retry_after,
            }));
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StratoviaError::CloudApi(CloudApiError::AuthenticationFailed {
                message: String::from("Invalid credentials"),
            }));
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StratoviaError::CloudApi(decode_error_body(
                status.as_u16(),
                &body,
            )));
        }

        debug!("CloudAPI response: {status} for {path}");

        let body = response.text().await.map_err(|e| {
            StratoviaError::CloudApi(CloudApiError::invalid_response(format!(
                "Failed to read response body: {e}"
            )))
        })?;

        Ok(ApiResponse { location, body })
    }
}

/// Maps a non-success status code and provider error payload to a typed
/// error, preserving the provider's message text.
fn decode_error_body(status: u16, body: &str) -> CloudApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| {
            parsed
                .messages
                .iter()
                .map(|m| m.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        404 => CloudApiError::NotFound { message },
        400 | 422 => CloudApiError::ValidationFailed { message },
        _ => CloudApiError::api_error(status, message),
    }
}

/// Decodes a JSON body into the expected type.
fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        StratoviaError::CloudApi(CloudApiError::invalid_response(format!(
            "Failed to parse response: {e}"
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_body_not_found() {
        let body = r#"{
            "httpStatus": 404,
            "messages": [
                { "errorCode": "100", "message": "Resource does not exist" }
            ]
        }"#;

        let error = decode_error_body(404, body);
        assert!(matches!(
            error,
            CloudApiError::NotFound { ref message } if message == "Resource does not exist"
        ));
    }

    #[test]
    fn test_decode_error_body_validation_mentions_field() {
        let body = r#"{
            "httpStatus": 422,
            "messages": [
                { "errorCode": "316", "message": "Attribute 'lan' is required" }
            ]
        }"#;

        let error = decode_error_body(422, body);
        assert!(matches!(
            error,
            CloudApiError::ValidationFailed { ref message } if message.contains("lan")
        ));
    }

    #[test]
    fn test_decode_error_body_joins_multiple_messages() {
        let body = r#"{
            "messages": [
                { "message": "first" },
                { "message": "second" }
            ]
        }"#;

        let error = decode_error_body(500, body);
        assert!(matches!(
            error,
            CloudApiError::ApiRequestFailed { status: 500, ref message } if message == "first; second"
        ));
    }

    #[test]
    fn test_decode_error_body_falls_back_to_raw_text() {
        let error = decode_error_body(502, "bad gateway");
        assert!(matches!(
            error,
            CloudApiError::ApiRequestFailed { status: 502, ref message } if message == "bad gateway"
        ));
    }

    #[test]
    fn test_client_strips_trailing_slash_from_endpoint() {
        let client = CloudApiClient::with_endpoint("user", "pass", "https://api.example.test/v5/")
            .expect("client should build");
        assert_eq!(client.endpoint(), "https://api.example.test/v5");
    }
}
