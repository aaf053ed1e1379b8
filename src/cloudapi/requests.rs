//! Provisioning request tracking and completion polling.
//!
//! Mutating CloudAPI calls are asynchronous: the provider answers with
//! `202 Accepted` and a `Location` header pointing at a request status
//! endpoint. This module models those requests and provides the polling
//! loop that waits for them to reach a terminal status.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{CloudApiError, Result, StratoviaError};

use super::client::CloudApiClient;
use super::types::{Collection, ResourceType};

/// Default overall wait budget in seconds.
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 300;

/// Default initial delay between status checks in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default upper bound for the growing delay between checks in seconds.
const DEFAULT_MAX_POLL_INTERVAL_SECS: u64 = 60;

/// Reference to an in-flight provisioning request, parsed from the
/// `Location` header of a mutation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRef {
    /// Request identifier.
    pub request_id: String,
    /// Absolute URL of the request status endpoint.
    pub status_href: String,
}

/// Lifecycle status of a provisioning request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    /// Request accepted but not yet scheduled.
    Queued,
    /// Request is being executed.
    Running,
    /// Request completed successfully.
    Done,
    /// Request failed.
    Failed,
    /// Unknown status.
    #[default]
    Unknown,
}

/// Status view of a provisioning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatus {
    /// Status resource identifier.
    #[serde(default)]
    pub id: String,
    /// Resource type marker (always `request-status`).
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of this status view.
    #[serde(default)]
    pub href: String,
    /// The status payload.
    pub metadata: RequestStatusMeta,
}

/// Status payload of a provisioning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusMeta {
    /// Current lifecycle status.
    #[serde(default)]
    pub status: RequestState,
    /// Human-readable progress or failure message.
    #[serde(default)]
    pub message: Option<String>,
    /// Entity tag.
    #[serde(default)]
    pub etag: Option<String>,
    /// Resources affected by this request.
    #[serde(default)]
    pub targets: Vec<RequestTarget>,
}

/// A resource affected by a provisioning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTarget {
    /// The affected resource.
    pub target: TargetResource,
    /// Per-target status.
    #[serde(default)]
    pub status: RequestState,
}

/// Identity of a resource touched by a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetResource {
    /// Resource identifier.
    pub id: String,
    /// Resource type marker.
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the resource.
    #[serde(default)]
    pub href: String,
}

/// A recorded provisioning request (the mutation itself, not its status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Request identifier.
    pub id: String,
    /// Resource type marker (always `request`).
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the request.
    #[serde(default)]
    pub href: String,
    /// Resource metadata.
    #[serde(default)]
    pub metadata: Option<super::types::ResourceMeta>,
    /// The recorded mutation.
    pub properties: RequestProperties,
}

/// The mutation recorded by a provisioning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestProperties {
    /// HTTP method of the recorded call.
    #[serde(default)]
    pub method: Option<String>,
    /// URL of the recorded call.
    #[serde(default)]
    pub url: Option<String>,
    /// Request body of the recorded call, as submitted.
    #[serde(default)]
    pub body: Option<String>,
    /// Headers of the recorded call.
    #[serde(default)]
    pub headers: Option<serde_json::Value>,
}

/// Values that may carry a reference to an in-flight provisioning request.
///
/// Mutation responses carry one; anything obtained from a plain GET does
/// not and is treated as already settled.
pub trait Trackable {
    /// The request reference attached to this value, if any.
    fn request_ref(&self) -> Option<&RequestRef>;
}

impl Trackable for RequestRef {
    fn request_ref(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Tuning knobs for [`CloudApiClient::wait_for_completion_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Overall wait budget.
    pub timeout: Duration,
    /// Initial delay between status checks.
    pub poll_interval: Duration,
    /// Upper bound for the delay, which doubles after every check.
    pub max_poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_poll_interval: Duration::from_secs(DEFAULT_MAX_POLL_INTERVAL_SECS),
        }
    }
}

impl WaitOptions {
    /// Creates wait options with the default timeout and intervals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overall wait budget.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the initial delay between status checks.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the upper bound for the growing delay between checks.
    #[must_use]
    pub const fn with_max_poll_interval(mut self, interval: Duration) -> Self {
        self.max_poll_interval = interval;
        self
    }
}

impl RequestState {
    /// Returns true when the request has reached a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl RequestRef {
    /// Parses a request reference from a mutation response `Location`
    /// header of the form `…/requests/{id}/status`.
    pub(crate) fn from_location(location: &str) -> Option<Self> {
        let (_, tail) = location.split_once("/requests/")?;
        let tail = tail.trim_end_matches('/');
        let request_id = tail.strip_suffix("/status").unwrap_or(tail);

        if request_id.is_empty() || request_id.contains('/') {
            return None;
        }

        Some(Self {
            request_id: request_id.to_string(),
            status_href: location.to_string(),
        })
    }
}

impl RequestStatus {
    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn state(&self) -> RequestState {
        self.metadata.status
    }
}

impl CloudApiClient {
    /// Fetches a recorded provisioning request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the API call fails.
    pub async fn get_request(&self, request_id: &str) -> Result<Request> {
        self.get_json(&format!("/requests/{request_id}")).await
    }

    /// Fetches the current status of a provisioning request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the API call fails.
    pub async fn get_request_status(&self, request_id: &str) -> Result<RequestStatus> {
        self.get_json(&format!("/requests/{request_id}/status")).await
    }

    /// Lists recorded provisioning requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_requests(&self) -> Result<Collection<Request>> {
        self.get_json("/requests").await
    }

    /// Waits for the provisioning request behind `resource` to finish,
    /// using the default [`WaitOptions`].
    ///
    /// # Errors
    ///
    /// See [`wait_for_completion_with`](Self::wait_for_completion_with).
    pub async fn wait_for_completion<T: Trackable>(
        &self,
        resource: &T,
    ) -> Result<Option<RequestStatus>> {
        self.wait_for_completion_with(resource, &WaitOptions::default()).await
    }

    /// Waits for the provisioning request behind `resource` to finish.
    ///
    /// Polls the request status endpoint until the provider reports `DONE`
    /// or `FAILED`, or until `options.timeout` elapses. The delay between
    /// checks starts at `options.poll_interval` and doubles after every
    /// check, capped at `options.max_poll_interval`. The deadline is
    /// evaluated after each check, so at least one check always happens
    /// and a request that is already terminal returns without sleeping.
    ///
    /// Returns `Ok(None)` immediately, without any status call, when
    /// `resource` carries no request reference.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::RequestFailed`] when the provider reports
    /// `FAILED`, [`CloudApiError::Timeout`] when the wait budget runs out,
    /// or any API error raised by the status calls.
    pub async fn wait_for_completion_with<T: Trackable>(
        &self,
        resource: &T,
        options: &WaitOptions,
    ) -> Result<Option<RequestStatus>> {
        let Some(request) = resource.request_ref() else {
            return Ok(None);
        };

        self.wait_for_request_ref(request, options).await.map(Some)
    }

    /// Waits for a provisioning request identified by its ID.
    ///
    /// # Errors
    ///
    /// See [`wait_for_completion_with`](Self::wait_for_completion_with).
    pub async fn wait_for_request(
        &self,
        request_id: &str,
        options: &WaitOptions,
    ) -> Result<RequestStatus> {
        let request = RequestRef {
            request_id: request_id.to_string(),
            status_href: format!("{}/requests/{request_id}/status", self.endpoint()),
        };

        self.wait_for_request_ref(&request, options).await
    }

    /// The polling loop shared by every wait entry point.
    async fn wait_for_request_ref(
        &self,
        request: &RequestRef,
        options: &WaitOptions,
    ) -> Result<RequestStatus> {
        let deadline = Instant::now() + options.timeout;
        let mut interval = options.poll_interval;

        loop {
            let status = self.get_request_status(&request.request_id).await?;
            let state = status.state();

            match state {
                RequestState::Done => {
                    debug!("Request {} completed", request.request_id);
                    return Ok(status);
                }
                RequestState::Failed => {
                    let message = status
                        .metadata
                        .message
                        .unwrap_or_else(|| String::from("request failed without a message"));
                    warn!("Request {} failed: {message}", request.request_id);
                    return Err(StratoviaError::CloudApi(CloudApiError::RequestFailed {
                        request_id: request.request_id.clone(),
                        message,
                    }));
                }
                _ => {}
            }

            // Deadline check comes after the fetch: the boundary is
            // inclusive of one final status check.
            if Instant::now() >= deadline {
                return Err(StratoviaError::CloudApi(CloudApiError::Timeout {
                    request_id: request.request_id.clone(),
                    last_status: state.to_string(),
                }));
            }

            debug!(
                "Request {} is {state}, checking again in {}ms",
                request.request_id,
                interval.as_millis()
            );
            tokio::time::sleep(interval).await;
            interval = interval.saturating_mul(2).min(options.max_poll_interval);
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        write!(f, "{state}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ref_from_status_location() {
        let location =
            "https://api.example.test/cloudapi/v5/requests/3f2cc2be-bd93-4a7e-a8a2-6dbadb6cf2d6/status";
        let request = RequestRef::from_location(location).expect("location should parse");

        assert_eq!(request.request_id, "3f2cc2be-bd93-4a7e-a8a2-6dbadb6cf2d6");
        assert_eq!(request.status_href, location);
    }

    #[test]
    fn test_request_ref_from_bare_request_location() {
        let location = "https://api.example.test/cloudapi/v5/requests/abc-123";
        let request = RequestRef::from_location(location).expect("location should parse");

        assert_eq!(request.request_id, "abc-123");
    }

    #[test]
    fn test_request_ref_tolerates_trailing_slash() {
        let location = "https://api.example.test/cloudapi/v5/requests/abc-123/status/";
        let request = RequestRef::from_location(location).expect("location should parse");

        assert_eq!(request.request_id, "abc-123");
    }

    #[test]
    fn test_request_ref_rejects_unrelated_locations() {
        assert!(RequestRef::from_location("https://api.example.test/datacenters/abc").is_none());
        assert!(RequestRef::from_location("https://api.example.test/requests/").is_none());
        assert!(
            RequestRef::from_location("https://api.example.test/requests/abc/extra/status")
                .is_none()
        );
    }

    #[test]
    fn test_request_state_terminality() {
        assert!(RequestState::Done.is_terminal());
        assert!(RequestState::Failed.is_terminal());
        assert!(!RequestState::Queued.is_terminal());
        assert!(!RequestState::Running.is_terminal());
        assert!(!RequestState::Unknown.is_terminal());
    }

    #[test]
    fn test_request_status_parses_provider_payload() {
        let body = r#"{
            "id": "3f2cc2be-bd93-4a7e-a8a2-6dbadb6cf2d6/status",
            "type": "request-status",
            "href": "https://api.example.test/cloudapi/v5/requests/3f2cc2be-bd93-4a7e-a8a2-6dbadb6cf2d6/status",
            "metadata": {
                "status": "RUNNING",
                "message": "Creating LAN",
                "etag": "5a3f9e7b",
                "targets": [
                    {
                        "target": {
                            "id": "1",
                            "type": "lan",
                            "href": "https://api.example.test/cloudapi/v5/datacenters/dc/lans/1"
                        },
                        "status": "RUNNING"
                    }
                ]
            }
        }"#;

        let status: RequestStatus = serde_json::from_str(body).expect("status should parse");
        assert_eq!(status.state(), RequestState::Running);
        assert_eq!(status.resource_type, ResourceType::RequestStatus);
        assert_eq!(status.metadata.targets.len(), 1);
        assert_eq!(status.metadata.targets[0].target.resource_type, ResourceType::Lan);
        assert_eq!(status.metadata.message.as_deref(), Some("Creating LAN"));
    }

    #[test]
    fn test_wait_options_builders() {
        let options = WaitOptions::new()
            .with_timeout(Duration::from_secs(30))
            .with_poll_interval(Duration::from_millis(100))
            .with_max_poll_interval(Duration::from_secs(1));

        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.poll_interval, Duration::from_millis(100));
        assert_eq!(options.max_poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_wait_options_defaults() {
        let options = WaitOptions::default();

        assert_eq!(options.timeout, Duration::from_secs(300));
        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert_eq!(options.max_poll_interval, Duration::from_secs(60));
    }
}
