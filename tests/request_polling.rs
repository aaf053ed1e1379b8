//! Completion-polling suite against a mock CloudAPI server.
//!
//! Exercises the wait loop end to end: immediate return on terminal
//! requests, backoff-driven follow-up checks, failure surfacing and the
//! inclusive timeout boundary.

mod common;

use std::time::{Duration, Instant};

use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stratovia_cloud_api::{
    CloudApiError, Datacenter, RequestRef, RequestState, StratoviaError, WaitOptions,
};

const REQUEST_ID: &str = "3f2cc2be-bd93-4a7e-a8a2-6dbadb6cf2d6";

fn request_ref(base: &str) -> RequestRef {
    RequestRef {
        request_id: REQUEST_ID.to_string(),
        status_href: common::status_location(base, REQUEST_ID),
    }
}

fn fast_options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(20))
        .with_max_poll_interval(Duration::from_millis(50))
}

#[tokio::test]
async fn test_done_request_returns_after_a_single_status_call() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "DONE",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let started = Instant::now();

    // Default options poll every five seconds, so any sleep at all
    // would blow the elapsed-time bound below.
    let status = client
        .wait_for_completion(&request_ref(&base))
        .await
        .expect("wait should succeed")
        .expect("a request reference was supplied");

    assert_eq!(status.state(), RequestState::Done);
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "an already-done request must not sleep"
    );
}

#[tokio::test]
async fn test_poller_follows_request_to_completion() {
    let server = MockServer::start().await;
    let base = server.uri();
    let status_path = format!("/requests/{REQUEST_ID}/status");

    Mock::given(method("GET"))
        .and(path(status_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "QUEUED",
            None,
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(status_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "RUNNING",
            Some("Creating LAN"),
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(status_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "DONE",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let status = client
        .wait_for_completion_with(&request_ref(&base), &fast_options())
        .await
        .expect("wait should succeed")
        .expect("a request reference was supplied");

    assert_eq!(status.state(), RequestState::Done);
}

#[tokio::test]
async fn test_failed_request_surfaces_provider_message() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "FAILED",
            Some(&fx.errors.provisioning_failed),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let error = client
        .wait_for_completion_with(&request_ref(&base), &fast_options())
        .await
        .expect_err("a failed request should surface as an error");

    match error {
        StratoviaError::CloudApi(CloudApiError::RequestFailed {
            request_id,
            message,
        }) => {
            assert_eq!(request_id, REQUEST_ID);
            assert_eq!(message, fx.errors.provisioning_failed);
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_timeout_still_checks_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "RUNNING",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let started = Instant::now();
    let options = WaitOptions::new().with_timeout(Duration::ZERO);

    // The deadline is evaluated after each status check, so even an
    // expired budget gets exactly one check and no sleep.
    let error = client
        .wait_for_completion_with(&request_ref(&base), &options)
        .await
        .expect_err("an expired budget should time out");

    match error {
        StratoviaError::CloudApi(CloudApiError::Timeout {
            request_id,
            last_status,
        }) => {
            assert_eq!(request_id, REQUEST_ID);
            assert_eq!(last_status, "running");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_stalled_request_times_out_with_last_status() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "QUEUED",
            None,
        )))
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let options = WaitOptions::new()
        .with_timeout(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(60))
        .with_max_poll_interval(Duration::from_millis(60));

    let error = client
        .wait_for_completion_with(&request_ref(&base), &options)
        .await
        .expect_err("a stalled request should time out");

    match error {
        StratoviaError::CloudApi(CloudApiError::Timeout { last_status, .. }) => {
            assert_eq!(last_status, "queued");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }

    let calls = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert!(
        calls.len() >= 2,
        "the poller should have kept checking until the deadline, saw {} calls",
        calls.len()
    );
}

#[tokio::test]
async fn test_resource_without_request_returns_immediately() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let datacenter: Datacenter = serde_json::from_value(common::datacenter_json(
        &base,
        "9bcba3b9-3c5e-45c8-9c39-a03e0259d3a9",
        "idle",
        "us/las",
        "AVAILABLE",
    ))
    .expect("fixture should deserialize");

    let client = common::test_client(&base);
    let status = client
        .wait_for_completion(&datacenter)
        .await
        .expect("wait should succeed");

    assert!(status.is_none(), "a settled resource has nothing to wait on");
}

#[tokio::test]
async fn test_wait_for_request_by_id() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_status_json(
            &base,
            REQUEST_ID,
            "DONE",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let status = client
        .wait_for_request(REQUEST_ID, &fast_options())
        .await
        .expect("wait should succeed");

    assert_eq!(status.state(), RequestState::Done);
}

#[tokio::test]
async fn test_get_request_returns_recorded_mutation() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/requests/{REQUEST_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::request_json(
            &base,
            REQUEST_ID,
            "POST",
            "/datacenters",
        )))
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = client
        .get_request(REQUEST_ID)
        .await
        .expect("get should succeed");

    assert_eq!(request.id, REQUEST_ID);
    assert_eq!(request.properties.method.as_deref(), Some("POST"));
}
