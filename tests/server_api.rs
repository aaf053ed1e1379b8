//! Server API suite against a mock CloudAPI server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stratovia_cloud_api::cloudapi::{CreateServerRequest, UpdateServerRequest};

const DC_ID: &str = "9bcba3b9-3c5e-45c8-9c39-a03e0259d3a9";
const SERVER_ID: &str = "5c3f9a1d-8a11-4f0e-b1c5-9e1dfe4b40cd";
const REQUEST_ID: &str = "1d9cfa68-0c3f-4b44-8f43-0f1a0c96f8a4";

#[tokio::test]
async fn test_create_sends_properties_envelope() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("POST"))
        .and(path(format!("/datacenters/{DC_ID}/servers")))
        .and(body_json(json!({
            "properties": {
                "name": fx.server.name,
                "cores": fx.server.cores,
                "ram": fx.server.ram,
                "availabilityZone": "ZONE_1",
            }
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header(
                    "location",
                    common::status_location(&base, REQUEST_ID).as_str(),
                )
                .set_body_json(common::server_json(
                    &base,
                    DC_ID,
                    SERVER_ID,
                    &fx.server.name,
                    fx.server.cores,
                    fx.server.ram,
                )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = CreateServerRequest::new(&fx.server.name, fx.server.cores, fx.server.ram)
        .with_availability_zone("ZONE_1");

    let created = client
        .create_server(DC_ID, &request)
        .await
        .expect("create should succeed");

    assert_eq!(created.id, SERVER_ID);
    assert_eq!(created.properties.cores, fx.server.cores);
    assert_eq!(created.properties.ram, fx.server.ram);
    assert!(created.request.is_some());
}

#[tokio::test]
async fn test_get_server() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("/datacenters/{DC_ID}/servers/{SERVER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::server_json(
            &base,
            DC_ID,
            SERVER_ID,
            &fx.server.name,
            fx.server.cores,
            fx.server.ram,
        )))
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let fetched = client
        .get_server(DC_ID, SERVER_ID)
        .await
        .expect("get should succeed");

    assert_eq!(fetched.properties.name, fx.server.name);
    assert!(fetched.request.is_none());
}

#[tokio::test]
async fn test_update_sends_flat_properties() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("PATCH"))
        .and(path(format!("/datacenters/{DC_ID}/servers/{SERVER_ID}")))
        .and(body_json(json!({ "cores": 2, "ram": 2048 })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header(
                    "location",
                    common::status_location(&base, REQUEST_ID).as_str(),
                )
                .set_body_json(common::server_json(
                    &base,
                    DC_ID,
                    SERVER_ID,
                    &fx.server.name,
                    2,
                    2048,
                )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = UpdateServerRequest::new().with_cores(2).with_ram(2048);
    let updated = client
        .update_server(DC_ID, SERVER_ID, &request)
        .await
        .expect("update should succeed");

    assert_eq!(updated.properties.cores, 2);
    assert_eq!(updated.properties.ram, 2048);
}

#[tokio::test]
async fn test_delete_returns_request_reference() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("DELETE"))
        .and(path(format!("/datacenters/{DC_ID}/servers/{SERVER_ID}")))
        .respond_with(ResponseTemplate::new(202).insert_header(
            "location",
            common::status_location(&base, REQUEST_ID).as_str(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let reference = client
        .delete_server(DC_ID, SERVER_ID)
        .await
        .expect("delete should be accepted");

    assert_eq!(reference.request_id, REQUEST_ID);
}

#[tokio::test]
async fn test_list_servers() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    let items = vec![common::server_json(
        &base,
        DC_ID,
        SERVER_ID,
        &fx.server.name,
        fx.server.cores,
        fx.server.ram,
    )];

    Mock::given(method("GET"))
        .and(path(format!("/datacenters/{DC_ID}/servers")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::collection_json(&base, "servers", items)),
        )
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let servers = client
        .list_servers(DC_ID)
        .await
        .expect("list should succeed");

    assert_eq!(servers.items.len(), 1);
}
