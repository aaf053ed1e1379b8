//! NIC API suite against a mock CloudAPI server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stratovia_cloud_api::cloudapi::{CreateNicRequest, UpdateNicRequest};

const DC_ID: &str = "9bcba3b9-3c5e-45c8-9c39-a03e0259d3a9";
const SERVER_ID: &str = "5c3f9a1d-8a11-4f0e-b1c5-9e1dfe4b40cd";
const NIC_ID: &str = "6e9d7a9f-4c2a-45cb-bd47-d10a8b1f61f2";
const REQUEST_ID: &str = "b4f0a2e9-9f7d-49a5-9c3e-2a0dd5a4d7c1";

fn nics_path() -> String {
    format!("/datacenters/{DC_ID}/servers/{SERVER_ID}/nics")
}

#[tokio::test]
async fn test_create_echoes_requested_properties() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("POST"))
        .and(path(nics_path()))
        .and(body_json(json!({
            "properties": {
                "name": fx.nic.name,
                "dhcp": fx.nic.dhcp,
                "lan": fx.nic.lan,
                "firewallActive": fx.nic.firewall_active,
            }
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header(
                    "location",
                    common::status_location(&base, REQUEST_ID).as_str(),
                )
                .set_body_json(common::nic_json(
                    &base,
                    DC_ID,
                    SERVER_ID,
                    NIC_ID,
                    fx.nic.lan,
                    Some("02:01:9f:83:aa:10"),
                )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = CreateNicRequest::new()
        .with_name(&fx.nic.name)
        .with_dhcp(fx.nic.dhcp)
        .with_lan(fx.nic.lan)
        .with_firewall_active(fx.nic.firewall_active);

    let nic = client
        .create_nic(DC_ID, SERVER_ID, &request)
        .await
        .expect("create should succeed");

    assert_eq!(nic.id, NIC_ID);
    assert_eq!(nic.properties.lan, fx.nic.lan);
    assert!(nic.properties.dhcp);
    assert!(nic.properties.nat.is_none());
    assert!(!nic.properties.ips.is_empty());
    assert!(nic.request.is_some());
}

#[tokio::test]
async fn test_create_without_lan_is_a_validation_failure() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    // The exact body matcher doubles as proof that unset optional
    // fields are omitted rather than sent as null.
    Mock::given(method("POST"))
        .and(path(nics_path()))
        .and(body_json(json!({
            "properties": { "name": "eth0" }
        })))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(common::error_json(422, &fx.errors.missing_lan)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = CreateNicRequest::new().with_name("eth0");

    let error = client
        .create_nic(DC_ID, SERVER_ID, &request)
        .await
        .expect_err("a NIC without a LAN should be rejected");

    assert!(error.is_validation());
    let message = error
        .provider_message()
        .expect("validation failures carry the provider message");
    assert!(
        message.contains("lan"),
        "the message should name the missing attribute: {message}"
    );
}

#[tokio::test]
async fn test_get_returns_provider_assigned_mac() {
    let server = MockServer::start().await;
    let fx = common::fixtures();
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(format!("{}/{NIC_ID}", nics_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::nic_json(
            &base,
            DC_ID,
            SERVER_ID,
            NIC_ID,
            fx.nic.lan,
            Some("02:01:9f:83:aa:10"),
        )))
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let nic = client
        .get_nic(DC_ID, SERVER_ID, NIC_ID)
        .await
        .expect("get should succeed");

    let mac = nic.properties.mac.as_deref().expect("the provider assigns a MAC");
    assert!(common::is_mac(mac), "unexpected MAC format: {mac}");
}

#[tokio::test]
async fn test_update_moves_nic_to_another_lan() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("PATCH"))
        .and(path(format!("{}/{NIC_ID}", nics_path())))
        .and(body_json(json!({ "lan": 2 })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header(
                    "location",
                    common::status_location(&base, REQUEST_ID).as_str(),
                )
                .set_body_json(common::nic_json(
                    &base,
                    DC_ID,
                    SERVER_ID,
                    NIC_ID,
                    2,
                    Some("02:01:9f:83:aa:10"),
                )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let request = UpdateNicRequest::new().with_lan(2);
    let nic = client
        .update_nic(DC_ID, SERVER_ID, NIC_ID, &request)
        .await
        .expect("update should succeed");

    assert_eq!(nic.properties.lan, 2);
}

#[tokio::test]
async fn test_delete_returns_request_reference() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("DELETE"))
        .and(path(format!("{}/{NIC_ID}", nics_path())))
        .respond_with(ResponseTemplate::new(202).insert_header(
            "location",
            common::status_location(&base, REQUEST_ID).as_str(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let reference = client
        .delete_nic(DC_ID, SERVER_ID, NIC_ID)
        .await
        .expect("delete should be accepted");

    assert_eq!(reference.request_id, REQUEST_ID);
}

#[tokio::test]
async fn test_list_nics() {
    let server = MockServer::start().await;
    let base = server.uri();

    let items = vec![
        common::nic_json(&base, DC_ID, SERVER_ID, NIC_ID, 1, Some("02:01:9f:83:aa:10")),
        common::nic_json(
            &base,
            DC_ID,
            SERVER_ID,
            "0233e9e3-52fa-4f4b-a82f-0d3a40e1f0c7",
            2,
            Some("02:01:9f:83:aa:11"),
        ),
    ];

    Mock::given(method("GET"))
        .and(path(nics_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::collection_json(&base, "nics", items)),
        )
        .mount(&server)
        .await;

    let client = common::test_client(&base);
    let nics = client
        .list_nics(DC_ID, SERVER_ID)
        .await
        .expect("list should succeed");

    assert_eq!(nics.items.len(), 2);
    assert_eq!(nics.items[1].properties.lan, 2);
}
