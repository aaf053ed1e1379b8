//! Shared helpers for the API test suites.

// Not every test binary uses every helper.
#![allow(dead_code)]

use serde::Deserialize;
use serde_json::{json, Value};

use stratovia_cloud_api::CloudApiClient;

/// Fixture data loaded from `tests/fixtures/resources.yaml`.
#[derive(Debug, Deserialize)]
pub struct Fixtures {
    pub datacenter: DatacenterFixture,
    pub lan: LanFixture,
    pub server: ServerFixture,
    pub nic: NicFixture,
    pub errors: ErrorFixtures,
}

#[derive(Debug, Deserialize)]
pub struct DatacenterFixture {
    pub name: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct LanFixture {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServerFixture {
    pub name: String,
    pub cores: u32,
    pub ram: u32,
}

#[derive(Debug, Deserialize)]
pub struct NicFixture {
    pub name: String,
    pub dhcp: bool,
    pub lan: u32,
    pub firewall_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorFixtures {
    pub not_found: String,
    pub missing_lan: String,
    pub provisioning_failed: String,
}

/// Loads the shared fixture file.
pub fn fixtures() -> Fixtures {
    serde_yaml::from_str(include_str!("../fixtures/resources.yaml"))
        .expect("fixture file should parse")
}

/// Builds a client pointed at a mock server.
pub fn test_client(uri: &str) -> CloudApiClient {
    CloudApiClient::with_endpoint("test-user", "test-pass", uri).expect("client should build")
}

/// Provider-shaped resource metadata.
pub fn metadata_json(state: &str) -> Value {
    json!({
        "createdDate": "2026-03-14T09:21:40Z",
        "createdBy": "integration@stratovia.cloud",
        "etag": "45480eb3fbfc6f0b5d0a8b49a0a23a92",
        "lastModifiedDate": "2026-03-14T09:21:40Z",
        "lastModifiedBy": "integration@stratovia.cloud",
        "state": state
    })
}

/// Provider-shaped datacenter envelope.
pub fn datacenter_json(base: &str, id: &str, name: &str, location: &str, state: &str) -> Value {
    json!({
        "id": id,
        "type": "datacenter",
        "href": format!("{base}/datacenters/{id}"),
        "metadata": metadata_json(state),
        "properties": {
            "name": name,
            "description": "created by the integration suite",
            "location": location,
            "version": 1,
            "features": ["SSD"]
        }
    })
}

/// Provider-shaped server envelope.
pub fn server_json(base: &str, dc_id: &str, id: &str, name: &str, cores: u32, ram: u32) -> Value {
    json!({
        "id": id,
        "type": "server",
        "href": format!("{base}/datacenters/{dc_id}/servers/{id}"),
        "metadata": metadata_json("AVAILABLE"),
        "properties": {
            "name": name,
            "cores": cores,
            "ram": ram,
            "availabilityZone": "AUTO",
            "vmState": "RUNNING"
        }
    })
}

/// Provider-shaped LAN envelope. LAN ids are small numeric strings.
pub fn lan_json(base: &str, dc_id: &str, id: &str, name: &str, public: bool) -> Value {
    json!({
        "id": id,
        "type": "lan",
        "href": format!("{base}/datacenters/{dc_id}/lans/{id}"),
        "metadata": metadata_json("AVAILABLE"),
        "properties": {
            "name": name,
            "public": public
        }
    })
}

/// Provider-shaped NIC envelope. `mac` may be null while provisioning.
pub fn nic_json(
    base: &str,
    dc_id: &str,
    server_id: &str,
    id: &str,
    lan: u32,
    mac: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "type": "nic",
        "href": format!("{base}/datacenters/{dc_id}/servers/{server_id}/nics/{id}"),
        "metadata": metadata_json("AVAILABLE"),
        "properties": {
            "name": "test-nic",
            "mac": mac,
            "ips": ["203.0.113.24"],
            "dhcp": true,
            "lan": lan,
            "firewallActive": true,
            "nat": null
        }
    })
}

/// Provider-shaped collection envelope.
pub fn collection_json(base: &str, id: &str, items: Vec<Value>) -> Value {
    json!({
        "id": id,
        "type": "collection",
        "href": format!("{base}/{id}"),
        "items": items
    })
}

/// Provider-shaped request status payload.
pub fn request_status_json(base: &str, request_id: &str, status: &str, message: Option<&str>) -> Value {
    json!({
        "id": format!("{request_id}/status"),
        "type": "request-status",
        "href": format!("{base}/requests/{request_id}/status"),
        "metadata": {
            "status": status,
            "message": message,
            "etag": "45480eb3fbfc6f0b5d0a8b49a0a23a92",
            "targets": []
        }
    })
}

/// Provider-shaped request record.
pub fn request_json(base: &str, request_id: &str, method: &str, url: &str) -> Value {
    json!({
        "id": request_id,
        "type": "request",
        "href": format!("{base}/requests/{request_id}"),
        "metadata": metadata_json("AVAILABLE"),
        "properties": {
            "method": method,
            "url": url,
            "body": "{}",
            "headers": null
        }
    })
}

/// Provider-shaped error payload.
pub fn error_json(http_status: u16, message: &str) -> Value {
    json!({
        "httpStatus": http_status,
        "messages": [
            { "errorCode": "100", "message": message }
        ]
    })
}

/// `Location` header value for an accepted mutation.
pub fn status_location(base: &str, request_id: &str) -> String {
    format!("{base}/requests/{request_id}/status")
}

/// Loose MAC-48 shape check (six hex octets separated by colons).
pub fn is_mac(s: &str) -> bool {
    let parts: Vec<&str> = s.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}
