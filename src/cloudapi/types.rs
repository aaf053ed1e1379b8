//! CloudAPI wire types and data structures.
//!
//! This module defines the resource envelopes exchanged with the Stratovia
//! CloudAPI: datacenters, servers, LANs, NICs, and the request payloads
//! used to create and update them.

use serde::{Deserialize, Serialize};

use super::requests::{RequestRef, Trackable};

/// Lifecycle state of a provisioned resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceState {
    /// Resource is provisioned and usable.
    Available,
    /// Resource is being modified by an in-flight request.
    Busy,
    /// Resource exists but is not active.
    Inactive,
    /// Unknown state.
    #[default]
    Unknown,
}

/// Wire marker identifying the kind of a returned resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    /// A virtual datacenter.
    Datacenter,
    /// A server inside a datacenter.
    Server,
    /// A LAN inside a datacenter.
    Lan,
    /// A network interface attached to a server.
    Nic,
    /// A collection envelope.
    Collection,
    /// A recorded provisioning request.
    Request,
    /// The status view of a provisioning request.
    RequestStatus,
    /// Unknown resource type.
    #[default]
    Unknown,
}

/// Metadata attached to every provisioned resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeta {
    /// When the resource was created.
    #[serde(default)]
    pub created_date: Option<chrono::DateTime<chrono::Utc>>,
    /// Account that created the resource.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Entity tag for optimistic concurrency.
    #[serde(default)]
    pub etag: Option<String>,
    /// When the resource was last modified.
    #[serde(default)]
    pub last_modified_date: Option<chrono::DateTime<chrono::Utc>>,
    /// Account that last modified the resource.
    #[serde(default)]
    pub last_modified_by: Option<String>,
    /// Current lifecycle state.
    #[serde(default)]
    pub state: ResourceState,
}

/// Collection envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Collection identifier.
    #[serde(default)]
    pub id: String,
    /// Resource type marker (always `collection`).
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the collection.
    #[serde(default)]
    pub href: String,
    /// The collected resources.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A virtual datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datacenter {
    /// Unique datacenter identifier.
    pub id: String,
    /// Resource type marker.
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the datacenter.
    #[serde(default)]
    pub href: String,
    /// Resource metadata.
    #[serde(default)]
    pub metadata: Option<ResourceMeta>,
    /// Datacenter properties.
    pub properties: DatacenterProperties,
    /// Provisioning request that produced this resource, when it was
    /// obtained from a mutating call. Never part of the wire payload.
    #[serde(skip)]
    pub request: Option<RequestRef>,
}

/// Properties of a virtual datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterProperties {
    /// Datacenter name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Physical location identifier (e.g. `us/las`).
    pub location: String,
    /// Provisioning version counter.
    #[serde(default)]
    pub version: Option<u32>,
    /// Feature flags enabled for this datacenter.
    #[serde(default)]
    pub features: Vec<String>,
}

/// A server inside a virtual datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Unique server identifier.
    pub id: String,
    /// Resource type marker.
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the server.
    #[serde(default)]
    pub href: String,
    /// Resource metadata.
    #[serde(default)]
    pub metadata: Option<ResourceMeta>,
    /// Server properties.
    pub properties: ServerProperties,
    /// Provisioning request that produced this resource, when it was
    /// obtained from a mutating call.
    #[serde(skip)]
    pub request: Option<RequestRef>,
}

/// Properties of a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    /// Server name.
    pub name: String,
    /// Number of CPU cores.
    pub cores: u32,
    /// Memory in MB.
    pub ram: u32,
    /// Availability zone within the location.
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Hypervisor power state.
    #[serde(default)]
    pub vm_state: Option<String>,
}

/// A LAN inside a virtual datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lan {
    /// LAN identifier (small numeric string, unique per datacenter).
    pub id: String,
    /// Resource type marker.
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the LAN.
    #[serde(default)]
    pub href: String,
    /// Resource metadata.
    #[serde(default)]
    pub metadata: Option<ResourceMeta>,
    /// LAN properties.
    pub properties: LanProperties,
    /// Nested entities, populated at depth >= 2.
    #[serde(default)]
    pub entities: Option<LanEntities>,
    /// Provisioning request that produced this resource, when it was
    /// obtained from a mutating call.
    #[serde(skip)]
    pub request: Option<RequestRef>,
}

/// Properties of a LAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanProperties {
    /// LAN name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the LAN is reachable from the public internet.
    #[serde(default)]
    pub public: bool,
}

/// Entities nested under a LAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanEntities {
    /// NICs attached to this LAN.
    #[serde(default)]
    pub nics: Option<Collection<Nic>>,
}

/// A network interface attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nic {
    /// Unique NIC identifier.
    pub id: String,
    /// Resource type marker.
    #[serde(default, rename = "type")]
    pub resource_type: ResourceType,
    /// Canonical URL of the NIC.
    #[serde(default)]
    pub href: String,
    /// Resource metadata.
    #[serde(default)]
    pub metadata: Option<ResourceMeta>,
    /// NIC properties.
    pub properties: NicProperties,
    /// Provisioning request that produced this resource, when it was
    /// obtained from a mutating call.
    #[serde(skip)]
    pub request: Option<RequestRef>,
}

/// Properties of a NIC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicProperties {
    /// NIC name.
    #[serde(default)]
    pub name: Option<String>,
    /// MAC address, assigned by the provider.
    #[serde(default)]
    pub mac: Option<String>,
    /// IP addresses assigned to the NIC.
    #[serde(default)]
    pub ips: Vec<String>,
    /// Whether DHCP is enabled.
    #[serde(default)]
    pub dhcp: bool,
    /// Numeric ID of the LAN this NIC is attached to.
    pub lan: u32,
    /// Whether the firewall is active on this NIC.
    #[serde(default)]
    pub firewall_active: Option<bool>,
    /// Whether NAT is enabled.
    #[serde(default)]
    pub nat: Option<bool>,
}

/// Payload for creating a datacenter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatacenterRequest {
    /// Datacenter name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Physical location identifier (e.g. `us/las`).
    pub location: String,
}

/// Payload for creating a server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    /// Server name.
    pub name: String,
    /// Number of CPU cores.
    pub cores: u32,
    /// Memory in MB.
    pub ram: u32,
    /// Availability zone within the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

/// Payload for creating a LAN.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateLanRequest {
    /// LAN name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the LAN is reachable from the public internet.
    pub public: bool,
    /// IDs of existing NICs to attach on creation. Sent as nested
    /// entities, not as a property.
    #[serde(skip)]
    pub nics: Vec<String>,
}

/// Payload for creating a NIC.
///
/// The provider requires `lan`; it is optional here so a missing value is
/// reported by the API as a validation failure rather than masked by the
/// type system.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateNicRequest {
    /// NIC name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether DHCP is enabled (provider default: true).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<bool>,
    /// Numeric ID of the LAN to attach to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lan: Option<u32>,
    /// Whether the firewall is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_active: Option<bool>,
    /// Whether NAT is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat: Option<bool>,
    /// Static IP addresses to assign.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
}

/// Partial update of a datacenter.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDatacenterRequest {
    /// New datacenter name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update of a server.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServerRequest {
    /// New server name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New core count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    /// New memory size in MB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<u32>,
    /// New availability zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

/// Partial update of a LAN.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanRequest {
    /// New LAN name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New public flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

/// Partial update of a NIC.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNicRequest {
    /// New NIC name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New DHCP flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<bool>,
    /// Move the NIC to a different LAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lan: Option<u32>,
    /// New firewall flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_active: Option<bool>,
    /// New NAT flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat: Option<bool>,
    /// Replace the static IP addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<String>>,
}

impl Datacenter {
    /// Returns the lifecycle state recorded in the resource metadata.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.metadata.as_ref().map_or(ResourceState::Unknown, |m| m.state)
    }

    /// Checks if the datacenter is fully provisioned.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.state(), ResourceState::Available)
    }
}

impl Server {
    /// Returns the lifecycle state recorded in the resource metadata.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.metadata.as_ref().map_or(ResourceState::Unknown, |m| m.state)
    }
}

impl Lan {
    /// Returns the lifecycle state recorded in the resource metadata.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.metadata.as_ref().map_or(ResourceState::Unknown, |m| m.state)
    }

    /// Returns the member NICs embedded in this LAN, if the response was
    /// fetched with enough depth to include them.
    #[must_use]
    pub fn member_nics(&self) -> &[Nic] {
        self.entities
            .as_ref()
            .and_then(|e| e.nics.as_ref())
            .map_or(&[], |nics| nics.items.as_slice())
    }
}

impl Nic {
    /// Returns the lifecycle state recorded in the resource metadata.
    #[must_use]
    pub fn state(&self) -> ResourceState {
        self.metadata.as_ref().map_or(ResourceState::Unknown, |m| m.state)
    }
}

impl CreateDatacenterRequest {
    /// Creates a new datacenter creation payload.
    #[must_use]
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            location: location.to_string(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl CreateServerRequest {
    /// Creates a new server creation payload.
    #[must_use]
    pub fn new(name: &str, cores: u32, ram: u32) -> Self {
        Self {
            name: name.to_string(),
            cores,
            ram,
            availability_zone: None,
        }
    }

    /// Sets the availability zone.
    #[must_use]
    pub fn with_availability_zone(mut self, zone: &str) -> Self {
        self.availability_zone = Some(zone.to_string());
        self
    }
}

impl CreateLanRequest {
    /// Creates an empty LAN creation payload (private, unnamed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the LAN name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the public flag.
    #[must_use]
    pub const fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Attaches an existing NIC on creation.
    #[must_use]
    pub fn with_nic(mut self, nic_id: &str) -> Self {
        self.nics.push(nic_id.to_string());
        self
    }

    /// Replaces the set of NICs to attach on creation.
    #[must_use]
    pub fn with_nics(mut self, nic_ids: Vec<String>) -> Self {
        self.nics = nic_ids;
        self
    }
}

impl CreateNicRequest {
    /// Creates an empty NIC creation payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the NIC name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the LAN to attach to.
    #[must_use]
    pub const fn with_lan(mut self, lan_id: u32) -> Self {
        self.lan = Some(lan_id);
        self
    }

    /// Sets the DHCP flag.
    #[must_use]
    pub const fn with_dhcp(mut self, dhcp: bool) -> Self {
        self.dhcp = Some(dhcp);
        self
    }

    /// Sets the firewall flag.
    #[must_use]
    pub const fn with_firewall_active(mut self, active: bool) -> Self {
        self.firewall_active = Some(active);
        self
    }

    /// Sets the NAT flag.
    #[must_use]
    pub const fn with_nat(mut self, nat: bool) -> Self {
        self.nat = Some(nat);
        self
    }

    /// Adds a static IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: &str) -> Self {
        self.ips.push(ip.to_string());
        self
    }
}

impl UpdateDatacenterRequest {
    /// Creates an empty datacenter update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl UpdateServerRequest {
    /// Creates an empty server update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets a new core count.
    #[must_use]
    pub const fn with_cores(mut self, cores: u32) -> Self {
        self.cores = Some(cores);
        self
    }

    /// Sets a new memory size in MB.
    #[must_use]
    pub const fn with_ram(mut self, ram: u32) -> Self {
        self.ram = Some(ram);
        self
    }
}

impl UpdateLanRequest {
    /// Creates an empty LAN update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets a new public flag.
    #[must_use]
    pub const fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }
}

impl UpdateNicRequest {
    /// Creates an empty NIC update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Moves the NIC to a different LAN.
    #[must_use]
    pub const fn with_lan(mut self, lan_id: u32) -> Self {
        self.lan = Some(lan_id);
        self
    }

    /// Sets a new DHCP flag.
    #[must_use]
    pub const fn with_dhcp(mut self, dhcp: bool) -> Self {
        self.dhcp = Some(dhcp);
        self
    }

    /// Sets a new firewall flag.
    #[must_use]
    pub const fn with_firewall_active(mut self, active: bool) -> Self {
        self.firewall_active = Some(active);
        self
    }

    /// Sets a new NAT flag.
    #[must_use]
    pub const fn with_nat(mut self, nat: bool) -> Self {
        self.nat = Some(nat);
        self
    }

    /// Replaces the static IP addresses.
    #[must_use]
    pub fn with_ips(mut self, ips: Vec<String>) -> Self {
        self.ips = Some(ips);
        self
    }
}

impl Trackable for Datacenter {
    fn request_ref(&self) -> Option<&RequestRef> {
        self.request.as_ref()
    }
}

impl Trackable for Server {
    fn request_ref(&self) -> Option<&RequestRef> {
        self.request.as_ref()
    }
}

impl Trackable for Lan {
    fn request_ref(&self) -> Option<&RequestRef> {
        self.request.as_ref()
    }
}

impl Trackable for Nic {
    fn request_ref(&self) -> Option<&RequestRef> {
        self.request.as_ref()
    }
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        };
        write!(f, "{state}")
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Datacenter => "datacenter",
            Self::Server => "server",
            Self::Lan => "lan",
            Self::Nic => "nic",
            Self::Collection => "collection",
            Self::Request => "request",
            Self::RequestStatus => "request-status",
            Self::Unknown => "unknown",
        };
        write!(f, "{kind}")
    }
}
