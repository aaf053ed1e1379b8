//! Stratovia CloudAPI integration module.
//!
//! This module provides all functionality for interacting with the CloudAPI,
//! including datacenter, server, LAN, and NIC lifecycle management and the
//! completion poller for asynchronous provisioning requests.

mod client;
mod types;
mod requests;
mod datacenters;
mod servers;
mod lans;
mod nics;

pub use client::{CloudApiClient, DEFAULT_API_URL};
pub use requests::{
    Request, RequestProperties, RequestRef, RequestState, RequestStatus, RequestStatusMeta,
    RequestTarget, TargetResource, Trackable, WaitOptions,
};
pub use types::{
    Collection, CreateDatacenterRequest, CreateLanRequest, CreateNicRequest, CreateServerRequest,
    Datacenter, DatacenterProperties, Lan, LanEntities, LanProperties, Nic, NicProperties,
    ResourceMeta, ResourceState, ResourceType, Server, ServerProperties, UpdateDatacenterRequest,
    UpdateLanRequest, UpdateNicRequest, UpdateServerRequest,
};
