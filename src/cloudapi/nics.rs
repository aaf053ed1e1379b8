//! NIC operations.
//!
//! NICs are nested under a server, which is itself nested under a
//! datacenter, so every operation here takes both parent ids.

use tracing::info;

use crate::error::Result;

use super::client::CloudApiClient;
use super::requests::RequestRef;
use super::types::{Collection, CreateNicRequest, Nic, UpdateNicRequest};

impl CloudApiClient {
    /// Lists the NICs attached to a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_nics(
        &self,
        datacenter_id: &str,
        server_id: &str,
    ) -> Result<Collection<Nic>> {
        self.get_json(&format!(
            "/datacenters/{datacenter_id}/servers/{server_id}/nics"
        ))
        .await
    }

    /// Fetches a single NIC by id.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::NotFound`](crate::error::CloudApiError::NotFound)
    /// if no NIC with the given id exists on the server.
    pub async fn get_nic(
        &self,
        datacenter_id: &str,
        server_id: &str,
        nic_id: &str,
    ) -> Result<Nic> {
        self.get_json(&format!(
            "/datacenters/{datacenter_id}/servers/{server_id}/nics/{nic_id}"
        ))
        .await
    }

    /// Creates a NIC on a server.
    ///
    /// The request must name the LAN to attach to; the API rejects a NIC
    /// without one as a validation failure. The returned resource carries
    /// the provisioning request reference.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::ValidationFailed`](crate::error::CloudApiError::ValidationFailed)
    /// if required attributes such as `lan` are missing, or another error
    /// if the API rejects the request.
    pub async fn create_nic(
        &self,
        datacenter_id: &str,
        server_id: &str,
        request: &CreateNicRequest,
    ) -> Result<Nic> {
        info!(
            "Creating NIC '{}' on server {server_id} in datacenter {datacenter_id}",
            request.name.as_deref().unwrap_or("unnamed")
        );

        let body = serde_json::json!({ "properties": request });
        let (mut nic, request_ref) = self
            .post_json::<Nic>(
                &format!("/datacenters/{datacenter_id}/servers/{server_id}/nics"),
                &body,
            )
            .await?;
        nic.request = request_ref;

        Ok(nic)
    }

    /// Updates a NIC's properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_nic(
        &self,
        datacenter_id: &str,
        server_id: &str,
        nic_id: &str,
        request: &UpdateNicRequest,
    ) -> Result<Nic> {
        info!("Updating NIC {nic_id} on server {server_id} in datacenter {datacenter_id}");

        let (mut nic, request_ref) = self
            .patch_json::<Nic>(
                &format!("/datacenters/{datacenter_id}/servers/{server_id}/nics/{nic_id}"),
                request,
            )
            .await?;
        nic.request = request_ref;

        Ok(nic)
    }

    /// Deletes a NIC.
    ///
    /// Returns the deletion request reference so callers can wait for the
    /// delete to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_nic(
        &self,
        datacenter_id: &str,
        server_id: &str,
        nic_id: &str,
    ) -> Result<RequestRef> {
        info!("Deleting NIC {nic_id} on server {server_id} in datacenter {datacenter_id}");

        self.delete_path(&format!(
            "/datacenters/{datacenter_id}/servers/{server_id}/nics/{nic_id}"
        ))
        .await
    }
}
