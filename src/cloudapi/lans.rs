//! LAN operations.

use tracing::info;

use crate::error::Result;

use super::client::CloudApiClient;
use super::requests::RequestRef;
use super::types::{Collection, CreateLanRequest, Lan, Nic, UpdateLanRequest};

impl CloudApiClient {
    /// Lists the LANs inside a datacenter.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_lans(&self, datacenter_id: &str) -> Result<Collection<Lan>> {
        self.get_json(&format!("/datacenters/{datacenter_id}/lans")).await
    }

    /// Fetches a single LAN by id.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::NotFound`](crate::error::CloudApiError::NotFound)
    /// if no LAN with the given id exists in the datacenter.
    pub async fn get_lan(&self, datacenter_id: &str, lan_id: &str) -> Result<Lan> {
        self.get_json(&format!("/datacenters/{datacenter_id}/lans/{lan_id}"))
            .await
    }

    /// Creates a LAN inside a datacenter.
    ///
    /// Existing NICs named in the request are attached to the new LAN
    /// at creation time. The returned resource carries the provisioning
    /// request reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn create_lan(&self, datacenter_id: &str, request: &CreateLanRequest) -> Result<Lan> {
        info!(
            "Creating LAN '{}' in datacenter {datacenter_id}",
            request.name.as_deref().unwrap_or("unnamed")
        );

        let mut body = serde_json::json!({ "properties": request });
        if !request.nics.is_empty() {
            let items: Vec<_> = request
                .nics
                .iter()
                .map(|id| serde_json::json!({ "id": id }))
                .collect();
            body["entities"] = serde_json::json!({ "nics": { "items": items } });
        }

        let (mut lan, request_ref) = self
            .post_json::<Lan>(&format!("/datacenters/{datacenter_id}/lans"), &body)
            .await?;
        lan.request = request_ref;

        Ok(lan)
    }

    /// Updates a LAN's properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_lan(
        &self,
        datacenter_id: &str,
        lan_id: &str,
        request: &UpdateLanRequest,
    ) -> Result<Lan> {
        info!("Updating LAN {lan_id} in datacenter {datacenter_id}");

        let (mut lan, request_ref) = self
            .patch_json::<Lan>(&format!("/datacenters/{datacenter_id}/lans/{lan_id}"), request)
            .await?;
        lan.request = request_ref;

        Ok(lan)
    }

    /// Lists the NICs attached to a LAN.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn get_lan_members(
        &self,
        datacenter_id: &str,
        lan_id: &str,
    ) -> Result<Collection<Nic>> {
        self.get_json(&format!("/datacenters/{datacenter_id}/lans/{lan_id}/nics"))
            .await
    }

    /// Deletes a LAN.
    ///
    /// Returns the deletion request reference so callers can wait for the
    /// delete to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_lan(&self, datacenter_id: &str, lan_id: &str) -> Result<RequestRef> {
        info!("Deleting LAN {lan_id} in datacenter {datacenter_id}");

        self.delete_path(&format!("/datacenters/{datacenter_id}/lans/{lan_id}"))
            .await
    }
}
