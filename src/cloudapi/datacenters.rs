//! Datacenter operations.

use tracing::info;

use crate::error::Result;

use super::client::CloudApiClient;
use super::requests::RequestRef;
use super::types::{Collection, CreateDatacenterRequest, Datacenter, UpdateDatacenterRequest};

impl CloudApiClient {
    /// Lists all datacenters visible to the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_datacenters(&self) -> Result<Collection<Datacenter>> {
        self.get_json("/datacenters").await
    }

    /// Fetches a single datacenter by id.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::NotFound`](crate::error::CloudApiError::NotFound)
    /// if no datacenter with the given id exists.
    pub async fn get_datacenter(&self, datacenter_id: &str) -> Result<Datacenter> {
        self.get_json(&format!("/datacenters/{datacenter_id}")).await
    }

    /// Creates a datacenter.
    ///
    /// The returned resource carries the provisioning request reference,
    /// which can be passed to
    /// [`wait_for_completion`](CloudApiClient::wait_for_completion).
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn create_datacenter(
        &self,
        request: &CreateDatacenterRequest,
    ) -> Result<Datacenter> {
        info!("Creating datacenter '{}' in {}", request.name, request.location);

        let body = serde_json::json!({ "properties": request });
        let (mut datacenter, request_ref) =
            self.post_json::<Datacenter>("/datacenters", &body).await?;
        datacenter.request = request_ref;

        Ok(datacenter)
    }

    /// Updates a datacenter's properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_datacenter(
        &self,
        datacenter_id: &str,
        request: &UpdateDatacenterRequest,
    ) -> Result<Datacenter> {
        info!("Updating datacenter {datacenter_id}");

        let (mut datacenter, request_ref) = self
            .patch_json::<Datacenter>(&format!("/datacenters/{datacenter_id}"), request)
            .await?;
        datacenter.request = request_ref;

        Ok(datacenter)
    }

    /// Deletes a datacenter and everything in it.
    ///
    /// Returns the deletion request reference so callers can wait for the
    /// delete to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_datacenter(&self, datacenter_id: &str) -> Result<RequestRef> {
        info!("Deleting datacenter {datacenter_id}");

        self.delete_path(&format!("/datacenters/{datacenter_id}")).await
    }
}
