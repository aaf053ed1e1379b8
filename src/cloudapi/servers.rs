//! Server operations.

use tracing::info;

use crate::error::Result;

use super::client::CloudApiClient;
use super::requests::RequestRef;
use super::types::{Collection, CreateServerRequest, Server, UpdateServerRequest};

impl CloudApiClient {
    /// Lists the servers inside a datacenter.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_servers(&self, datacenter_id: &str) -> Result<Collection<Server>> {
        self.get_json(&format!("/datacenters/{datacenter_id}/servers"))
            .await
    }

    /// Fetches a single server by id.
    ///
    /// # Errors
    ///
    /// Returns [`CloudApiError::NotFound`](crate::error::CloudApiError::NotFound)
    /// if no server with the given id exists in the datacenter.
    pub async fn get_server(&self, datacenter_id: &str, server_id: &str) -> Result<Server> {
        self.get_json(&format!("/datacenters/{datacenter_id}/servers/{server_id}"))
            .await
    }

    /// Creates a server inside a datacenter.
    ///
    /// The returned resource carries the provisioning request reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn create_server(
        &self,
        datacenter_id: &str,
        request: &CreateServerRequest,
    ) -> Result<Server> {
        info!(
            "Creating server '{}' ({} cores, {} MB) in datacenter {datacenter_id}",
            request.name, request.cores, request.ram
        );

        let body = serde_json::json!({ "properties": request });
        let (mut server, request_ref) = self
            .post_json::<Server>(&format!("/datacenters/{datacenter_id}/servers"), &body)
            .await?;
        server.request = request_ref;

        Ok(server)
    }

    /// Updates a server's properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn update_server(
        &self,
        datacenter_id: &str,
        server_id: &str,
        request: &UpdateServerRequest,
    ) -> Result<Server> {
        info!("Updating server {server_id} in datacenter {datacenter_id}");

        let (mut server, request_ref) = self
            .patch_json::<Server>(
                &format!("/datacenters/{datacenter_id}/servers/{server_id}"),
                request,
            )
            .await?;
        server.request = request_ref;

        Ok(server)
    }

    /// Deletes a server.
    ///
    /// Returns the deletion request reference so callers can wait for the
    /// delete to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the request.
    pub async fn delete_server(&self, datacenter_id: &str, server_id: &str) -> Result<RequestRef> {
        info!("Deleting server {server_id} in datacenter {datacenter_id}");

        self.delete_path(&format!("/datacenters/{datacenter_id}/servers/{server_id}"))
            .await
    }
}
