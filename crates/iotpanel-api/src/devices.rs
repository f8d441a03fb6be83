// Health and device endpoints.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::request::RequestOverride;
use crate::response::ApiResponse;
use crate::types::DeviceId;

impl ApiClient {
    /// `GET /health`
    pub async fn health(&self, overrides: RequestOverride) -> Result<ApiResponse, Error> {
        self.get("/health", overrides).await
    }

    /// `GET /devices`. Filters go in `overrides.query`.
    pub async fn get_devices(&self, overrides: RequestOverride) -> Result<ApiResponse, Error> {
        self.get("/devices", overrides).await
    }

    /// `GET /devices/{id}`
    pub async fn get_device_by_id(
        &self,
        id: &DeviceId,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(&format!("/devices/{id}"), overrides).await
    }

    /// `PUT /devices/{id}` with the full device payload.
    pub async fn update_device<B: Serialize + Sync + ?Sized>(
        &self,
        id: &DeviceId,
        payload: &B,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.put(&format!("/devices/{id}"), payload, overrides).await
    }

    /// `POST /devices/{id}/actions/{action}`
    pub async fn trigger_action<B: Serialize + Sync + ?Sized>(
        &self,
        id: &DeviceId,
        action: &str,
        payload: &B,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.post(&format!("/devices/{id}/actions/{action}"), payload, overrides)
            .await
    }
}
