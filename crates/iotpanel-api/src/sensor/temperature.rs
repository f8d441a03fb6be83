use serde::Serialize;

use super::with_params;
use crate::client::ApiClient;
use crate::error::Error;
use crate::request::RequestOverride;
use crate::response::ApiResponse;
use crate::types::{ListParams, RecordId};

const TEMPERATURE_PATH: &str = "/sensor/temperature";

impl ApiClient {
    /// `GET /sensor/temperature`. The backend returns its most recent records.
    pub async fn get_temperature_list(
        &self,
        params: &ListParams,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(TEMPERATURE_PATH, with_params(overrides, params))
            .await
    }

    /// `POST /sensor/temperature`
    pub async fn post_temperature<B: Serialize + Sync + ?Sized>(
        &self,
        record: &B,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.post(TEMPERATURE_PATH, record, overrides).await
    }

    /// `GET /sensor/temperature/{id}`
    pub async fn get_temperature_by_id(
        &self,
        id: &RecordId,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(&format!("{TEMPERATURE_PATH}/{id}"), overrides)
            .await
    }

    /// `GET /sensor/temperature/latest`
    pub async fn get_temperature_latest(
        &self,
        params: &ListParams,
        overrides: RequestOverride,
    ) -> Result<ApiResponse, Error> {
        self.get(
            &format!("{TEMPERATURE_PATH}/latest"),
            with_params(overrides, params),
        )
        .await
    }
}
