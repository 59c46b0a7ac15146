use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use super::error::ApiError;
use super::response::{decode_error, decode_success};
use crate::config::Config;
use crate::model::{Check, CheckReceipt, Vehicle};

/// The two backend operations the form depends on.
///
/// Implementations are cheap to clone so each spawned task can own one.
pub trait InspectionApi: Clone + Send + Sync + 'static {
    /// Fetches the selectable vehicles, in display order.
    fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Vehicle>, ApiError>> + Send;

    /// Submits a completed check.
    fn submit_check(
        &self,
        check: &Check,
    ) -> impl Future<Output = Result<CheckReceipt, ApiError>> + Send;
}

/// HTTP client for the inspection backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with the configured base URL and request timeout.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vehcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Reads the body of a success response, or turns an error response into [`ApiError`].
    async fn read(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, len = body.len(), "response received");
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(decode_error(status.as_u16(), &body))
        }
    }
}

impl InspectionApi for ApiClient {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let url = self.url("vehicles");
        debug!(%url, "loading vehicles");
        let response = self.http.get(&url).send().await?;
        let body = Self::read(response).await?;
        let vehicles: Vec<Vehicle> = decode_success(&body)?;
        info!(count = vehicles.len(), "vehicles loaded");
        Ok(vehicles)
    }

    async fn submit_check(&self, check: &Check) -> Result<CheckReceipt, ApiError> {
        let url = self.url("checks");
        info!(vehicle_id = %check.vehicle_id, %url, "submitting check");
        let response = self.http.post(&url).json(check).send().await?;
        let body = Self::read(response).await?;
        decode_success(&body)
    }
}
