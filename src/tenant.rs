use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{MlApiClient, Result};

/// Per-tenant series limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantInfo {
    pub max_series_per_job: u64,
    pub max_series_per_outlier: u64,
}

impl MlApiClient {
    /// Returns the forecast and outlier limits for the authenticated tenant.
    pub async fn tenant_info(&self) -> Result<TenantInfo> {
        self.fetch_data(Method::GET, "/tenant/api/v1/info").await
    }
}
