use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{
    wire::{empty_as_null, null_as_default},
    MlApiClient, Result,
};

const OUTLIERS_PATH: &str = "/manage/api/v1/outliers";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierAlgorithmConfig {
    /// DBSCAN neighbourhood radius. Responses may spell it `eps`.
    #[serde(alias = "eps")]
    pub epsilon: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierAlgorithm {
    pub name: String,
    /// Used by MAD.
    pub sensitivity: f64,
    /// Used by DBSCAN.
    pub config: Option<OutlierAlgorithmConfig>,
}

/// Outlier detector over a set of series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlierDetector {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub metric: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub grafana_url: String,
    pub datasource_id: u64,
    pub datasource_uid: String,
    pub datasource_type: String,
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub query_params: Map<String, JsonValue>,
    /// Data resolution in seconds.
    pub interval: u64,
    pub algorithm: OutlierAlgorithm,
}

impl MlApiClient {
    pub async fn new_outlier_detector(&self, outlier: &OutlierDetector) -> Result<OutlierDetector> {
        self.send_data(Method::POST, OUTLIERS_PATH, outlier).await
    }

    pub async fn outlier_detectors(&self) -> Result<Vec<OutlierDetector>> {
        self.fetch_data(Method::GET, OUTLIERS_PATH).await
    }

    pub async fn outlier_detector(&self, id: &str) -> Result<OutlierDetector> {
        self.fetch_data(Method::GET, &format!("{OUTLIERS_PATH}/{id}"))
            .await
    }

    /// Updates an outlier detector. The ID is taken from `outlier.id`.
    pub async fn update_outlier_detector(
        &self,
        mut outlier: OutlierDetector,
    ) -> Result<OutlierDetector> {
        let id = std::mem::take(&mut outlier.id);
        self.send_data(Method::POST, &format!("{OUTLIERS_PATH}/{id}"), &outlier)
            .await
    }

    pub async fn delete_outlier_detector(&self, id: &str) -> Result<()> {
        self.request_without_response(
            Method::DELETE,
            &format!("{OUTLIERS_PATH}/{id}"),
            None,
            None,
        )
        .await
    }
}
