use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    wire::{empty_as_null, null_as_default},
    MlApiClient, Result,
};

/// Which anomalies a forecast alert fires on.
///
/// Not supported for outlier alerts. Unknown values fail to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCondition {
    /// Actual value above the expected range.
    High,
    /// Actual value below the expected range.
    Low,
    /// Either direction.
    Any,
}

/// Alert state when the query returns no data. `Unset` behaves like `Ok`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoDataState {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "OK")]
    Ok,
    Alerting,
    NoData,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// At most 190 characters.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_condition: Option<AnomalyCondition>,
    /// Prometheus-style `for` clause, e.g. `5m`. Not validated client-side.
    #[serde(rename = "for")]
    pub for_duration: String,
    /// Fraction of anomalous points in the window, e.g. `>0.7`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub threshold: String,
    /// Range to average over, at most `12h`. Not validated client-side.
    pub window: String,
    /// Sent as `null` when empty.
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    /// Sent as `null` when empty.
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
    #[serde(rename = "noDataCondition", deserialize_with = "null_as_default")]
    pub no_data_state: NoDataState,
    /// Experimental custom query for the alert.
    pub custom_query: String,
    /// Passed to the alert rule unchanged.
    pub notification_settings: Option<JsonValue>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sync_error: String,
}

impl Default for Alert {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            anomaly_condition: None,
            for_duration: "0s".to_owned(),
            threshold: String::new(),
            window: "0s".to_owned(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            no_data_state: NoDataState::Unset,
            custom_query: String::new(),
            notification_settings: None,
            sync_error: String::new(),
        }
    }
}

/// Owner of a set of alerts.
#[derive(Clone, Copy, Debug)]
enum AlertParent<'a> {
    Job(&'a str),
    Outlier(&'a str),
}

impl AlertParent<'_> {
    fn alerts_path(self) -> String {
        match self {
            Self::Job(id) => format!("/manage/api/v1/jobs/{id}/alerts"),
            Self::Outlier(id) => format!("/manage/api/v1/outliers/{id}/alerts"),
        }
    }

    fn alert_path(self, alert_id: &str) -> String {
        format!("{}/{alert_id}", self.alerts_path())
    }
}

impl MlApiClient {
    pub async fn new_job_alert(&self, job_id: &str, alert: &Alert) -> Result<Alert> {
        self.new_alert(AlertParent::Job(job_id), alert).await
    }

    pub async fn job_alerts(&self, job_id: &str) -> Result<Vec<Alert>> {
        self.alerts(AlertParent::Job(job_id)).await
    }

    pub async fn job_alert(&self, job_id: &str, alert_id: &str) -> Result<Alert> {
        self.alert(AlertParent::Job(job_id), alert_id).await
    }

    /// Updates a job alert. The ID is taken from `alert.id`.
    pub async fn update_job_alert(&self, job_id: &str, alert: Alert) -> Result<Alert> {
        self.update_alert(AlertParent::Job(job_id), alert).await
    }

    pub async fn delete_job_alert(&self, job_id: &str, alert_id: &str) -> Result<()> {
        self.delete_alert(AlertParent::Job(job_id), alert_id).await
    }

    pub async fn new_outlier_alert(&self, outlier_id: &str, alert: &Alert) -> Result<Alert> {
        self.new_alert(AlertParent::Outlier(outlier_id), alert).await
    }

    pub async fn outlier_alerts(&self, outlier_id: &str) -> Result<Vec<Alert>> {
        self.alerts(AlertParent::Outlier(outlier_id)).await
    }

    pub async fn outlier_alert(&self, outlier_id: &str, alert_id: &str) -> Result<Alert> {
        self.alert(AlertParent::Outlier(outlier_id), alert_id).await
    }

    /// Updates an outlier alert. The ID is taken from `alert.id`.
    pub async fn update_outlier_alert(&self, outlier_id: &str, alert: Alert) -> Result<Alert> {
        self.update_alert(AlertParent::Outlier(outlier_id), alert).await
    }

    pub async fn delete_outlier_alert(&self, outlier_id: &str, alert_id: &str) -> Result<()> {
        self.delete_alert(AlertParent::Outlier(outlier_id), alert_id)
            .await
    }

    async fn new_alert(&self, parent: AlertParent<'_>, alert: &Alert) -> Result<Alert> {
        self.send_data(Method::POST, &parent.alerts_path(), alert).await
    }

    async fn alerts(&self, parent: AlertParent<'_>) -> Result<Vec<Alert>> {
        self.fetch_data(Method::GET, &parent.alerts_path()).await
    }

    async fn alert(&self, parent: AlertParent<'_>, alert_id: &str) -> Result<Alert> {
        self.fetch_data(Method::GET, &parent.alert_path(alert_id))
            .await
    }

    async fn update_alert(&self, parent: AlertParent<'_>, mut alert: Alert) -> Result<Alert> {
        let alert_id = std::mem::take(&mut alert.id);
        self.send_data(Method::POST, &parent.alert_path(&alert_id), &alert)
            .await
    }

    async fn delete_alert(&self, parent: AlertParent<'_>, alert_id: &str) -> Result<()> {
        self.request_without_response(Method::DELETE, &parent.alert_path(alert_id), None, None)
            .await
    }
}
