use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{
    wire::{empty_as_null, null_as_default},
    MlApiClient, MlApiError, Result,
};

const JOBS_PATH: &str = "/manage/api/v1/jobs";
const SYSTEM_JOBS_PATH: &str = "/manage/api/v1/system-jobs";
const FORECAST_PATH: &str = "/predict/api/v1/forecast";

/// A forecasting job that will be trained on a schedule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    /// Metric name used to query the job; must be a valid Prometheus metric name.
    pub metric: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Full URL of the Grafana instance, e.g. `https://myinstance.grafana.net/`.
    pub grafana_url: String,
    pub datasource_id: u64,
    pub datasource_uid: String,
    pub datasource_type: String,
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub custom_labels: Map<String, JsonValue>,
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub query_params: Map<String, JsonValue>,
    /// Data resolution in seconds.
    pub interval: u64,
    /// Lookback window to train on, in seconds.
    pub training_window: u64,
    /// How often to re-train, in seconds.
    pub training_frequency: u64,
    pub algorithm: String,
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub hyper_params: Map<String, JsonValue>,
    /// IDs or names of linked holidays. Responses always carry IDs.
    ///
    /// Sent as `null` when empty, leaving existing links untouched.
    #[serde(serialize_with = "empty_as_null", deserialize_with = "null_as_default")]
    pub holidays: Vec<String>,
    /// Owner of a system job. Required for system jobs, empty otherwise.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub managed_by: String,
}

/// Time range of an ephemeral forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: u64,
}

/// Ephemeral forecast for a job definition with a single series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub job: Job,
    pub forecast_params: ForecastParams,
}

impl MlApiClient {
    /// Creates a job and schedules its first training.
    pub async fn new_job(&self, job: &Job) -> Result<Job> {
        self.send_data(Method::POST, JOBS_PATH, job).await
    }

    /// Creates a system job. `managed_by` must be set.
    pub async fn new_system_job(&self, job: &Job) -> Result<Job> {
        self.send_data(Method::POST, SYSTEM_JOBS_PATH, job).await
    }

    pub async fn jobs(&self) -> Result<Vec<Job>> {
        self.fetch_data(Method::GET, JOBS_PATH).await
    }

    pub async fn job(&self, id: &str) -> Result<Job> {
        self.fetch_data(Method::GET, &format!("{JOBS_PATH}/{id}")).await
    }

    /// Updates a job and schedules a new training.
    ///
    /// The ID is taken from `job.id` and sent only in the path.
    pub async fn update_job(&self, job: Job) -> Result<Job> {
        self.update_job_at(JOBS_PATH, job).await
    }

    /// Updates a system job. Also turns a user job into a system job.
    pub async fn update_system_job(&self, job: Job) -> Result<Job> {
        self.update_job_at(SYSTEM_JOBS_PATH, job).await
    }

    pub async fn delete_job(&self, id: &str) -> Result<()> {
        self.request_without_response(Method::DELETE, &format!("{JOBS_PATH}/{id}"), None, None)
            .await
    }

    pub async fn delete_system_job(&self, id: &str) -> Result<()> {
        self.request_without_response(
            Method::DELETE,
            &format!("{SYSTEM_JOBS_PATH}/{id}"),
            None,
            None,
        )
        .await
    }

    /// Replaces the set of holidays linked to a job.
    pub async fn link_holidays_to_job(&self, job_id: &str, holiday_ids: &[String]) -> Result<Job> {
        // Stays an array when empty, unlike `Job::holidays`.
        let mut payload = serde_json::to_value(Job::default())
            .map_err(|err| MlApiError::Encode(format!("invalid request payload: {err}")))?;
        payload["holidays"] = JsonValue::from(holiday_ids.to_vec());
        self.send_data(Method::PUT, &format!("{JOBS_PATH}/{job_id}/holidays"), &payload)
            .await
    }

    /// Runs a forecast without creating a job.
    ///
    /// Meant for exploration; the first call may be slow and results are
    /// cached server-side. The returned value is the raw query data response.
    pub async fn forecast_job(&self, request: &ForecastRequest) -> Result<JsonValue> {
        self.send_data(Method::POST, FORECAST_PATH, request).await
    }

    async fn update_job_at(&self, base: &str, mut job: Job) -> Result<Job> {
        let id = std::mem::take(&mut job.id);
        self.send_data(Method::POST, &format!("{base}/{id}"), &job).await
    }
}
