use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{wire::null_as_default, MlApiClient, Result};

const HOLIDAYS_PATH: &str = "/manage/api/v1/holidays";

/// Time periods during which a series behaves differently than normal.
///
/// Either `ical_url` together with `ical_time_zone`, or `custom_periods`,
/// must be provided. Holidays are linked to jobs through `jobs` here,
/// through [`Job::holidays`](crate::Job::holidays), or with
/// [`MlApiClient::link_holidays_to_job`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Holiday {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// iCal file containing every occurrence of the holiday.
    #[serde(rename = "iCalUrl", skip_serializing_if = "Option::is_none")]
    pub ical_url: Option<String>,
    /// Time zone for all-day events in the iCal file.
    #[serde(rename = "iCalTimeZone", skip_serializing_if = "Option::is_none")]
    pub ical_time_zone: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub custom_periods: Vec<CustomPeriod>,
    /// IDs or names of jobs using this holiday. Responses always carry IDs.
    #[serde(deserialize_with = "null_as_default")]
    pub jobs: Vec<String>,
}

/// One explicitly specified holiday period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPeriod {
    /// Optional; the server omits it when unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Inclusive.
    pub start_time: DateTime<Utc>,
    /// Exclusive.
    pub end_time: DateTime<Utc>,
}

impl MlApiClient {
    pub async fn new_holiday(&self, holiday: &Holiday) -> Result<Holiday> {
        self.send_data(Method::POST, HOLIDAYS_PATH, holiday).await
    }

    pub async fn holidays(&self) -> Result<Vec<Holiday>> {
        self.fetch_data(Method::GET, HOLIDAYS_PATH).await
    }

    pub async fn holiday(&self, id: &str) -> Result<Holiday> {
        self.fetch_data(Method::GET, &format!("{HOLIDAYS_PATH}/{id}"))
            .await
    }

    /// Updates a holiday. The ID is taken from `holiday.id`.
    pub async fn update_holiday(&self, mut holiday: Holiday) -> Result<Holiday> {
        let id = std::mem::take(&mut holiday.id);
        self.send_data(Method::POST, &format!("{HOLIDAYS_PATH}/{id}"), &holiday)
            .await
    }

    pub async fn delete_holiday(&self, id: &str) -> Result<()> {
        self.request_without_response(
            Method::DELETE,
            &format!("{HOLIDAYS_PATH}/{id}"),
            None,
            None,
        )
        .await
    }
}
