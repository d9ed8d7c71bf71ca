//! `mlapi-http` is an async HTTP client for the machine learning management API.
//!
//! Every resource method goes through one request core:
//! - [`MlApiClient::request`] decodes the JSON response into a caller type
//! - [`MlApiClient::request_without_response`] only checks the status
//!
//! Server errors, `429` responses and transport failures are retried with a
//! fixed delay, see [`ClientOptions`].

mod alert;
mod client;
mod decode;
mod error;
mod holiday;
mod job;
mod options;
mod outlier;
mod request;
mod tenant;
mod wire;

pub use alert::{Alert, AnomalyCondition, NoDataState};
pub use client::MlApiClient;
pub use error::MlApiError;
pub use holiday::{CustomPeriod, Holiday};
pub use job::{ForecastParams, ForecastRequest, Job};
pub use options::{BasicAuth, ClientConfig, ClientOptions};
pub use outlier::{OutlierAlgorithm, OutlierAlgorithmConfig, OutlierDetector};
pub use request::QueryParams;
pub use tenant::TenantInfo;
pub use wire::Envelope;

pub use reqwest::{Method, StatusCode};

pub type Result<T> = std::result::Result<T, MlApiError>;
