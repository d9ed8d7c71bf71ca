use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{MlApiError, Result};

/// Status and body of the attempt that ended the retry loop.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Retry only on server errors and rate limiting; every other status is final.
pub(crate) fn should_retry_status(status: StatusCode) -> bool {
    status.as_u16() >= 500 || status == StatusCode::TOO_MANY_REQUESTS
}

/// Turns a status >= 400 into [`MlApiError::Api`], passing the body through otherwise.
pub(crate) fn check_status(response: RawResponse) -> Result<Vec<u8>> {
    if response.status.as_u16() >= 400 {
        return Err(MlApiError::Api {
            status: response.status.as_u16(),
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    Ok(response.body)
}

pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        MlApiError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            String::from_utf8_lossy(body)
        ))
    })
}
