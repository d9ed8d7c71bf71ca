/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum MlApiError {
    /// The base URL could not be parsed or cannot carry a request path.
    #[error("invalid base url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network, timeout or body-read error from `reqwest` on the final attempt.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// HTTP status >= 400 with the raw response body.
    ///
    /// The rendered message is matched on by callers and must stay
    /// `status: <code>, body: <body>`.
    #[error("status: {status}, body: {body}")]
    Api { status: u16, body: String },
    /// Request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response body is not valid JSON or does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl MlApiError {
    /// HTTP status code of an [`MlApiError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
