use std::fmt;
use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;

use crate::{
    decode::{check_status, decode_json, should_retry_status, RawResponse},
    request::{build_request, endpoint, parse_base_url, QueryParams},
    BasicAuth, ClientConfig, ClientOptions, Envelope, MlApiError, Result,
};

#[derive(Clone)]
/// HTTP client for the machine learning management API.
///
/// All state is fixed at construction, so a client can be cloned and shared
/// across tasks freely.
pub struct MlApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
    options: ClientOptions,
}

impl fmt::Debug for MlApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlApiClient")
            .field("base_url", &redacted_url(&self.base_url).as_str())
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl MlApiClient {
    /// Creates a client for `base_url`.
    ///
    /// Fails with [`MlApiError::InvalidUrl`] when the URL cannot be parsed.
    /// Basic-auth credentials are embedded in the URL here, once.
    pub fn new(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        let ClientConfig {
            bearer_token,
            basic_auth,
            http_client,
            options,
        } = config;

        let base_url = parse_base_url(base_url.as_ref(), basic_auth.as_ref())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(base_url = %redacted_url(&base_url), "created ml api client");

        Ok(Self {
            http: http_client.unwrap_or_default(),
            base_url,
            bearer_token,
            options,
        })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `MLAPI_URL`: base URL of the API (required)
    /// - `MLAPI_TOKEN`: bearer token
    /// - `MLAPI_USERNAME` / `MLAPI_PASSWORD`: basic-auth credentials, both or neither
    /// - `MLAPI_RETRIES`: number of retries after the first attempt
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mlapi_http::MlApiClient;
    ///
    /// let client = MlApiClient::from_env().expect("missing MLAPI_* env vars");
    /// ```
    pub fn from_env() -> Result<Self> {
        let url = env_var("MLAPI_URL").ok_or_else(|| {
            MlApiError::Config("missing MLAPI_URL environment variable".to_owned())
        })?;

        let basic_auth = match (env_var("MLAPI_USERNAME"), env_var("MLAPI_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicAuth::new(username, password)),
            (None, None) => None,
            _ => {
                return Err(MlApiError::Config(
                    "MLAPI_USERNAME and MLAPI_PASSWORD must be set together".to_owned(),
                ))
            }
        };

        let mut options = ClientOptions::default();
        if let Some(retries) = env_var("MLAPI_RETRIES") {
            options.max_retries = retries.parse().map_err(|_| {
                MlApiError::Config(format!(
                    "MLAPI_RETRIES must be a non-negative integer, got '{retries}'"
                ))
            })?;
        }

        Self::new(
            url,
            ClientConfig {
                bearer_token: env_var("MLAPI_TOKEN"),
                basic_auth,
                http_client: None,
                options,
            },
        )
    }

    /// Applies client options such as retry count and delay.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Sends a request and decodes the JSON response body into `T`.
    ///
    /// Server errors (5xx), `429 Too Many Requests` and transport failures
    /// are retried up to [`ClientOptions::max_retries`] times with a fixed
    /// delay. Any status >= 400 on the final attempt becomes
    /// [`MlApiError::Api`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&[u8]>,
    ) -> Result<T> {
        let body = self.send_checked(method, path, query, body).await?;
        decode_json(&body)
    }

    /// Like [`MlApiClient::request`], but ignores the response body.
    pub async fn request_without_response(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&[u8]>,
    ) -> Result<()> {
        self.send_checked(method, path, query, body).await?;
        Ok(())
    }

    /// Sends `payload` as JSON and returns the `data` field of the envelope.
    pub(crate) async fn send_data<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let body = serde_json::to_vec(payload)
            .map_err(|err| MlApiError::Encode(format!("invalid request payload: {err}")))?;
        let envelope: Envelope<T> = self
            .request(method, path, None, Some(body.as_slice()))
            .await?;
        Ok(envelope.data)
    }

    /// Sends a bodyless request and returns the `data` field of the envelope.
    pub(crate) async fn fetch_data<T>(&self, method: Method, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let envelope: Envelope<T> = self.request(method, path, None, None).await?;
        Ok(envelope.data)
    }

    async fn send_checked(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let response = self.send_with_retry(method, path, query, body).await?;
        check_status(response)
    }

    async fn send_with_retry(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&[u8]>,
    ) -> Result<RawResponse> {
        let url = endpoint(&self.base_url, path, query);
        let mut attempt = 0usize;
        loop {
            let outcome = self.send_once(method.clone(), url.clone(), body).await;

            let retryable = match &outcome {
                Ok(response) => should_retry_status(response.status),
                Err(_) => true,
            };
            if !retryable || attempt >= self.options.max_retries {
                return outcome.map_err(MlApiError::Transport);
            }

            #[cfg(feature = "tracing")]
            log_retryable(attempt, &outcome);

            attempt += 1;
            self.wait_before_retry().await;
        }
    }

    /// One build-send-read cycle. The request is rebuilt from `body` each time.
    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
    ) -> reqwest::Result<RawResponse> {
        let timeout = self.options.timeout_ms.map(Duration::from_millis);
        let request = build_request(
            &self.http,
            method,
            url,
            self.bearer_token.as_deref(),
            body,
            timeout,
        )?;

        let response = self.http.execute(request).await?;
        let status: StatusCode = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }

    /// Waits the fixed retry delay before the next attempt.
    async fn wait_before_retry(&self) {
        let delay_ms = self.options.retry_delay_ms;

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying ml api request after {} ms", delay_ms);

        sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(feature = "tracing")]
fn log_retryable(attempt: usize, outcome: &reqwest::Result<RawResponse>) {
    match outcome {
        Ok(response) => tracing::debug!(
            attempt,
            status = response.status.as_u16(),
            "retryable status from ml api"
        ),
        Err(err) => tracing::debug!(attempt, error = %err, "ml api transport error"),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn redacted_url(url: &Url) -> Url {
    let mut url = url.clone();
    if url.password().is_some() {
        // Only fails for URLs without a host, which never carry a password.
        let _ = url.set_password(Some("redacted"));
    }
    url
}
