/// Configures retry and timeout behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Number of retries after the initial attempt.
    pub max_retries: usize,
    /// Fixed delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// Optional per-attempt timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_delay_ms: 5_000,
            timeout_ms: None,
        }
    }
}

/// HTTP basic-auth credentials, sent through the base URL user-info.
#[derive(Clone, Eq, PartialEq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client construction inputs.
///
/// Both credentials may be set at once; neither is preferred over the other.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Sent as `Authorization: Bearer <token>` on every attempt.
    pub bearer_token: Option<String>,
    /// Embedded in the base URL once, at construction.
    pub basic_auth: Option<BasicAuth>,
    /// Transport to send requests with. A default client is built when absent.
    pub http_client: Option<reqwest::Client>,
    pub options: ClientOptions,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .field("basic_auth", &self.basic_auth)
            .field("http_client", &self.http_client.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl ClientConfig {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            basic_auth: Some(BasicAuth::new(username, password)),
            ..Self::default()
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http_client = Some(http);
        self
    }

    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{BasicAuth, ClientConfig, ClientOptions};

    #[test]
    fn default_options_use_fixed_five_second_delay_without_retries() {
        let opts = ClientOptions::default();
        assert_eq!(opts.max_retries, 0);
        assert_eq!(opts.retry_delay_ms, 5_000);
        assert_eq!(opts.timeout_ms, None);
    }

    #[test]
    fn basic_auth_debug_hides_password() {
        let debug = format!("{:?}", BasicAuth::new("hello", "world"));
        assert!(debug.contains("hello"));
        assert!(!debug.contains("world"));
    }

    #[test]
    fn config_debug_hides_bearer_token() {
        let debug = format!("{:?}", ClientConfig::bearer("secret-token"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-token"));
    }
}
