use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{header, Method, Url};

use crate::{BasicAuth, MlApiError, Result};

/// Query string parameters, encoded in key order.
pub type QueryParams = BTreeMap<String, String>;

/// Parses the base URL and folds basic-auth credentials into its user-info.
pub(crate) fn parse_base_url(raw: &str, basic_auth: Option<&BasicAuth>) -> Result<Url> {
    let invalid = |reason: &str| MlApiError::InvalidUrl {
        url: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(&err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot carry a request path"));
    }

    if let Some(auth) = basic_auth {
        url.set_username(&auth.username)
            .map_err(|()| invalid("url cannot carry credentials"))?;
        url.set_password(Some(auth.password.as_str()))
            .map_err(|()| invalid("url cannot carry credentials"))?;
    }

    Ok(url)
}

/// Joins two paths as slash-separated segments.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment and
/// the result is always rooted without a trailing slash.
pub(crate) fn join_path(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Resolves `path` and `query` against the base URL.
///
/// Any query already present on the base URL is replaced.
pub(crate) fn endpoint(base: &Url, path: &str, query: Option<&QueryParams>) -> Url {
    let mut url = base.clone();
    let joined = join_path(base.path(), path);
    url.set_path(&joined);
    url.set_query(None);

    if let Some(query) = query.filter(|query| !query.is_empty()) {
        url.query_pairs_mut().extend_pairs(query.iter());
    }
    url
}

/// Builds one outbound attempt.
///
/// Called once per attempt so the body is supplied fresh every time.
pub(crate) fn build_request(
    http: &reqwest::Client,
    method: Method,
    url: Url,
    bearer_token: Option<&str>,
    body: Option<&[u8]>,
    timeout: Option<Duration>,
) -> reqwest::Result<reqwest::Request> {
    let mut builder = http
        .request(method, url)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = bearer_token.filter(|token| !token.is_empty()) {
        builder = builder.bearer_auth(token);
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(body) = body {
        builder = builder.body(body.to_vec());
    }

    builder.build()
}
