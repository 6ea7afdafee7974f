//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::SourceError;

/// Default request timeout for data-source queries.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A GET request with query parameters, headers and optional basic auth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<(String, String)>,
}

impl HttpRequest {
    /// Creates a GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a header.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attaches HTTP basic credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error. Non-success statuses are
    /// errors; 401 and 403 map to [`SourceError::Auth`].
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, SourceError>;

    /// Performs a GET request and parses the body as JSON.
    fn get_json(&self, request: &HttpRequest) -> Result<serde_json::Value, SourceError> {
        let body = self.get(request)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeout.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skyradar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, SourceError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((username, password)) = &request.basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder
            .send()
            .map_err(|e| SourceError::Http(format!("Request failed: {}", e)))?;

        // Check HTTP status
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Auth {
                source_name: request.url.clone(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        // Read response body
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| SourceError::Http(format!("Failed to read response: {}", e)))
    }
}
