//! HTTP client for the HockeyApp REST API.
//!
//! Handles token authentication, custom headers, timeout management,
//! exponential backoff retry, and the request/response lifecycle.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use hockey_core::config::{AppConfig, ServerConfig};
use hockey_core::constants;
use hockey_core::error::{HockeyError, HockeyResult};

use crate::response::{QueryParams, RecordEnvelope};

/// Retry configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Base delay between retries (doubles each attempt).
    pub base_delay: Duration,
    /// Maximum delay cap.
    pub max_delay: Duration,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(4),
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

/// HTTP client for communicating with the HockeyApp server.
///
/// Wraps reqwest::Client with the API token header, custom headers, retry
/// logic, and error classification. Endpoint methods live in
/// [`crate::endpoints`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL for the API (e.g. "https://rink.hockeyapp.net/api/2").
    api_root: String,
    /// API token sent with every request.
    api_token: String,
    /// Default request timeout.
    timeout: Duration,
    /// Timeout for binary uploads.
    upload_timeout: Duration,
    /// Custom headers from server config.
    custom_headers: Vec<(String, String)>,
    /// Retry configuration.
    retry_config: RetryConfig,
}

impl ApiClient {
    /// Create a new ApiClient from server configuration.
    pub fn new(config: &ServerConfig) -> HockeyResult<Self> {
        let address = AppConfig::sanitize_server_address(&config.address);
        if address.is_empty() {
            return Err(HockeyError::MissingConfig("server.address".into()));
        }

        let timeout = Duration::from_millis(config.api_timeout_ms);
        let inner = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(15))
            .pool_idle_timeout(Duration::from_secs(90))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| HockeyError::Http(format!("failed to build HTTP client: {e}")))?;

        let mut custom_headers: Vec<(String, String)> = config
            .custom_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom_headers.sort();

        Ok(Self {
            inner,
            api_root: format!("{address}/api/{}", constants::API_VERSION),
            api_token: config.api_token.clone(),
            timeout,
            upload_timeout: Duration::from_millis(config.upload_timeout_ms),
            custom_headers,
            retry_config: RetryConfig::default(),
        })
    }

    /// Set custom retry configuration.
    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Get the API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Build the full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    /// Apply the token and custom headers to a request builder.
    fn apply_headers(&self, mut builder: RequestBuilder) -> RequestBuilder {
        builder = builder.header(constants::TOKEN_HEADER, self.api_token.as_str());
        for (key, value) in &self.custom_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        query: Option<&QueryParams>,
    ) -> RequestBuilder {
        let mut builder = self.inner.request(method, url).timeout(self.timeout);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(q);
        }
        self.apply_headers(builder)
    }

    /// Execute a GET-style request with exponential backoff retry.
    async fn request_with_retry(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
    ) -> HockeyResult<Response> {
        let url = self.url(path);
        debug!("{} {}", method, path);

        let mut last_error: Option<HockeyError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                let delay = self.calculate_retry_delay(attempt - 1);
                warn!(
                    "retrying {} {} (attempt {}/{}) after {:.1}s",
                    method,
                    path,
                    attempt + 1,
                    self.retry_config.max_retries + 1,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }

            let builder = self.build_request(method.clone(), &url, query);

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    if self
                        .retry_config
                        .retryable_statuses
                        .contains(&status.as_u16())
                        && attempt < self.retry_config.max_retries
                    {
                        warn!("retryable status {} from {}", status.as_u16(), path);
                        last_error = Some(HockeyError::ServerError {
                            status: status.as_u16(),
                            message: format!("retryable status {status}"),
                        });
                        continue;
                    }

                    return Self::check_status(response).await;
                }
                Err(e) => {
                    let is_retryable = e.is_timeout() || e.is_connect();
                    let err = Self::classify_error(e);

                    if is_retryable && attempt < self.retry_config.max_retries {
                        warn!("retryable error on {}: {}", path, err);
                        last_error = Some(err);
                        continue;
                    }

                    return Err(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HockeyError::Http("max retries exceeded".into())))
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.retry_config.base_delay.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64 << attempt.min(32));
        let max_ms = self.retry_config.max_delay.as_millis() as u64;
        Duration::from_millis(delay_ms.min(max_ms))
    }

    // --- HTTP verbs ---

    /// Execute a GET request with automatic retry.
    pub async fn get(&self, path: &str, query: Option<&QueryParams>) -> HockeyResult<Response> {
        self.request_with_retry(Method::GET, path, query).await
    }

    /// Execute a DELETE request once and hand back the raw response.
    ///
    /// Neither retried nor status-checked, so every status code (401/403 and
    /// 5xx included) reaches the caller.
    pub async fn delete(&self, path: &str) -> HockeyResult<Response> {
        let url = self.url(path);
        debug!("DELETE {}", path);
        self.build_request(Method::DELETE, &url, None)
            .send()
            .await
            .map_err(Self::classify_error)
    }

    /// Execute a POST request with a multipart form (for binary uploads).
    /// Multipart forms cannot be cloned, so no automatic retry on this method.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> HockeyResult<Response> {
        let url = self.url(path);
        debug!("POST (multipart) {}", path);

        let builder = self
            .inner
            .post(&url)
            .multipart(form)
            .timeout(self.upload_timeout);
        let builder = self.apply_headers(builder);

        let response = builder.send().await.map_err(Self::classify_error)?;

        Self::check_status(response).await
    }

    // --- Response helpers ---

    /// Deserialize a response body as JSON.
    pub async fn parse_json<T: DeserializeOwned>(response: Response) -> HockeyResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| HockeyError::Serialization(format!("failed to parse response: {e}")))
    }

    /// Deserialize a mutation response body.
    pub async fn parse_record<T: DeserializeOwned>(
        response: Response,
    ) -> HockeyResult<RecordEnvelope<T>> {
        let value: serde_json::Value = Self::parse_json(response).await?;
        RecordEnvelope::from_value(value)
    }

    /// Read a response body as text.
    pub async fn response_text(response: Response) -> HockeyResult<String> {
        response
            .text()
            .await
            .map_err(|e| HockeyError::Http(format!("failed to read response body: {e}")))
    }

    /// Convenience: GET + parse JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> HockeyResult<T> {
        let resp = self.get(path, query).await?;
        Self::parse_json(resp).await
    }

    /// Map authentication and server failures to errors; everything else is
    /// left for the caller to interpret.
    async fn check_status(response: Response) -> HockeyResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HockeyError::AuthFailed(format!("server returned {status}")));
        }

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(HockeyError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }

    /// Classify a reqwest error into a HockeyError variant.
    fn classify_error(e: reqwest::Error) -> HockeyError {
        if e.is_timeout() {
            HockeyError::Timeout(e.to_string())
        } else if e.is_connect() {
            HockeyError::Http(format!("connection failed: {e}"))
        } else {
            HockeyError::Http(e.to_string())
        }
    }
}
