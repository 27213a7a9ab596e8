//! HTTP-based `RankedFeedProvider` for the backend procedure endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tidyfeed_core::{RankedFeedError, RankedFeedProvider, RankedFeedQuery, RankedFeedRow};

use crate::rpc::{RpcArguments, RpcErrorBody};

/// Default user agent for procedure requests.
pub const DEFAULT_USER_AGENT: &str = "tidyfeed-data/0.1";

/// Procedure name used when the caller does not override it.
pub const DEFAULT_RPC_FUNCTION: &str = "ranked_content_feed";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for [`HttpRankedFeedProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration for [`HttpRankedFeedProvider`].
#[derive(Debug, Clone)]
pub struct HttpRankedFeedProviderConfig {
    /// Base URL of the backend (e.g. `"https://backend.example"`).
    pub base_url: String,
    /// Name of the remote procedure under `/rpc/`.
    pub function: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Bearer credential attached to every request, when the backend
    /// requires one.
    pub bearer_token: Option<String>,
}

impl Default for HttpRankedFeedProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            function: DEFAULT_RPC_FUNCTION.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            bearer_token: None,
        }
    }
}

impl HttpRankedFeedProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the remote procedure name.
    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Attach a bearer credential.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Calls the backend's ranked-feed procedure over HTTP.
///
/// The provider is fully asynchronous and reuses one connection pool
/// across calls. It never retries; retry policy (the relaxed cold-start
/// attempt) belongs to the feed ranker.
#[derive(Debug)]
pub struct HttpRankedFeedProvider {
    client: Client,
    config: HttpRankedFeedProviderConfig,
}

impl HttpRankedFeedProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRankedFeedProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpRankedFeedProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Build the procedure URL.
    ///
    /// The URL format is `{base_url}/rpc/{function}`.
    fn rpc_url(&self) -> String {
        format!(
            "{}/rpc/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.function
        )
    }

    /// Classify a transport-level failure.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RankedFeedError {
        if error.is_timeout() {
            return RankedFeedError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RankedFeedError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        RankedFeedError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Classify a non-success response, preferring the backend's own
    /// error body when it decodes.
    fn convert_error_body(url: &str, status: u16, body: &str) -> RankedFeedError {
        let parsed: Option<RpcErrorBody> = serde_json::from_str(body).ok();
        match parsed {
            Some(RpcErrorBody {
                code,
                message: Some(message),
                ..
            }) => RankedFeedError::Service {
                code: code.unwrap_or_else(|| status.to_string()),
                message,
            },
            _ => RankedFeedError::Http {
                url: url.to_owned(),
                status,
                message: body.trim().to_owned(),
            },
        }
    }

    /// Post the query and decode the ordered row array.
    async fn fetch_rows(
        &self,
        query: &RankedFeedQuery,
    ) -> Result<Vec<RankedFeedRow>, RankedFeedError> {
        let url = self.rpc_url();
        let mut request = self
            .client
            .post(&url)
            .json(&RpcArguments::from(query));
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::convert_error_body(&url, status.as_u16(), &body));
        }

        response
            .json::<Vec<RankedFeedRow>>()
            .await
            .map_err(|err| RankedFeedError::Decode {
                message: err.to_string(),
            })
    }
}

#[async_trait]
impl RankedFeedProvider for HttpRankedFeedProvider {
    async fn ranked_feed(
        &self,
        query: &RankedFeedQuery,
    ) -> Result<Vec<RankedFeedRow>, RankedFeedError> {
        log::debug!(
            "requesting ranked feed around ({}, {}) within {} km (unverified: {})",
            query.latitude,
            query.longitude,
            query.radius_km,
            query.include_unverified
        );
        self.fetch_rows(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn provider_for(base_url: &str) -> HttpRankedFeedProvider {
        HttpRankedFeedProvider::new(base_url).expect("provider should build")
    }

    #[rstest]
    fn rpc_url_joins_base_and_function() {
        let provider = provider_for("https://backend.example");
        assert_eq!(
            provider.rpc_url(),
            "https://backend.example/rpc/ranked_content_feed"
        );
    }

    #[rstest]
    fn rpc_url_strips_trailing_slash() {
        let provider = provider_for("https://backend.example/");
        assert!(!provider.rpc_url().contains("//rpc"));
    }

    #[rstest]
    fn rpc_url_honours_custom_function() {
        let config = HttpRankedFeedProviderConfig::new("https://backend.example")
            .with_function("feed_v2");
        let provider =
            HttpRankedFeedProvider::with_config(config).expect("provider should build");
        assert_eq!(provider.rpc_url(), "https://backend.example/rpc/feed_v2");
    }

    #[rstest]
    fn error_body_with_message_maps_to_service_error() {
        let err = HttpRankedFeedProvider::convert_error_body(
            "https://backend.example/rpc/ranked_content_feed",
            404,
            r#"{"code": "PGRST202", "message": "function not found"}"#,
        );
        match err {
            RankedFeedError::Service { code, message } => {
                assert_eq!(code, "PGRST202");
                assert_eq!(message, "function not found");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[rstest]
    fn undecodable_error_body_maps_to_http_error() {
        let err = HttpRankedFeedProvider::convert_error_body(
            "https://backend.example/rpc/ranked_content_feed",
            502,
            "bad gateway",
        );
        assert!(matches!(err, RankedFeedError::Http { status: 502, .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpRankedFeedProviderConfig::new("https://backend.example")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("feed-test/1.0")
            .with_bearer_token("secret");
        assert_eq!(config.base_url, "https://backend.example");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "feed-test/1.0");
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
    }
}
