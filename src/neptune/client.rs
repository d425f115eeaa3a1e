//! Neptune backend HTTP client

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::api;
use crate::error::{NeptuneError, Result};
use crate::neptune::credentials::ApiToken;
use crate::neptune::retry::RetryPolicy;

/// Response of the token exchange endpoint
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AccessTokenResponse {
    access_token: String,
}

/// Neptune backend API client
pub struct NeptuneClient {
    client: Client,
    token: ApiToken,
    /// API address override (for `--api-url` and mock servers)
    api_address_override: Option<String>,
    /// Bearer token obtained by `login`
    access_token: Option<String>,
    retry: RetryPolicy,
}

impl NeptuneClient {
    /// Create a new client for the address embedded in the token
    pub fn new(token: ApiToken) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_address_override: None,
            access_token: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a client talking to `api_address` instead of the token's address
    pub fn with_api_address(token: ApiToken, api_address: String) -> Self {
        let mut client = Self::new(token);
        client.api_address_override = Some(api_address.trim_end_matches('/').to_string());
        client
    }

    /// Replace the retry policy used for every request
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Web app address used in user-facing links
    pub fn app_url(&self) -> &str {
        self.token.app_url()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        let address = self
            .api_address_override
            .as_deref()
            .unwrap_or_else(|| self.token.api_address());
        format!("{}{}", address, api::BASE_PATH)
    }

    /// Add authentication headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(access_token) => builder.bearer_auth(access_token),
            None => builder.header(api::API_TOKEN_HEADER, self.token.raw()),
        }
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    /// Create a DELETE request builder with standard headers
    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.delete(url))
    }

    /// Exchange the API token for an access token used by later requests
    pub async fn login(&mut self) -> Result<()> {
        let url = format!("{}/{}", self.base_url(), api::OAUTH_TOKEN);
        debug!("Exchanging API token at {}", url);

        let this = &*self;
        let response: AccessTokenResponse = this
            .retry
            .execute(move || {
                let request = this.get(&url);
                async move {
                    let response = request.send().await?;
                    let response = Self::check_status(response, "exchange API token").await?;
                    Self::parse_json(response).await
                }
            })
            .await?;

        self.access_token = Some(response.access_token);
        debug!("Obtained access token");
        Ok(())
    }

    /// Map a non-success response to `NeptuneError::Api`
    ///
    /// Uses the backend's `message` field when the body carries one.
    pub(crate) async fn check_status(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string))
            .unwrap_or(body);

        let message = if detail.trim().is_empty() {
            format!("Failed to {}", action)
        } else {
            format!("Failed to {}: {}", action, detail.trim())
        };

        Err(NeptuneError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a JSON body; decoding failures are not retried
    pub(crate) async fn parse_json<T>(response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Parse a JSON body, treating an empty body as `T::default()`
    pub(crate) async fn parse_json_or_default<T>(response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
impl NeptuneClient {
    /// Create a test client against a mock server, retrying without delay
    pub fn test_client(base_url: &str) -> Self {
        Self::with_api_address(test_token(base_url), base_url.to_string())
            .with_retry_policy(RetryPolicy::immediate())
    }

    /// Test client that skips the token exchange
    pub fn authenticated_test_client(base_url: &str) -> Self {
        let mut client = Self::test_client(base_url);
        client.access_token = Some("test-access-token".to_string());
        client
    }
}

#[cfg(test)]
pub(crate) fn test_token(api_address: &str) -> ApiToken {
    use base64::Engine;

    let json = serde_json::json!({
        "api_address": api_address,
        "api_url": "https://app.example.neptune.ai",
        "api_key": "test-key"
    });
    let raw = base64::engine::general_purpose::STANDARD.encode(json.to_string());
    ApiToken::parse(&raw).unwrap()
}
