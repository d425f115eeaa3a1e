//! Neptune API token decoding and resolution

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use log::debug;
use serde::Deserialize;
use std::fmt;

use crate::config::credentials;
use crate::error::{NeptuneError, Result};

/// JSON document embedded in an API token
#[derive(Deserialize, Debug)]
struct TokenPayload {
    api_address: String,
    #[serde(default)]
    api_url: Option<String>,
}

/// Decoded Neptune API token
///
/// Keeps the raw token for authentication and the addresses it was issued for.
#[derive(Clone)]
pub struct ApiToken {
    raw: String,
    api_address: String,
    api_url: Option<String>,
}

impl ApiToken {
    /// Decode a base64 API token
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(NeptuneError::Credentials("token is empty".to_string()));
        }

        let decoded = STANDARD
            .decode(raw)
            .or_else(|_| URL_SAFE.decode(raw))
            .map_err(|e| NeptuneError::Credentials(format!("not valid base64 ({})", e)))?;

        let payload: TokenPayload = serde_json::from_slice(&decoded)
            .map_err(|e| NeptuneError::Credentials(format!("unexpected token payload ({})", e)))?;

        if payload.api_address.trim().is_empty() {
            return Err(NeptuneError::Credentials(
                "token does not carry an API address".to_string(),
            ));
        }

        debug!("Decoded API token for {}", payload.api_address);

        Ok(Self {
            raw: raw.to_string(),
            api_address: payload.api_address.trim_end_matches('/').to_string(),
            api_url: payload
                .api_url
                .filter(|url| !url.trim().is_empty())
                .map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    /// The token exactly as supplied (without surrounding whitespace)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// REST API address the token was issued for
    pub fn api_address(&self) -> &str {
        &self.api_address
    }

    /// Web app address used for user-facing links
    pub fn app_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(&self.api_address)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("api_address", &self.api_address)
            .field("api_url", &self.api_url)
            .field("raw", &"<redacted>")
            .finish()
    }
}

/// Token resolution with fallback logic
pub struct TokenResolver;

impl TokenResolver {
    /// Resolve token from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. NEPTUNE_API_TOKEN environment variable
    pub fn resolve(cli_token: Option<&str>) -> Result<String> {
        if let Some(token) = cli_token.filter(|t| !t.trim().is_empty()) {
            debug!("Using token from CLI argument");
            return Ok(token.to_string());
        }

        match std::env::var(credentials::TOKEN_ENV_VAR) {
            Ok(token) if !token.trim().is_empty() => {
                debug!(
                    "Using token from {} environment variable",
                    credentials::TOKEN_ENV_VAR
                );
                Ok(token)
            }
            _ => Err(NeptuneError::TokenNotFound(Self::token_not_found_message())),
        }
    }

    fn token_not_found_message() -> String {
        format!(
            "No API token found. Please provide an organization admin token using one of:\n\
             \n\
             1. CLI argument:      --admin-api-token <TOKEN>\n\
             2. Environment var:   export {}=<TOKEN>",
            credentials::TOKEN_ENV_VAR
        )
    }
}
