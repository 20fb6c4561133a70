//! Provider configuration (layered: code > CLI > env > defaults).

use std::fmt;

use reqwest::Url;

use crate::error::WayfarerError;

pub const ENDPOINT_ENV: &str = "GH_ENDPOINT";
pub const MODEL_ID_ENV: &str = "GH_MODEL_ID";
pub const TOKEN_ENV: &str = "GH_TOKEN";

pub const DEFAULT_ENDPOINT: &str = "https://models.github.ai/inference";
pub const DEFAULT_MODEL_ID: &str = "openai/gpt-5-mini";

/// Opaque auth token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// Where and as whom to reach the inference endpoint.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub model_id: String,
    pub credential: Credential,
}

impl ProviderSettings {
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
        credential: Credential,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            credential,
        }
    }

    /// Load from `GH_ENDPOINT`, `GH_MODEL_ID` and `GH_TOKEN`, reading `.env` first if present.
    pub fn from_env() -> Result<Self, WayfarerError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    ///
    /// Blank values count as unset. A missing token is fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WayfarerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credential = get(TOKEN_ENV)
            .map(Credential::new)
            .ok_or_else(|| WayfarerError::Configuration(format!("{TOKEN_ENV} is not set")))?;

        Ok(Self {
            endpoint: get(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model_id: get(MODEL_ID_ENV).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            credential,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Check the settings and return the parsed endpoint.
    pub fn validate(&self) -> Result<Url, WayfarerError> {
        if self.credential.is_empty() {
            return Err(WayfarerError::Configuration(format!(
                "credential is empty; set {TOKEN_ENV}"
            )));
        }
        if self.model_id.trim().is_empty() {
            return Err(WayfarerError::Configuration("model identifier is empty".into()));
        }
        let url = Url::parse(self.endpoint.trim()).map_err(|e| {
            WayfarerError::Configuration(format!("invalid endpoint '{}': {e}", self.endpoint))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WayfarerError::Configuration(format!(
                "endpoint '{}' must use http or https",
                self.endpoint
            )));
        }
        Ok(url)
    }
}
