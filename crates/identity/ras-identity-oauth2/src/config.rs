//! OAuth2 helper configuration.
//!
//! Configuration can be built in code or loaded from:
//! - An optional TOML file
//! - Environment variables (with GITHUB_OAUTH_ prefix)
//!
//! Environment variables take precedence over config file values.

use config::{Config as ConfigBuilder, Environment, File};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{OAuth2Error, OAuth2Result};

/// Configuration for a GitHub OAuth App.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2HelperConfig {
    /// The client ID of the OAuth App.
    pub client_id: String,
    /// The client secret of the OAuth App.
    pub client_secret: String,
    #[serde(default = "default_authorization_endpoint")]
    pub authorization_endpoint: String,
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,
    /// Base URL of the REST API; GitHub Enterprise installs use `https://<host>/api/v3`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
    /// GitHub rejects API requests without a User-Agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_authorization_endpoint() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_endpoint() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// GITHUB_OAUTH_CLIENT_ID, GITHUB_OAUTH_HTTP_TIMEOUT_SECONDS, ...
///
/// Values are not type-parsed: `0012345` stays a string until deserialized.
fn environment() -> Environment {
    Environment::with_prefix("GITHUB_OAUTH").prefix_separator("_")
}

impl fmt::Debug for OAuth2HelperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2HelperConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OAuth2HelperConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorization_endpoint: default_authorization_endpoint(),
            token_endpoint: default_token_endpoint(),
            api_base_url: default_api_base_url(),
            http_timeout_seconds: default_http_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> OAuth2Result<Self> {
        Self::load_from(path, environment())
    }

    fn load_from(path: Option<&Path>, environment: Environment) -> OAuth2Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            debug!("Loading OAuth2 configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(environment);

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn with_authorization_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.authorization_endpoint = endpoint.into();
        self
    }

    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> OAuth2Result<()> {
        if self.client_id.is_empty() {
            return Err(OAuth2Error::ConfigError("client_id must not be empty".to_string()));
        }
        if self.client_secret.is_empty() {
            return Err(OAuth2Error::ConfigError(
                "client_secret must not be empty".to_string(),
            ));
        }
        if self.http_timeout_seconds == 0 {
            return Err(OAuth2Error::ConfigError(
                "http_timeout_seconds must be greater than zero".to_string(),
            ));
        }

        self.authorization_url()?;
        self.token_url()?;
        self.user_url()?;

        Ok(())
    }

    pub(crate) fn authorization_url(&self) -> OAuth2Result<Url> {
        Ok(Url::parse(&self.authorization_endpoint)?)
    }

    pub(crate) fn token_url(&self) -> OAuth2Result<Url> {
        Ok(Url::parse(&self.token_endpoint)?)
    }

    /// The "get the authenticated user" endpoint under `api_base_url`.
    pub(crate) fn user_url(&self) -> OAuth2Result<Url> {
        let base = format!("{}/", self.api_base_url.trim_end_matches('/'));
        Ok(Url::parse(&base)?.join("user")?)
    }

    /// Builds the HTTP client shared by the exchange steps.
    pub(crate) fn build_http_client(&self) -> OAuth2Result<Client> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.http_timeout_seconds))
            .user_agent(self.user_agent.as_str())
            .build()?;
        Ok(client)
    }
}
