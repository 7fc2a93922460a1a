//! Authorization code to access token exchange.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, error};
use url::Url;

use crate::config::OAuth2HelperConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::types::TokenResponse;

/// Trades an authorization code (and the echoed anti-forgery state) for an
/// access token.
#[async_trait]
pub trait AccessTokenExchanger: Send + Sync {
    async fn exchange(&self, oauth2_state: &str, oauth2_code: &str) -> OAuth2Result<String>;
}

/// Exchanges codes against the provider's token endpoint over HTTP.
#[derive(Clone)]
pub struct HttpAccessTokenExchanger {
    http_client: Client,
    token_endpoint: Url,
    client_id: String,
    client_secret: String,
}

impl HttpAccessTokenExchanger {
    pub fn new(config: &OAuth2HelperConfig) -> OAuth2Result<Self> {
        Self::with_client(config, config.build_http_client()?)
    }

    /// Uses `http_client` for all requests instead of building one from the
    /// configuration.
    pub fn with_client(config: &OAuth2HelperConfig, http_client: Client) -> OAuth2Result<Self> {
        Ok(Self {
            http_client,
            token_endpoint: config.token_url()?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }
}

#[async_trait]
impl AccessTokenExchanger for HttpAccessTokenExchanger {
    async fn exchange(&self, oauth2_state: &str, oauth2_code: &str) -> OAuth2Result<String> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("state", oauth2_state),
            ("code", oauth2_code),
        ];

        let response = self
            .http_client
            .post(self.token_endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Token exchange failed with status {}: {}", status, body);
            return Err(OAuth2Error::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| OAuth2Error::InvalidTokenResponse(e.to_string()))?;

        let access_token = token_response.into_access_token()?;
        debug!("Successfully exchanged code for access token");
        Ok(access_token)
    }
}
