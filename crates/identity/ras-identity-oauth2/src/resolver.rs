//! Access token to user identity resolution.

use async_trait::async_trait;
use ras_identity_core::ThirdPartyIdentity;
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, error};
use url::Url;

use crate::config::OAuth2HelperConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::types::GitHubUser;

/// Looks up the user an access token was issued to.
///
/// Implementations must not retry: the token may be single-use or
/// rate-limited, so retrying is left to the caller.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, access_token: &str) -> OAuth2Result<ThirdPartyIdentity>;
}

/// Resolves identities through GitHub's "get the authenticated user" API.
#[derive(Clone)]
pub struct GitHubIdentityResolver {
    http_client: Client,
    user_endpoint: Url,
    user_agent: String,
}

impl GitHubIdentityResolver {
    pub fn new(config: &OAuth2HelperConfig) -> OAuth2Result<Self> {
        Self::with_client(config, config.build_http_client()?)
    }

    pub fn with_client(config: &OAuth2HelperConfig, http_client: Client) -> OAuth2Result<Self> {
        Ok(Self {
            http_client,
            user_endpoint: config.user_url()?,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl IdentityResolver for GitHubIdentityResolver {
    async fn resolve(&self, access_token: &str) -> OAuth2Result<ThirdPartyIdentity> {
        let response = self
            .http_client
            .get(self.user_endpoint.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("User info request failed with status {}: {}", status, body);
            return Err(OAuth2Error::UserInfoFailed {
                status: status.as_u16(),
                body,
            });
        }

        let user: GitHubUser = response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidUserInfoResponse(e.to_string()))?;

        debug!("Successfully retrieved user info for login: {}", user.login);
        Ok(user.into())
    }
}
