//! Orchestration of the authorization code flow.

use async_trait::async_trait;
use ras_identity_core::{
    ExchangeStep, ThirdPartyAuthError, ThirdPartyAuthHelper, ThirdPartyAuthResult,
    ThirdPartyIdentity,
};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::OAuth2HelperConfig;
use crate::error::OAuth2Result;
use crate::exchanger::{AccessTokenExchanger, HttpAccessTokenExchanger};
use crate::resolver::{GitHubIdentityResolver, IdentityResolver};

/// [`ThirdPartyAuthHelper`] backed by a GitHub OAuth App.
#[derive(Clone)]
pub struct GitHubAuthHelper {
    authorization_endpoint: Url,
    client_id: String,
    token_exchanger: Arc<dyn AccessTokenExchanger>,
    identity_resolver: Arc<dyn IdentityResolver>,
}

impl GitHubAuthHelper {
    /// Creates a helper that talks to GitHub over a single pooled HTTP client.
    pub fn new(config: OAuth2HelperConfig) -> OAuth2Result<Self> {
        config.validate()?;
        let http_client = config.build_http_client()?;

        let token_exchanger = HttpAccessTokenExchanger::with_client(&config, http_client.clone())?;
        let identity_resolver = GitHubIdentityResolver::with_client(&config, http_client)?;

        Self::from_validated(&config, Arc::new(token_exchanger), Arc::new(identity_resolver))
    }

    /// Creates a helper using the given implementations of the two exchange
    /// steps.
    pub fn with_steps(
        config: &OAuth2HelperConfig,
        token_exchanger: Arc<dyn AccessTokenExchanger>,
        identity_resolver: Arc<dyn IdentityResolver>,
    ) -> OAuth2Result<Self> {
        config.validate()?;
        Self::from_validated(config, token_exchanger, identity_resolver)
    }

    fn from_validated(
        config: &OAuth2HelperConfig,
        token_exchanger: Arc<dyn AccessTokenExchanger>,
        identity_resolver: Arc<dyn IdentityResolver>,
    ) -> OAuth2Result<Self> {
        Ok(Self {
            authorization_endpoint: config.authorization_url()?,
            client_id: config.client_id.clone(),
            token_exchanger,
            identity_resolver,
        })
    }
}

/// Runs one exchange step, abandoning it as soon as `cancel` fires.
async fn run_step<T, F>(
    cancel: &CancellationToken,
    step: ExchangeStep,
    future: F,
) -> ThirdPartyAuthResult<T>
where
    F: Future<Output = OAuth2Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("OAuth2 {} cancelled", step);
            Err(ThirdPartyAuthError::Cancelled { step })
        }
        result = future => result.map_err(|e| {
            warn!("OAuth2 {} failed: {}", step, e);
            match step {
                ExchangeStep::TokenExchange => ThirdPartyAuthError::TokenExchange(Box::new(e)),
                ExchangeStep::IdentityLookup => ThirdPartyAuthError::IdentityLookup(Box::new(e)),
            }
        }),
    }
}

#[async_trait]
impl ThirdPartyAuthHelper for GitHubAuthHelper {
    fn auth_url(&self, oauth2_state: &str) -> String {
        let mut url = self.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("state", oauth2_state);

        debug!("Generated authorization URL for client {}", self.client_id);
        url.into()
    }

    async fn exchange(
        &self,
        cancel: &CancellationToken,
        oauth2_state: &str,
        oauth2_code: &str,
    ) -> ThirdPartyAuthResult<ThirdPartyIdentity> {
        debug!("Requesting OAuth2 access token");
        let access_token = run_step(
            cancel,
            ExchangeStep::TokenExchange,
            self.token_exchanger.exchange(oauth2_state, oauth2_code),
        )
        .await?;

        debug!("Obtained OAuth2 access token, requesting user identity");
        let identity = run_step(
            cancel,
            ExchangeStep::IdentityLookup,
            self.identity_resolver.resolve(&access_token),
        )
        .await?;

        info!("Successfully resolved third-party identity {}", identity.id);
        Ok(identity)
    }
}
