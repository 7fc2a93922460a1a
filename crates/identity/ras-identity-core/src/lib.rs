//! Core third-party identity traits and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The network-bound steps of an identity exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeStep {
    /// Trading the authorization code for an access token.
    TokenExchange,
    /// Fetching the authenticated user's profile with the access token.
    IdentityLookup,
}

impl fmt::Display for ExchangeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeStep::TokenExchange => write!(f, "access token exchange"),
            ExchangeStep::IdentityLookup => write!(f, "identity lookup"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThirdPartyAuthError {
    #[error("error exchanging code for OAuth2 access token")]
    TokenExchange(#[source] BoxError),

    #[error("error retrieving user identity from third-party provider")]
    IdentityLookup(#[source] BoxError),

    #[error("{step} was cancelled")]
    Cancelled { step: ExchangeStep },
}

impl ThirdPartyAuthError {
    /// The step the exchange failed in.
    pub fn step(&self) -> ExchangeStep {
        match self {
            ThirdPartyAuthError::TokenExchange(_) => ExchangeStep::TokenExchange,
            ThirdPartyAuthError::IdentityLookup(_) => ExchangeStep::IdentityLookup,
            ThirdPartyAuthError::Cancelled { step } => *step,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ThirdPartyAuthError::Cancelled { .. })
    }
}

pub type ThirdPartyAuthResult<T> = Result<T, ThirdPartyAuthError>;

/// A user as identified by a third-party identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyIdentity {
    /// Stable identifier assigned by the provider (e.g. a login handle).
    pub id: String,
    /// Display name; empty if the user has not set one.
    pub name: String,
}

/// Drives an OAuth2 authorization code flow against a third-party provider.
///
/// Implementations embed the caller's anti-forgery `state` in the
/// authorization URL and echo it to the provider during the exchange, but do
/// not remember it. Checking that the `state` coming back from the provider is
/// the one originally issued is the caller's job.
#[async_trait]
pub trait ThirdPartyAuthHelper: Send + Sync {
    /// Returns the provider URL to redirect the user to.
    fn auth_url(&self, oauth2_state: &str) -> String;

    /// Exchanges an authorization code for the identity of the user that
    /// granted it.
    ///
    /// Returns [`ThirdPartyAuthError::Cancelled`] promptly once `cancel` fires.
    async fn exchange(
        &self,
        cancel: &CancellationToken,
        oauth2_state: &str,
        oauth2_code: &str,
    ) -> ThirdPartyAuthResult<ThirdPartyIdentity>;
}
