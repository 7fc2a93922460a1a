//! GitHub OAuth2 identity exchange.
//!
//! [`GitHubAuthHelper`] implements the authorization code flow in two
//! sequential steps: an [`AccessTokenExchanger`] trades the code for an access
//! token, then an [`IdentityResolver`] uses the token to fetch the user's
//! profile. Both steps are injected trait objects, so the orchestration can be
//! exercised without a network.

mod config;
mod error;
mod exchanger;
mod helper;
mod resolver;
mod types;


pub use config::OAuth2HelperConfig;
pub use error::{OAuth2Error, OAuth2Result};
pub use exchanger::{AccessTokenExchanger, HttpAccessTokenExchanger};
pub use helper::GitHubAuthHelper;
pub use resolver::{GitHubIdentityResolver, IdentityResolver};
pub use types::{GitHubUser, TokenResponse};

// Re-export common types for convenience
pub use ras_identity_core::{
    ExchangeStep, ThirdPartyAuthError, ThirdPartyAuthHelper, ThirdPartyAuthResult,
    ThirdPartyIdentity,
};
pub use tokio_util::sync::CancellationToken;
