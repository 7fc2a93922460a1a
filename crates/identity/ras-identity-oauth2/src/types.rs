//! Provider wire types.

use ras_identity_core::ThirdPartyIdentity;
use serde::{Deserialize, Serialize};

use crate::error::{OAuth2Error, OAuth2Result};

/// Body returned by the token endpoint.
///
/// GitHub reports a bad or expired code with a 200 status and an `error`
/// field instead of an access token, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

impl TokenResponse {
    pub fn into_access_token(self) -> OAuth2Result<String> {
        if let Some(error) = self.error {
            return Err(OAuth2Error::ProviderError {
                error,
                description: self.error_description,
            });
        }

        self.access_token
            .filter(|token| !token.is_empty())
            .ok_or(OAuth2Error::MissingAccessToken)
    }
}

/// The subset of GitHub's "get the authenticated user" response we consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<GitHubUser> for ThirdPartyIdentity {
    fn from(user: GitHubUser) -> Self {
        Self {
            id: user.login,
            name: user.name.unwrap_or_default(),
        }
    }
}
