//! OAuth2 error types.

use thiserror::Error;

pub type OAuth2Result<T> = Result<T, OAuth2Error>;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to load configuration: {0}")]
    ConfigSourceError(#[from] config::ConfigError),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// The token endpoint answered with an OAuth2 error object.
    #[error("Provider error: {error} ({})", .description.as_deref().unwrap_or("no description"))]
    ProviderError {
        error: String,
        description: Option<String>,
    },

    #[error("Token response did not contain an access token")]
    MissingAccessToken,

    #[error("User info request failed with status {status}: {body}")]
    UserInfoFailed { status: u16, body: String },

    #[error("Invalid user info response: {0}")]
    InvalidUserInfoResponse(String),
}
