use thiserror::Error;

use crate::csrf::CsrfError;
use crate::session::CookieError;
use crate::utils::UtilError;

/// Errors returned by the auth flow helpers.
///
/// Anything caused by what the client sent is folded into `AuthenticationFailed`,
/// so a response never reveals which check rejected the request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Error from CSRF state operations
    #[error("CSRF error: {0}")]
    Csrf(CsrfError),

    /// Error from secure cookie operations
    #[error("Cookie error: {0}")]
    Cookie(CookieError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(UtilError),
}

impl AuthError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::AuthenticationFailed => tracing::warn!("Authentication failed"),
            Self::Csrf(err) => tracing::error!("CSRF error: {}", err),
            Self::Cookie(err) => tracing::error!("Cookie error: {}", err),
            Self::Utils(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

impl From<CsrfError> for AuthError {
    fn from(err: CsrfError) -> Self {
        Self::Csrf(err).log()
    }
}

impl From<CookieError> for AuthError {
    fn from(err: CookieError) -> Self {
        Self::Cookie(err).log()
    }
}

impl From<UtilError> for AuthError {
    fn from(err: UtilError) -> Self {
        Self::Utils(err).log()
    }
}
