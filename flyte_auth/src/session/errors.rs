use thiserror::Error;

use crate::utils::UtilError;

/// Failures of the secure cookie codec and the cookies built on top of it.
///
/// `Encoding` points at a configuration problem (bad keys, oversized value), while
/// `Verification`, `Decryption` and `Expired` mean the presented cookie must not be trusted.
#[derive(Debug, Error, Clone)]
pub enum CookieError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Verification error: {0}")]
    Verification(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Cookie expired")]
    Expired,

    #[error("Cookie not found: {0}")]
    NotFound(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl CookieError {
    /// True when the error means the presented cookie was forged, altered or stale
    pub fn is_untrusted_input(&self) -> bool {
        matches!(
            self,
            CookieError::Verification(_)
                | CookieError::Decryption(_)
                | CookieError::Expired
                | CookieError::NotFound(_)
        )
    }
}
