use thiserror::Error;

use crate::utils::UtilError;

/// Failures while issuing CSRF state.
///
/// Verification never produces an error, see [`crate::verify_csrf_cookie`].
#[derive(Debug, Error, Clone)]
pub enum CsrfError {
    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
