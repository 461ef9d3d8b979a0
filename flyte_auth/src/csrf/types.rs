use std::fmt;

/// One issued CSRF state.
///
/// `token` is the secret kept in the `flyte_csrf_state` cookie, `expected_hash` is
/// what the client sends to the provider as `state` and must echo back.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfState {
    pub seed: u64,
    pub token: String,
    pub expected_hash: String,
}

impl fmt::Debug for CsrfState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfState")
            .field("token", &"[redacted]")
            .field("expected_hash", &self.expected_hash)
            .finish_non_exhaustive()
    }
}
