//! CSRF token generation
//!
//! Tokens are a pure function of a seed so that tests can pin exact values. The seed is
//! the only source of unpredictability: production callers go through
//! [`CsrfState::generate`], which draws it from the system CSPRNG.

use cookie::Cookie;
use sha2::{Digest, Sha256};

use crate::csrf::errors::CsrfError;
use crate::csrf::types::CsrfState;
use crate::utils::gen_random_u64;

use super::rng::SeededSource;
use super::verify::new_csrf_cookie;

const CSRF_TOKEN_LEN: usize = 10;
const CSRF_TOKEN_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz1234567890";

/// Derive a 10 character `[a-z0-9]` token from `seed`.
///
/// Each character is a uniform draw from the alphabet out of a lagged Fibonacci stream
/// seeded with `seed`, so the same seed always gives the same token.
pub fn new_csrf_token(seed: u64) -> String {
    let mut source = SeededSource::new(seed);
    (0..CSRF_TOKEN_LEN)
        .map(|_| {
            let index = source.int31n(CSRF_TOKEN_ALPHABET.len() as i32) as usize;
            char::from(CSRF_TOKEN_ALPHABET[index])
        })
        .collect()
}

/// Lowercase hex SHA-256 of `token`, the value sent as the `state` parameter
pub fn hash_csrf_state(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

impl CsrfState {
    pub fn from_seed(seed: u64) -> Self {
        let token = new_csrf_token(seed);
        let expected_hash = hash_csrf_state(&token);
        Self {
            seed,
            token,
            expected_hash,
        }
    }

    /// Issue state for a new login from a CSPRNG seed
    pub fn generate() -> Result<Self, CsrfError> {
        Ok(Self::from_seed(gen_random_u64()?))
    }

    /// The `flyte_csrf_state` cookie holding this state's secret token
    pub fn cookie(&self) -> Cookie<'static> {
        let mut cookie = new_csrf_cookie();
        cookie.set_value(self.token.clone());
        cookie
    }
}
