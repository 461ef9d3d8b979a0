//! Central configuration for the flyte_auth crate

use std::str::FromStr;
use std::sync::LazyLock;

/// Whether issued cookies carry the `Secure` attribute
///
/// Turn this off only for plain-http local development.
/// Default: true
pub static COOKIE_SECURE: LazyLock<bool> =
    LazyLock::new(|| env_or("FLYTE_AUTH_COOKIE_SECURE", true));

/// Read `key` from the environment, falling back to `default` when unset or unparsable
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}, using default", key);
            default
        }),
        Err(_) => default,
    }
}
