use std::sync::LazyLock;

use crate::config::env_or;

pub const ACCESS_TOKEN_COOKIE_NAME: &str = "flyte_jwt";
pub const REFRESH_TOKEN_COOKIE_NAME: &str = "flyte_refresh";

pub(super) const HASH_KEY_ENV: &str = "FLYTE_AUTH_COOKIE_HASH_KEY";
pub(super) const BLOCK_KEY_ENV: &str = "FLYTE_AUTH_COOKIE_BLOCK_KEY";

/// Browsers reject cookies much larger than this
pub(super) const MAX_ENCODED_LEN: usize = 4096;

/// Max-Age of token cookies, also the default age limit enforced by the codec.
/// Default: 30 days
pub(super) static SECURE_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| env_or("FLYTE_SECURE_COOKIE_MAX_AGE", 86400 * 30));
