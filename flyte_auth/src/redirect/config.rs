use std::sync::LazyLock;

use crate::config::env_or;

pub const REDIRECT_COOKIE_NAME: &str = "flyte_redirect_location";

/// Max-Age of the redirect cookie; it only has to survive the provider round trip.
/// Default: 5 minutes
pub(super) static REDIRECT_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| env_or("FLYTE_REDIRECT_COOKIE_MAX_AGE", 300));
