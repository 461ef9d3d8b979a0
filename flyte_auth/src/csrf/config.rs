use std::sync::LazyLock;

use crate::config::env_or;

pub const CSRF_COOKIE_NAME: &str = "flyte_csrf_state";

/// Form/query field carrying the hashed token back from the provider
pub const CSRF_STATE_PARAM: &str = "state";

/// Max-Age of the CSRF cookie, bounding how long a login may take.
/// Default: 10 minutes
pub(super) static CSRF_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| env_or("FLYTE_CSRF_COOKIE_MAX_AGE", 600));
