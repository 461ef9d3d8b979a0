use cookie::{Cookie, SameSite, time::Duration};

use crate::config::COOKIE_SECURE;
use crate::session::config::SECURE_COOKIE_MAX_AGE;
use crate::session::errors::CookieError;

use super::codec::SecureCookieCodec;

/// Build a cookie whose value is `value` encoded by `codec`
///
/// # Arguments
/// * `name` - The cookie name, bound into the encoded value
/// * `value` - The plain value to protect
/// * `codec` - Codec holding the hash/block keys
///
/// # Returns
/// * `Result<Cookie<'static>, CookieError>` - An HttpOnly cookie scoped to `/`, or an error
pub fn new_secure_cookie(
    name: &str,
    value: &str,
    codec: &SecureCookieCodec,
) -> Result<Cookie<'static>, CookieError> {
    let encoded = codec.encode(name, value)?;

    Ok(Cookie::build((name.to_string(), encoded))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(*COOKIE_SECURE)
        .max_age(Duration::seconds(*SECURE_COOKIE_MAX_AGE as i64))
        .build())
}

/// Decode and verify the value of a cookie created by [`new_secure_cookie`]
pub fn read_secure_cookie(
    cookie: &Cookie<'_>,
    codec: &SecureCookieCodec,
) -> Result<String, CookieError> {
    codec.decode(cookie.name(), cookie.value())
}
