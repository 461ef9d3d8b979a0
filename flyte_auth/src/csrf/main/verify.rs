use cookie::{Cookie, SameSite, time::Duration};
use http::Request;
use subtle::ConstantTimeEq;

use crate::config::COOKIE_SECURE;
use crate::csrf::config::{CSRF_COOKIE_MAX_AGE, CSRF_COOKIE_NAME, CSRF_STATE_PARAM};
use crate::utils::{get_cookie_value, get_form_value};

use super::token::hash_csrf_state;

/// An empty `flyte_csrf_state` cookie; set its value to the token before sending it
pub fn new_csrf_cookie() -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE_NAME, ""))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(*COOKIE_SECURE)
        .max_age(Duration::seconds(*CSRF_COOKIE_MAX_AGE as i64))
        .build()
}

/// Check the `state` form value of a callback request against the `flyte_csrf_state` cookie.
///
/// Returns true only when the SHA-256 of the cookie's secret equals the submitted state.
/// Every failure (missing or empty cookie, missing field, mismatch) is a plain `false` so callers
/// cannot tell an attacker which check failed.
pub fn verify_csrf_cookie<B: AsRef<[u8]>>(request: &Request<B>) -> bool {
    let Some(state) = get_form_value(request, CSRF_STATE_PARAM) else {
        tracing::debug!("CSRF check failed: no state parameter");
        return false;
    };

    let Some(secret) = get_cookie_value(request.headers(), CSRF_COOKIE_NAME)
        .filter(|secret| !secret.is_empty())
    else {
        tracing::debug!("CSRF check failed: no CSRF cookie");
        return false;
    };

    let expected = hash_csrf_state(&secret);
    let verified: bool = expected.as_bytes().ct_eq(state.as_bytes()).into();
    if !verified {
        tracing::warn!("CSRF check failed: state does not match cookie");
    }
    verified
}
