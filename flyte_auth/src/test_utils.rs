//! Shared helpers for unit tests across the crate

use std::env;

use cookie::Cookie;
use http::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use http::{Method, Request};

use crate::session::CookieKeys;

pub(crate) const TEST_HASH_KEY: [u8; 64] = [0x11; 64];
pub(crate) const TEST_BLOCK_KEY: [u8; 32] = [0x22; 32];

/// Fixed keys so that tests never depend on the system RNG for key material
pub(crate) fn test_keys() -> CookieKeys {
    CookieKeys::new(TEST_HASH_KEY.to_vec(), Some(TEST_BLOCK_KEY.to_vec()))
        .expect("test keys are valid")
}

/// Set an environment variable for the duration of `test` and restore the original value afterward.
///
/// Callers must be marked `#[serial]`.
pub(crate) fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
where
    F: FnOnce() -> R,
{
    let original = env::var(key).ok();

    match value {
        Some(val) => unsafe { env::set_var(key, val) },
        None => unsafe { env::remove_var(key) },
    }

    let result = test();

    match original {
        Some(val) => unsafe { env::set_var(key, val) },
        None => unsafe { env::remove_var(key) },
    }

    result
}

/// Build a request carrying the given `name=value` cookies
pub(crate) fn request_with_cookies(
    method: Method,
    uri: &str,
    cookies: &[(&str, &str)],
) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if !cookies.is_empty() {
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        builder = builder.header(COOKIE, header);
    }
    builder.body(String::new()).expect("valid test request")
}

/// Forward the `Set-Cookie` headers of a response into the `Cookie` header of the next request.
///
/// Removal cookies (empty value) are dropped, as a browser would.
pub(crate) fn echo_cookies(response: &HeaderMap) -> HeaderMap {
    let pairs: Vec<String> = response
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse(v.to_string()).ok())
        .filter(|c| !c.value().is_empty())
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect();

    let mut request = HeaderMap::new();
    if !pairs.is_empty() {
        request.insert(COOKIE, HeaderValue::from_str(&pairs.join("; ")).unwrap());
    }
    request
}
