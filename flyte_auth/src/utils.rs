use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use cookie::Cookie;
use headers::HeaderMapExt;
use http::Request;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| UtilError::Format("Failed to decode base64url".to_string()))?;
    Ok(decoded)
}

pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub(crate) fn gen_random_bytes(len: usize) -> Result<Vec<u8>, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(bytes)
}

pub(crate) fn gen_random_u64() -> Result<u64, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = [0u8; 8];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random seed".to_string()))?;
    Ok(u64::from_be_bytes(bytes))
}

/// Append `cookie` to `headers` as a `Set-Cookie` header
pub(crate) fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    cookie: &Cookie<'_>,
) -> Result<&'a HeaderMap, UtilError> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?;
    headers.append(SET_COOKIE, value);
    Ok(headers)
}

/// A cookie that instructs the browser to drop `name`
pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").http_only(true).build();
    cookie.make_removal();
    cookie
}

/// Look up a request cookie by name from the `Cookie` header(s)
pub(crate) fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let Some(cookies) = headers.typed_get::<headers::Cookie>() else {
        tracing::debug!("No cookie header found");
        return None;
    };

    let value = cookies.get(name).map(str::to_string);
    if value.is_none() {
        tracing::debug!("No cookie '{}' found in cookies", name);
    }
    value
}

/// Look up a form value the way an HTML form submission would deliver it.
///
/// A urlencoded body takes precedence over the query string.
pub(crate) fn get_form_value<B: AsRef<[u8]>>(request: &Request<B>, key: &str) -> Option<String> {
    let is_form_body = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));

    let from_body = if is_form_body {
        find_form_value(request.body().as_ref(), key)
    } else {
        None
    };

    from_body.or_else(|| {
        request
            .uri()
            .query()
            .and_then(|query| find_form_value(query.as_bytes(), key))
    })
}

fn find_form_value(input: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(input)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Invalid format: {0}")]
    Format(String),
}
