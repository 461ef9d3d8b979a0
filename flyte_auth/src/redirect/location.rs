use cookie::{Cookie, SameSite, time::Duration};
use http::Request;
use url::Url;

use crate::config::COOKIE_SECURE;
use crate::context::AuthenticationContext;
use crate::redirect::config::{REDIRECT_COOKIE_MAX_AGE, REDIRECT_COOKIE_NAME};
use crate::utils::get_cookie_value;

/// Relative redirect targets are resolved against this, only the path is kept
const REDIRECT_BASE: &str = "http://localhost/";

/// Store the post-login destination for the end of the auth flow.
///
/// Only the percent-encoded path of `redirect_url` is kept, so an absolute URL cannot send
/// the user to another site. Returns `None` (and logs) when no usable path remains.
pub fn new_redirect_cookie(redirect_url: &str) -> Option<Cookie<'static>> {
    let redirect_url = redirect_url.trim();
    if redirect_url.is_empty() {
        tracing::warn!("Empty redirect url, not creating redirect cookie");
        return None;
    }

    let base = Url::parse(REDIRECT_BASE).ok()?;
    let url = match base.join(redirect_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Error parsing redirect url {:?}: {}", redirect_url, e);
            return None;
        }
    };

    let path = url.path();
    if !is_local_path(path) || !is_cookie_value_safe(path) {
        tracing::warn!(
            "Redirect url {:?} resolved to unusable path {:?}",
            redirect_url,
            path
        );
        return None;
    }

    Some(
        Cookie::build((REDIRECT_COOKIE_NAME, path.to_string()))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .secure(*COOKIE_SECURE)
            .max_age(Duration::seconds(*REDIRECT_COOKIE_MAX_AGE as i64))
            .build(),
    )
}

/// Where to send the user at the end of the auth flow.
///
/// The redirect cookie wins when it holds a local path; otherwise the configured
/// `redirect_url` is used. A missing cookie is the normal case for direct API logins.
pub fn get_auth_flow_end_redirect<A, B>(auth_ctx: &A, request: &Request<B>) -> String
where
    A: AuthenticationContext + ?Sized,
{
    let cookie = get_cookie_value(request.headers(), REDIRECT_COOKIE_NAME);
    match cookie.filter(|v| !v.is_empty()) {
        Some(path) if is_local_path(&path) => path,
        Some(_) => {
            tracing::warn!("Ignoring redirect cookie that is not a local path");
            auth_ctx.options().redirect_url.clone()
        }
        None => {
            tracing::debug!("Could not detect end-of-flow redirect url cookie");
            auth_ctx.options().redirect_url.clone()
        }
    }
}

/// An absolute path on this host; `//host` and `/\host` are treated as other hosts by browsers
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

fn is_cookie_value_safe(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}
