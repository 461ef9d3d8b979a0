use http::{HeaderMap, Request};

use crate::context::AuthenticationContext;
use crate::csrf::{CSRF_COOKIE_NAME, CsrfState, verify_csrf_cookie};
use crate::redirect::{REDIRECT_COOKIE_NAME, get_auth_flow_end_redirect, new_redirect_cookie};
use crate::session::{CookieManager, TokenSet};
use crate::utils::{header_set_cookie, removal_cookie};

use super::errors::AuthError;

/// Result of starting a login.
///
/// `state.expected_hash` goes into the provider's authorization URL as `state`,
/// `headers` must be merged into the response that sends the user there.
#[derive(Debug)]
pub struct AuthFlowStart {
    pub state: CsrfState,
    pub headers: HeaderMap,
}

/// Result of a verified login callback
#[derive(Debug)]
pub struct AuthFlowEnd {
    pub redirect_to: String,
    pub headers: HeaderMap,
}

/// Issue fresh CSRF state and the cookies that carry it through the provider round trip.
///
/// When `redirect_url` is given and usable, a redirect cookie remembers where to send the
/// user once the callback succeeds.
pub fn start_auth_flow(redirect_url: Option<&str>) -> Result<AuthFlowStart, AuthError> {
    let state = CsrfState::generate()?;

    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, &state.cookie())?;

    if let Some(redirect_cookie) = redirect_url.and_then(new_redirect_cookie) {
        header_set_cookie(&mut headers, &redirect_cookie)?;
    }

    tracing::debug!("Started auth flow with state {}", state.expected_hash);
    Ok(AuthFlowStart { state, headers })
}

/// Verify the provider callback and decide where the user goes next.
///
/// The CSRF and redirect cookies are single use, so the returned headers always expire both.
pub fn finish_auth_flow<A, B>(auth_ctx: &A, request: &Request<B>) -> Result<AuthFlowEnd, AuthError>
where
    A: AuthenticationContext + ?Sized,
    B: AsRef<[u8]>,
{
    if !verify_csrf_cookie(request) {
        return Err(AuthError::AuthenticationFailed.log());
    }

    let redirect_to = get_auth_flow_end_redirect(auth_ctx, request);

    let mut headers = HeaderMap::new();
    for name in [CSRF_COOKIE_NAME, REDIRECT_COOKIE_NAME] {
        header_set_cookie(&mut headers, &removal_cookie(name))?;
    }

    tracing::debug!("Auth flow finished, redirecting to {}", redirect_to);
    Ok(AuthFlowEnd {
        redirect_to,
        headers,
    })
}

/// Read the session tokens of an incoming request.
///
/// Missing, forged or expired cookies are reported as `AuthenticationFailed`.
pub fn load_session_tokens(
    manager: &CookieManager,
    headers: &HeaderMap,
) -> Result<TokenSet, AuthError> {
    manager.retrieve_token_values(headers).map_err(|e| {
        if e.is_untrusted_input() {
            tracing::debug!("Rejecting session cookies: {}", e);
            AuthError::AuthenticationFailed
        } else {
            AuthError::from(e)
        }
    })
}
