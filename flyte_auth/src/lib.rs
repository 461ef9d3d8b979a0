//! flyte-auth - Cookie-backed session state and CSRF protection for authentication flows
//!
//! This crate provides the cookie handling that sits between an HTTP server and an
//! OAuth2 provider:
//!
//! - an authenticated (and optionally encrypted) secure cookie codec,
//! - CSRF state tokens bound to a `flyte_csrf_state` cookie,
//! - a redirect cookie carrying the post-login destination across the handshake.
//!
//! The OAuth2 exchange itself, routing and key provisioning are left to the host.

mod config;
mod context;
mod coordination;
mod csrf;
mod redirect;
mod session;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::COOKIE_SECURE;

pub use context::{AuthenticationContext, OAuthOptions};

pub use coordination::{
    AuthError, AuthFlowEnd, AuthFlowStart, finish_auth_flow, load_session_tokens, start_auth_flow,
};

pub use csrf::{
    CSRF_COOKIE_NAME, CSRF_STATE_PARAM, CsrfError, CsrfState, hash_csrf_state, new_csrf_cookie,
    new_csrf_token, verify_csrf_cookie,
};

pub use redirect::{REDIRECT_COOKIE_NAME, get_auth_flow_end_redirect, new_redirect_cookie};

pub use session::{
    ACCESS_TOKEN_COOKIE_NAME, CookieError, CookieKeys, CookieManager, REFRESH_TOKEN_COOKIE_NAME,
    SecureCookieCodec, TokenSet, new_secure_cookie, read_secure_cookie,
};

pub use utils::UtilError;
