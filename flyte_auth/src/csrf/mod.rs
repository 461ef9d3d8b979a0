mod config;
mod errors;
mod main;
mod types;

pub use config::{CSRF_COOKIE_NAME, CSRF_STATE_PARAM};
pub use errors::CsrfError;
pub use main::{hash_csrf_state, new_csrf_cookie, new_csrf_token, verify_csrf_cookie};
pub use types::CsrfState;
