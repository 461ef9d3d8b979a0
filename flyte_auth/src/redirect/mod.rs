mod config;
mod location;

pub use self::config::REDIRECT_COOKIE_NAME;
pub use self::location::{get_auth_flow_end_redirect, new_redirect_cookie};
