mod config;
mod errors;
mod main;
mod types;

pub use config::{ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME};
pub use errors::CookieError;
pub use main::{CookieManager, SecureCookieCodec, new_secure_cookie, read_secure_cookie};
pub use types::{CookieKeys, TokenSet};
