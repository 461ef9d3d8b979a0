mod codec;
mod manager;
mod secure_cookie;

pub use codec::SecureCookieCodec;
pub use manager::CookieManager;
pub use secure_cookie::{new_secure_cookie, read_secure_cookie};
