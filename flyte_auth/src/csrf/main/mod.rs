mod rng;
mod token;
mod verify;

pub use token::{hash_csrf_state, new_csrf_token};
pub use verify::{new_csrf_cookie, verify_csrf_cookie};
