//! Auth flow coordination
//!
//! Ties the CSRF state, redirect and secure token cookies together into the two steps
//! of a browser login: sending the user to the provider and handling the callback.

mod errors;
mod flow;

pub use errors::AuthError;
pub use flow::{AuthFlowEnd, AuthFlowStart, finish_auth_flow, load_session_tokens, start_auth_flow};
