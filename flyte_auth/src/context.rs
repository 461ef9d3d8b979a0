use serde::{Deserialize, Serialize};

/// OAuth2 settings this crate reads from the host's configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthOptions {
    /// Where to send the user after login when no redirect cookie was set
    pub redirect_url: String,
}

/// The part of the host's authentication context that this crate depends on
pub trait AuthenticationContext {
    fn options(&self) -> &OAuthOptions;
}

impl AuthenticationContext for OAuthOptions {
    fn options(&self) -> &OAuthOptions {
        self
    }
}
