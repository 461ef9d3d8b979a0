use http::HeaderMap;

use crate::session::config::{
    ACCESS_TOKEN_COOKIE_NAME, BLOCK_KEY_ENV, HASH_KEY_ENV, REFRESH_TOKEN_COOKIE_NAME,
};
use crate::session::errors::CookieError;
use crate::session::types::{CookieKeys, TokenSet};
use crate::utils::{get_cookie_value, header_set_cookie, removal_cookie};

use super::codec::SecureCookieCodec;
use super::secure_cookie::new_secure_cookie;

/// Persists OAuth2 tokens in secure cookies.
///
/// Built once from the process's cookie keys and shared across request handlers.
#[derive(Debug, Clone)]
pub struct CookieManager {
    codec: SecureCookieCodec,
}

impl CookieManager {
    pub fn new(keys: &CookieKeys) -> Result<Self, CookieError> {
        Ok(Self {
            codec: SecureCookieCodec::new(keys)?,
        })
    }

    /// Build a manager from base64 keys in `FLYTE_AUTH_COOKIE_HASH_KEY` and,
    /// when set, `FLYTE_AUTH_COOKIE_BLOCK_KEY`
    pub fn from_env() -> Result<Self, CookieError> {
        let hash_key = std::env::var(HASH_KEY_ENV)
            .map_err(|_| CookieError::Encoding(format!("{HASH_KEY_ENV} is not set")))?;
        let block_key = std::env::var(BLOCK_KEY_ENV).ok();
        if block_key.is_none() {
            tracing::warn!(
                "{} is not set, cookies will be signed but not encrypted",
                BLOCK_KEY_ENV
            );
        }

        let keys = CookieKeys::from_base64(&hash_key, block_key.as_deref())?;
        Self::new(&keys)
    }

    pub fn codec(&self) -> &SecureCookieCodec {
        &self.codec
    }

    /// Append `Set-Cookie` headers carrying the access token and, if present, the refresh token
    pub fn set_token_cookies(
        &self,
        headers: &mut HeaderMap,
        tokens: &TokenSet,
    ) -> Result<(), CookieError> {
        if tokens.access_token.is_empty() {
            return Err(CookieError::Encoding(
                "Attempting to set cookies with an empty access token".to_string(),
            ));
        }

        let access =
            new_secure_cookie(ACCESS_TOKEN_COOKIE_NAME, &tokens.access_token, &self.codec)?;
        header_set_cookie(headers, &access)?;

        match tokens.refresh_token.as_deref() {
            Some(refresh_token) if !refresh_token.is_empty() => {
                let refresh =
                    new_secure_cookie(REFRESH_TOKEN_COOKIE_NAME, refresh_token, &self.codec)?;
                header_set_cookie(headers, &refresh)?;
            }
            _ => tracing::debug!("No refresh token to store"),
        }

        Ok(())
    }

    /// Read back the tokens stored by [`CookieManager::set_token_cookies`].
    ///
    /// The access token cookie is required. A refresh token cookie that is missing yields
    /// `None`, one that fails verification is an error.
    pub fn retrieve_token_values(&self, headers: &HeaderMap) -> Result<TokenSet, CookieError> {
        let access_token = self.read_cookie(headers, ACCESS_TOKEN_COOKIE_NAME)?;

        let refresh_token = match self.read_cookie(headers, REFRESH_TOKEN_COOKIE_NAME) {
            Ok(token) => Some(token),
            Err(CookieError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(TokenSet {
            access_token,
            refresh_token,
        })
    }

    /// Append `Set-Cookie` headers that remove the token cookies from the browser
    pub fn delete_cookies(&self, headers: &mut HeaderMap) -> Result<(), CookieError> {
        for name in [ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME] {
            header_set_cookie(headers, &removal_cookie(name))?;
        }
        Ok(())
    }

    fn read_cookie(&self, headers: &HeaderMap, name: &str) -> Result<String, CookieError> {
        let value = get_cookie_value(headers, name)
            .ok_or_else(|| CookieError::NotFound(name.to_string()))?;
        self.codec.decode(name, &value).inspect_err(|e| {
            tracing::warn!("Rejected cookie '{}': {}", name, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{echo_cookies, test_keys, with_env_var};
    use cookie::Cookie;
    use http::header::{COOKIE, HeaderValue, SET_COOKIE};
    use serial_test::serial;

    fn manager() -> CookieManager {
        CookieManager::new(&test_keys()).unwrap()
    }

    fn tokens() -> TokenSet {
        TokenSet {
            access_token: "access-token-value".to_string(),
            refresh_token: Some("refresh-token-value".to_string()),
        }
    }

    #[test]
    fn test_set_and_retrieve_tokens() {
        let manager = manager();
        let mut response = HeaderMap::new();
        manager.set_token_cookies(&mut response, &tokens()).unwrap();
        assert_eq!(response.get_all(SET_COOKIE).iter().count(), 2);

        let request = echo_cookies(&response);
        let retrieved = manager.retrieve_token_values(&request).unwrap();
        assert_eq!(retrieved, tokens());
    }

    #[test]
    fn test_set_without_refresh_token() {
        let manager = manager();
        let mut response = HeaderMap::new();
        let only_access = TokenSet {
            access_token: "access-token-value".to_string(),
            refresh_token: None,
        };
        manager
            .set_token_cookies(&mut response, &only_access)
            .unwrap();
        assert_eq!(response.get_all(SET_COOKIE).iter().count(), 1);

        let request = echo_cookies(&response);
        let retrieved = manager.retrieve_token_values(&request).unwrap();
        assert_eq!(retrieved, only_access);
    }

    #[test]
    fn test_set_rejects_empty_access_token() {
        let mut response = HeaderMap::new();
        let empty = TokenSet {
            access_token: String::new(),
            refresh_token: None,
        };
        let result = manager().set_token_cookies(&mut response, &empty);
        assert!(matches!(result, Err(CookieError::Encoding(_))));
        assert!(response.is_empty());
    }

    #[test]
    fn test_retrieve_without_cookies() {
        let result = manager().retrieve_token_values(&HeaderMap::new());
        assert!(matches!(
            result,
            Err(CookieError::NotFound(name)) if name == ACCESS_TOKEN_COOKIE_NAME
        ));
    }

    #[test]
    fn test_retrieve_rejects_forged_access_token() {
        let mut request = HeaderMap::new();
        request.insert(
            COOKIE,
            HeaderValue::from_static("flyte_jwt=1700000000.Zm9yZ2Vk.AAAA"),
        );
        let result = manager().retrieve_token_values(&request);
        assert!(matches!(result, Err(CookieError::Verification(_))));
    }

    #[test]
    fn test_retrieve_rejects_tokens_from_other_keys() {
        let mut response = HeaderMap::new();
        manager()
            .set_token_cookies(&mut response, &tokens())
            .unwrap();

        let other = CookieManager::new(&CookieKeys::generate().unwrap()).unwrap();
        let result = other.retrieve_token_values(&echo_cookies(&response));
        assert!(matches!(result, Err(CookieError::Verification(_))));
    }

    #[test]
    fn test_delete_cookies() {
        let mut response = HeaderMap::new();
        manager().delete_cookies(&mut response).unwrap();

        let removed: Vec<Cookie<'static>> = response
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| Cookie::parse(v.to_str().unwrap().to_string()).unwrap())
            .collect();
        assert_eq!(removed.len(), 2);
        for removal in &removed {
            assert_eq!(removal.value(), "");
            assert_eq!(removal.max_age(), Some(cookie::time::Duration::ZERO));
        }
        assert_eq!(removed[0].name(), ACCESS_TOKEN_COOKIE_NAME);
        assert_eq!(removed[1].name(), REFRESH_TOKEN_COOKIE_NAME);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let (hash, block) = test_keys().to_base64();
        with_env_var(HASH_KEY_ENV, Some(&hash), || {
            with_env_var(BLOCK_KEY_ENV, block.as_deref(), || {
                let from_env = CookieManager::from_env().unwrap();
                assert!(from_env.codec().encrypts());

                let mut response = HeaderMap::new();
                manager()
                    .set_token_cookies(&mut response, &tokens())
                    .unwrap();
                let request = echo_cookies(&response);
                let retrieved = from_env.retrieve_token_values(&request).unwrap();
                assert_eq!(retrieved, tokens());
            })
        });
    }

    #[test]
    #[serial]
    fn test_from_env_without_hash_key() {
        with_env_var(HASH_KEY_ENV, None, || {
            let result = CookieManager::from_env();
            assert!(matches!(result, Err(CookieError::Encoding(_))));
        });
    }
}
