use std::fmt;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::session::errors::CookieError;
use crate::utils::gen_random_bytes;

/// Minimum hash key length, i.e. 256-bit MAC strength
const MIN_HASH_KEY_LEN: usize = 32;
const GENERATED_HASH_KEY_LEN: usize = 64;
const GENERATED_BLOCK_KEY_LEN: usize = 32;

/// Standard alphabet, written without padding, read with or without it.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Key pair used by the secure cookie codec.
///
/// The hash key authenticates cookie values (HMAC-SHA256), the optional block key
/// encrypts them (AES-GCM, key size selects AES-128/192/256).
#[derive(Clone, PartialEq, Eq)]
pub struct CookieKeys {
    hash_key: Vec<u8>,
    block_key: Option<Vec<u8>>,
}

impl CookieKeys {
    pub fn new(hash_key: Vec<u8>, block_key: Option<Vec<u8>>) -> Result<Self, CookieError> {
        if hash_key.len() < MIN_HASH_KEY_LEN {
            return Err(CookieError::Encoding(format!(
                "Hash key must be at least {MIN_HASH_KEY_LEN} bytes, got {}",
                hash_key.len()
            )));
        }

        if let Some(block_key) = &block_key {
            if !matches!(block_key.len(), 16 | 24 | 32) {
                return Err(CookieError::Encoding(format!(
                    "Block key must be 16, 24 or 32 bytes, got {}",
                    block_key.len()
                )));
            }
        }

        Ok(Self {
            hash_key,
            block_key,
        })
    }

    /// Fresh random keys: a 64-byte hash key and a 32-byte (AES-256) block key
    pub fn generate() -> Result<Self, CookieError> {
        let hash_key = gen_random_bytes(GENERATED_HASH_KEY_LEN)?;
        let block_key = gen_random_bytes(GENERATED_BLOCK_KEY_LEN)?;
        Self::new(hash_key, Some(block_key))
    }

    /// Load keys from standard base64 (padding optional)
    pub fn from_base64(hash_key: &str, block_key: Option<&str>) -> Result<Self, CookieError> {
        let hash_key = KEY_ENGINE
            .decode(hash_key.trim())
            .map_err(|e| CookieError::Encoding(format!("Invalid hash key encoding: {e}")))?;

        let block_key = block_key
            .map(|key| {
                KEY_ENGINE
                    .decode(key.trim())
                    .map_err(|e| CookieError::Encoding(format!("Invalid block key encoding: {e}")))
            })
            .transpose()?;

        Self::new(hash_key, block_key)
    }

    /// Unpadded standard base64 of (hash key, block key), the format `from_base64` reads
    pub fn to_base64(&self) -> (String, Option<String>) {
        (
            KEY_ENGINE.encode(&self.hash_key),
            self.block_key.as_ref().map(|key| KEY_ENGINE.encode(key)),
        )
    }

    pub fn hash_key(&self) -> &[u8] {
        &self.hash_key
    }

    pub fn block_key(&self) -> Option<&[u8]> {
        self.block_key.as_deref()
    }
}

impl fmt::Debug for CookieKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hash_key = format!("[{} bytes]", self.hash_key.len());
        let block_key = self.block_key.as_ref().map(Vec::len);
        f.debug_struct("CookieKeys")
            .field("hash_key", &format_args!("{hash_key}"))
            .field("block_key", &block_key.map(|len| format!("[{len} bytes]")))
            .finish()
    }
}

/// OAuth2 tokens persisted in the browser between requests
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[redacted]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_keys_accepts_valid_sizes() {
        for block_len in [16, 24, 32] {
            let keys = CookieKeys::new(vec![1u8; 64], Some(vec![2u8; block_len]));
            assert!(keys.is_ok(), "{block_len} byte block key rejected");
        }
        assert!(CookieKeys::new(vec![1u8; MIN_HASH_KEY_LEN], None).is_ok());
    }

    #[test]
    fn test_cookie_keys_rejects_short_hash_key() {
        let result = CookieKeys::new(vec![1u8; MIN_HASH_KEY_LEN - 1], None);
        assert!(matches!(result, Err(CookieError::Encoding(_))));
    }

    #[test]
    fn test_cookie_keys_rejects_bad_block_key() {
        for block_len in [0, 8, 20, 31, 64] {
            let result = CookieKeys::new(vec![1u8; 64], Some(vec![2u8; block_len]));
            assert!(
                matches!(result, Err(CookieError::Encoding(_))),
                "block key of {block_len} bytes should be rejected"
            );
        }
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let a = CookieKeys::generate().unwrap();
        let b = CookieKeys::generate().unwrap();
        assert_eq!(a.hash_key().len(), 64);
        assert_eq!(a.block_key().map(<[u8]>::len), Some(32));
        assert_ne!(a, b);
    }

    #[test]
    fn test_base64_roundtrip() {
        let keys = CookieKeys::generate().unwrap();
        let (hash, block) = keys.to_base64();
        assert!(!hash.ends_with('='));

        let loaded = CookieKeys::from_base64(&hash, block.as_deref()).unwrap();
        assert_eq!(loaded, keys);
    }

    #[test]
    fn test_from_base64_accepts_padding() {
        // 32 bytes -> 43 chars unpadded, 44 with a trailing '='
        let padded = "ERERERERERERERERERERERERERERERERERERERERERE=";
        let keys = CookieKeys::from_base64(padded, None).unwrap();
        assert_eq!(keys.hash_key(), &[0x11u8; 32][..]);
        assert_eq!(keys.block_key(), None);
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        let result = CookieKeys::from_base64("%%% not base64 %%%", None);
        assert!(matches!(result, Err(CookieError::Encoding(_))));
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let keys = CookieKeys::new(vec![0xAB; 64], Some(vec![0xCD; 32])).unwrap();
        let debug = format!("{keys:?}");
        assert!(debug.contains("[64 bytes]"));
        assert!(!debug.contains("171"));

        let tokens = TokenSet {
            access_token: "secret-access".to_string(),
            refresh_token: Some("secret-refresh".to_string()),
        };
        let debug = format!("{tokens:?}");
        assert!(!debug.contains("secret"));
    }
}
