//! Authenticated, optionally encrypted cookie values
//!
//! Wire layout: `<unix-ts>.<b64url(payload)>.<b64url(mac)>`
//!
//! - `payload` is `nonce || ciphertext` when a block key is configured, the raw value otherwise.
//!   The cookie name is the AEAD associated data.
//! - `mac` is HMAC-SHA256 over `name|ts|b64url(payload)` with the hash key.
//!
//! The MAC is checked before anything else is interpreted.

use std::fmt;

use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm, KeyInit, Nonce,
    aead::{Aead, Payload, consts::U12},
    aes::Aes192,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::session::config::{MAX_ENCODED_LEN, SECURE_COOKIE_MAX_AGE};
use crate::session::errors::CookieError;
use crate::session::types::CookieKeys;
use crate::utils::{base64url_decode, base64url_encode, gen_random_bytes};

type HmacSha256 = Hmac<Sha256>;
type Aes192Gcm = AesGcm<Aes192, U12>;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Clone)]
enum BlockCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, CookieError> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Self::Aes128),
            24 => Aes192Gcm::new_from_slice(key).map(Self::Aes192),
            32 => Aes256Gcm::new_from_slice(key).map(Self::Aes256),
            len => {
                return Err(CookieError::Encoding(format!(
                    "Unsupported block key length: {len}"
                )));
            }
        };
        cipher.map_err(|_| CookieError::Encoding("Invalid block key".to_string()))
    }

    fn encrypt(&self, nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce, payload),
            Self::Aes192(cipher) => cipher.encrypt(nonce, payload),
            Self::Aes256(cipher) => cipher.encrypt(nonce, payload),
        }
    }

    fn decrypt(&self, nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, payload),
            Self::Aes192(cipher) => cipher.decrypt(nonce, payload),
            Self::Aes256(cipher) => cipher.decrypt(nonce, payload),
        }
    }
}

/// Encodes and decodes secure cookie values with a fixed key pair.
///
/// The codec is immutable after construction and can be shared between threads.
#[derive(Clone)]
pub struct SecureCookieCodec {
    hash_key: Vec<u8>,
    cipher: Option<BlockCipher>,
    max_age: u64,
}

impl SecureCookieCodec {
    pub fn new(keys: &CookieKeys) -> Result<Self, CookieError> {
        let cipher = keys.block_key().map(BlockCipher::new).transpose()?;

        Ok(Self {
            hash_key: keys.hash_key().to_vec(),
            cipher,
            max_age: *SECURE_COOKIE_MAX_AGE,
        })
    }

    /// Reject values older than `seconds` on decode; 0 disables the check
    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age = seconds;
        self
    }

    pub fn max_age(&self) -> u64 {
        self.max_age
    }

    pub fn encrypts(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn encode(&self, name: &str, value: &str) -> Result<String, CookieError> {
        self.encode_at(name, value, Utc::now().timestamp())
    }

    pub(crate) fn encode_at(
        &self,
        name: &str,
        value: &str,
        timestamp: i64,
    ) -> Result<String, CookieError> {
        let payload = match &self.cipher {
            Some(cipher) => {
                let mut sealed = gen_random_bytes(NONCE_LEN)
                    .map_err(|e| CookieError::Encoding(e.to_string()))?;
                let ciphertext = cipher
                    .encrypt(
                        &sealed,
                        Payload {
                            msg: value.as_bytes(),
                            aad: name.as_bytes(),
                        },
                    )
                    .map_err(|_| {
                        CookieError::Encoding("Failed to encrypt cookie value".to_string())
                    })?;
                sealed.extend_from_slice(&ciphertext);
                sealed
            }
            None => value.as_bytes().to_vec(),
        };

        let timestamp = timestamp.to_string();
        let payload = base64url_encode(&payload);
        let mac = self.mac(name, &timestamp, &payload)?;
        let tag = mac.finalize().into_bytes();
        let encoded = format!("{timestamp}.{payload}.{}", base64url_encode(&tag));

        if encoded.len() > MAX_ENCODED_LEN {
            return Err(CookieError::Encoding(format!(
                "Encoded value is {} bytes, limit is {MAX_ENCODED_LEN}",
                encoded.len()
            )));
        }

        Ok(encoded)
    }

    pub fn decode(&self, name: &str, encoded: &str) -> Result<String, CookieError> {
        if encoded.len() > MAX_ENCODED_LEN {
            return Err(CookieError::Verification("Value too long".to_string()));
        }

        let parts: Vec<&str> = encoded.splitn(3, '.').collect();
        let &[timestamp, payload, tag] = parts.as_slice() else {
            return Err(CookieError::Verification("Malformed value".to_string()));
        };

        let tag = base64url_decode(tag)
            .map_err(|_| CookieError::Verification("Malformed MAC".to_string()))?;
        self.mac(name, timestamp, payload)?
            .verify_slice(&tag)
            .map_err(|_| CookieError::Verification("MAC mismatch".to_string()))?;

        let issued_at: i64 = timestamp
            .parse()
            .map_err(|_| CookieError::Verification("Malformed timestamp".to_string()))?;
        if self.max_age > 0 {
            let age = Utc::now().timestamp().saturating_sub(issued_at);
            if age > self.max_age as i64 {
                tracing::debug!("Cookie '{}' expired {} seconds ago", name, age);
                return Err(CookieError::Expired);
            }
        }

        let payload = base64url_decode(payload)
            .map_err(|_| CookieError::Verification("Malformed payload".to_string()))?;

        let plaintext = match &self.cipher {
            Some(cipher) => {
                if payload.len() < NONCE_LEN + TAG_LEN {
                    return Err(CookieError::Decryption("Ciphertext too short".to_string()));
                }
                let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
                cipher
                    .decrypt(
                        nonce,
                        Payload {
                            msg: ciphertext,
                            aad: name.as_bytes(),
                        },
                    )
                    .map_err(|_| {
                        CookieError::Decryption("Failed to decrypt cookie value".to_string())
                    })?
            }
            None => payload,
        };

        String::from_utf8(plaintext)
            .map_err(|_| CookieError::Decryption("Value is not valid UTF-8".to_string()))
    }

    fn mac(&self, name: &str, timestamp: &str, payload: &str) -> Result<HmacSha256, CookieError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.hash_key)
            .map_err(|_| CookieError::Encoding("Invalid hash key".to_string()))?;
        mac.update(name.as_bytes());
        mac.update(b"|");
        mac.update(timestamp.as_bytes());
        mac.update(b"|");
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

impl fmt::Debug for SecureCookieCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCookieCodec")
            .field("encrypts", &self.encrypts())
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}
