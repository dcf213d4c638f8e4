//! Symmetric cipher seam.
//!
//! The codec core never picks an algorithm; callers inject a [`CipherPort`].
//! [`PinCipher`] is the implementation shipped with the CLI: a PIN runs
//! through PBKDF2-HMAC-SHA256 and records are sealed with ChaCha20Poly1305.

use crate::error::{Result, SeedkitError};
use async_trait::async_trait;
use bip39::rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};

pub const SALT_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
const PBKDF2_ROUNDS: u32 = 100_000;

/// External cipher interface. Keys, IVs and ciphertext travel hex-encoded.
#[async_trait]
pub trait CipherPort: Send + Sync {
    async fn encrypt(&self, plaintext: &str, key: &str, iv: &str) -> Result<String>;
    async fn decrypt(&self, ciphertext: &str, key: &str, iv: &str) -> Result<String>;
}

/// PIN-derived ChaCha20Poly1305 cipher.
pub struct PinCipher;

impl PinCipher {
    /// Derive a hex key from a PIN using PBKDF2
    pub fn derive_key(pin: &str, salt: &[u8]) -> String {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
        hex::encode(key)
    }

    pub fn generate_salt() -> [u8; SALT_SIZE] {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        salt
    }

    /// Fresh hex IV for a new record.
    pub fn generate_iv() -> String {
        let mut iv = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut iv);
        hex::encode(iv)
    }

    fn build(key: &str, iv: &str) -> Result<(ChaCha20Poly1305, Nonce)> {
        let key_bytes = hex::decode(key)
            .map_err(|e| SeedkitError::cipher(format!("Invalid key encoding: {}", e)))?;
        if key_bytes.len() != 32 {
            return Err(SeedkitError::cipher(format!(
                "Key must be 32 bytes, got {}",
                key_bytes.len()
            )));
        }
        let nonce_bytes = hex::decode(iv)
            .map_err(|e| SeedkitError::cipher(format!("Invalid IV encoding: {}", e)))?;
        if nonce_bytes.len() != NONCE_SIZE {
            return Err(SeedkitError::cipher(format!(
                "IV must be {} bytes, got {}",
                NONCE_SIZE,
                nonce_bytes.len()
            )));
        }
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&key_bytes));
        Ok((cipher, *Nonce::from_slice(&nonce_bytes)))
    }
}

#[async_trait]
impl CipherPort for PinCipher {
    async fn encrypt(&self, plaintext: &str, key: &str, iv: &str) -> Result<String> {
        let (cipher, nonce) = Self::build(key, iv)?;
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| SeedkitError::cipher(format!("Encryption failed: {}", e)))?;
        Ok(hex::encode(ciphertext))
    }

    async fn decrypt(&self, ciphertext: &str, key: &str, iv: &str) -> Result<String> {
        let (cipher, nonce) = Self::build(key, iv)?;
        let ciphertext = hex::decode(ciphertext)
            .map_err(|e| SeedkitError::cipher(format!("Invalid ciphertext encoding: {}", e)))?;
        let plaintext = cipher
            .decrypt(&nonce, ciphertext.as_ref())
            .map_err(|e| SeedkitError::cipher(format!("Decryption failed: {}", e)))?;
        String::from_utf8(plaintext)
            .map_err(|e| SeedkitError::cipher(format!("Decrypted payload is not UTF-8: {}", e)))
    }
}
