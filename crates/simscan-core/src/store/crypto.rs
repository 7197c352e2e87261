//! AES-256-CBC primitives for the encrypted store.
//!
//! Encryption generates a fresh random 16-byte IV per document; decryption
//! is a pure function of (ciphertext, iv, key). The key arrives out-of-band
//! and is never generated or persisted here.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use std::ops::Deref;
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

use crate::error::Error as CoreError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const IV_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum DecryptError {
    #[error("initialization vector must be {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    #[error("ciphertext length {0} is not a positive multiple of the AES block size")]
    InvalidCiphertextLength(usize),

    #[error("bad padding after decryption (wrong key or corrupt ciphertext)")]
    Padding,

    #[error("decrypted bytes are not valid UTF-8 (wrong key or corrupt ciphertext)")]
    Utf8,
}

/// Process-wide 256-bit key. Zeroized on drop.
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        MasterKey(bytes)
    }

    /// Parse a 64-hex-character key, the form it arrives in from the
    /// environment.
    pub fn from_hex(hex_key: &str) -> Result<Self, CoreError> {
        let mut decoded = hex::decode(hex_key.trim()).map_err(|_| CoreError::KeyFormat)?;
        if decoded.len() != KEY_LEN {
            decoded.zeroize();
            return Err(CoreError::KeyFormat);
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(MasterKey(bytes))
    }

    fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Transient decrypted document content. The buffer is zeroized when the
/// handle is dropped; it is never written to durable storage by the core.
#[derive(Debug)]
pub struct Plaintext(Zeroizing<String>);

impl Plaintext {
    pub fn new(text: String) -> Self {
        Plaintext(Zeroizing::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Plaintext {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

/// Encrypt with a freshly generated random IV. Returns (iv, ciphertext).
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> ([u8; IV_LEN], Vec<u8>) {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    (iv, ciphertext)
}

/// Decrypt one document: (ciphertext, iv, key) -> plaintext. Fails with a
/// `DecryptError` when the IV or ciphertext is malformed or the padding
/// does not check out after decryption (wrong key or corruption).
pub fn decrypt(key: &MasterKey, iv: &[u8], ciphertext: &[u8]) -> Result<Plaintext, DecryptError> {
    let iv: [u8; IV_LEN] = iv
        .try_into()
        .map_err(|_| DecryptError::InvalidIvLength(iv.len()))?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(DecryptError::InvalidCiphertextLength(ciphertext.len()));
    }

    let bytes = Aes256CbcDec::new(key.as_bytes().into(), (&iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DecryptError::Padding)?;
    let bytes = Zeroizing::new(bytes);

    let text = std::str::from_utf8(&bytes).map_err(|_| DecryptError::Utf8)?;
    Ok(Plaintext::new(text.to_string()))
}
