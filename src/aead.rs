//! AEAD: AES-256-GCM

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use getrandom::getrandom;

use crate::error::{OpenError, SealError};

pub const AES_KEY_BYTES: usize = 32;
pub const NONCE_BYTES: usize = 12;
pub const AEAD_TAG_BYTES: usize = 16;

/// Generate a random 12-byte nonce. Used during encryption only.
pub fn nonce() -> Result<[u8; NONCE_BYTES], SealError> {
    let mut n = [0u8; NONCE_BYTES];
    getrandom(&mut n).map_err(|_| SealError)?;
    Ok(n)
}

/// Returns ciphertext || tag.
pub fn aead_seal(
    key: &[u8; AES_KEY_BYTES],
    nonce: &[u8; NONCE_BYTES],
    plaintext: &[u8],
) -> Result<Vec<u8>, SealError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| SealError)?;
    cipher.encrypt(Nonce::from_slice(nonce), plaintext).map_err(|_| SealError)
}

pub fn aead_open(
    key: &[u8; AES_KEY_BYTES],
    nonce: &[u8; NONCE_BYTES],
    ciphertext: &[u8],
) -> Result<Vec<u8>, OpenError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| OpenError)?;
    cipher.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|_| OpenError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_appends_tag() {
        let key = [7u8; AES_KEY_BYTES];
        let n = nonce().unwrap();
        let ct = aead_seal(&key, &n, b"abc").unwrap();
        assert_eq!(ct.len(), 3 + AEAD_TAG_BYTES);
        assert_eq!(aead_open(&key, &n, &ct).unwrap(), b"abc");
    }

    #[test]
    fn flipped_bit_fails() {
        let key = [7u8; AES_KEY_BYTES];
        let n = nonce().unwrap();
        let mut ct = aead_seal(&key, &n, b"abc").unwrap();
        ct[0] ^= 0x01;
        assert_eq!(aead_open(&key, &n, &ct), Err(OpenError));
    }

    #[test]
    fn nonces_differ() {
        assert_ne!(nonce().unwrap(), nonce().unwrap());
    }
}
