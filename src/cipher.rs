//! Passphrase-based text sealing.
//!
//! The passphrase (typically a grammar-generated key) goes through PBKDF2,
//! the result keys AES-256-GCM, and both the ciphertext and nonce travel as
//! standard base64 strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::aead::{self, NONCE_BYTES};
use crate::error::{OpenError, SealError};
use crate::kdf::{self, KdfParams};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedText {
    /// base64(ciphertext || tag)
    pub encrypted: String,
    /// base64(12-byte nonce)
    pub nonce: String,
}

pub fn encrypt_text(
    plaintext: &str,
    passphrase: &str,
    params: KdfParams,
) -> Result<SealedText, SealError> {
    let key = kdf::derive_key(passphrase, params);
    let nonce = aead::nonce()?;
    let ciphertext = aead::aead_seal(&key, &nonce, plaintext.as_bytes())?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed text"
    );

    Ok(SealedText {
        encrypted: STANDARD.encode(&ciphertext),
        nonce: STANDARD.encode(nonce),
    })
}

/// Any malformed field, wrong passphrase or non-UTF-8 result is the same
/// `OpenError`.
pub fn decrypt_text(
    sealed: &SealedText,
    passphrase: &str,
    params: KdfParams,
) -> Result<String, OpenError> {
    let ciphertext = STANDARD.decode(sealed.encrypted.trim()).map_err(|_| OpenError)?;
    let nonce_vec = STANDARD.decode(sealed.nonce.trim()).map_err(|_| OpenError)?;
    let nonce: [u8; NONCE_BYTES] = nonce_vec.as_slice().try_into().map_err(|_| OpenError)?;

    let key = kdf::derive_key(passphrase, params);
    let plaintext = Zeroizing::new(aead::aead_open(&key, &nonce, &ciphertext)?);

    match core::str::from_utf8(&plaintext) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => {
            tracing::debug!("decrypted payload is not utf-8");
            Err(OpenError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KdfParams {
        KdfParams::with_iterations(16)
    }

    #[test]
    fn nonce_is_base64_of_twelve_bytes() {
        let sealed = encrypt_text("x", "k", fast()).unwrap();
        assert_eq!(STANDARD.decode(&sealed.nonce).unwrap().len(), NONCE_BYTES);
    }

    #[test]
    fn short_nonce_rejected() {
        let mut sealed = encrypt_text("x", "k", fast()).unwrap();
        sealed.nonce = STANDARD.encode([0u8; 8]);
        assert_eq!(decrypt_text(&sealed, "k", fast()), Err(OpenError));
    }

    #[test]
    fn non_utf8_plaintext_rejected() {
        let key = kdf::derive_key("k", fast());
        let nonce = aead::nonce().unwrap();
        let ct = aead::aead_seal(&key, &nonce, &[0xff, 0xfe]).unwrap();
        let sealed = SealedText { encrypted: STANDARD.encode(ct), nonce: STANDARD.encode(nonce) };
        assert_eq!(decrypt_text(&sealed, "k", fast()), Err(OpenError));
    }
}
