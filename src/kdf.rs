//! KDF
//!
//! key = PBKDF2-HMAC-SHA256(passphrase, salt = "crypto_key_salt", iterations, len = 32)
//!
//! The salt is fixed so that any party holding the passphrase derives the
//! same AES key without exchanging anything else.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::aead::AES_KEY_BYTES;

pub const KDF_SALT: &[u8] = b"crypto_key_salt";
pub const DEFAULT_ITERATIONS: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self { iterations: DEFAULT_ITERATIONS }
    }
}

impl KdfParams {
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }
}

pub fn derive_key(passphrase: &str, params: KdfParams) -> Zeroizing<[u8; AES_KEY_BYTES]> {
    derive_with_salt(passphrase.as_bytes(), KDF_SALT, params.iterations)
}

fn derive_with_salt(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Zeroizing<[u8; AES_KEY_BYTES]> {
    let mut out = Zeroizing::new([0u8; AES_KEY_BYTES]);
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out[..]);
    out
}
