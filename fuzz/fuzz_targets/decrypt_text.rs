#![no_main]

use grammarkey::{decrypt_text, KdfParams, SealedText};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static KDF: Lazy<KdfParams> = Lazy::new(|| KdfParams::with_iterations(1));

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut parts = text.splitn(3, '\n');
    let encrypted = parts.next().unwrap_or_default().to_string();
    let nonce = parts.next().unwrap_or_default().to_string();
    let key = parts.next().unwrap_or_default();

    let sealed = SealedText { encrypted, nonce };
    let _ = decrypt_text(&sealed, key, *KDF);
});
