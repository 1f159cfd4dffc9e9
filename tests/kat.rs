//! Known answers: fixed constants and the shape of recorded derivations

use rand::rngs::StdRng;
use rand::SeedableRng;

use grammarkey::grammar::{NONTERMINALS, START_LENGTHS};
use grammarkey::{
    shannon_entropy, Generator, GrammarMode, AEAD_TAG_BYTES, DEFAULT_ITERATIONS, KDF_SALT,
    NONCE_BYTES,
};

#[test]
fn test_cipher_constants() {
    assert_eq!(NONCE_BYTES, 12);
    assert_eq!(AEAD_TAG_BYTES, 16);
    assert_eq!(KDF_SALT, b"crypto_key_salt");
    assert_eq!(DEFAULT_ITERATIONS, 100_000);
}

#[test]
fn test_grammar_constants() {
    assert_eq!(NONTERMINALS, ["Start", "Terminal"]);
    assert_eq!(START_LENGTHS, [8, 10, 12, 16]);
}

#[test]
fn test_step_format() {
    let mut generator = Generator::with_rng(&[GrammarMode::Numeric], StdRng::seed_from_u64(1));
    let d = generator.generate(Some(2)).unwrap();

    assert_eq!(d.parse_steps.len(), 3);
    let [s0, s1, s2] = [&d.parse_steps[0], &d.parse_steps[1], &d.parse_steps[2]];

    assert_eq!((s0.step, s1.step, s2.step), (0, 1, 2));
    assert_eq!(s1.rule_applied, "Start → Terminal Terminal");
    assert_eq!(s1.result, "TerminalTerminal");

    let a = &s2.symbols[0];
    let b = &s2.symbols[1];
    assert_eq!(s2.rule_applied, format!("Terminal → {} | Terminal → {}", a, b));
    assert_eq!(s2.result, format!("{}{}", a, b));
    assert_eq!(d.key, s2.result);
}

#[test]
fn test_entropy_known_values() {
    assert_eq!(shannon_entropy("aaaa"), 0.0);
    assert!((shannon_entropy("aabb") - 1.0).abs() < 1e-12);
    // 0..=9 each once
    assert!((shannon_entropy("0123456789") - 10f64.log2()).abs() < 1e-12);
}
