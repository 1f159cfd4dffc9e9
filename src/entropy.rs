//! Shannon entropy of a key string.
//!
//! `H(X) = -Σ P(x) · log2 P(x)`, counted over Unicode scalar values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Scale used for the strength indicator (bits per symbol of a uniform byte).
pub const MAX_ENTROPY: f64 = 8.0;

pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let n = total as f64;
    counts.values().fold(0.0, |h, &count| {
        let p = count as f64 / n;
        h - p * p.log2()
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyColor {
    Yellow,
    Green,
}

impl EntropyColor {
    pub fn for_entropy(entropy: f64, max_entropy: f64) -> Self {
        if max_entropy == 0.0 || entropy / max_entropy < 0.5 {
            EntropyColor::Yellow
        } else {
            EntropyColor::Green
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntropyColor::Yellow => "yellow",
            EntropyColor::Green => "green",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntropyReport {
    pub entropy: f64,
    pub color: EntropyColor,
    pub max_entropy: f64,
}

impl EntropyReport {
    pub fn measure(text: &str) -> Self {
        let entropy = shannon_entropy(text);
        Self {
            entropy: round4(entropy),
            color: EntropyColor::for_entropy(entropy, MAX_ENTROPY),
            max_entropy: MAX_ENTROPY,
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
