//! Error types for grammarkey.

use thiserror::Error;

use crate::mode::GrammarMode;

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("At least one mode must be selected")]
    NoModes,

    #[error("Invalid modes: {}. Must be one or more of: {}", format_list(.invalid), format_valid())]
    InvalidModes { invalid: Vec<String> },

    #[error("Requested length {requested} exceeds the maximum of {max}")]
    LengthTooLarge { requested: usize, max: usize },
}

fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s)).collect();
    format!("[{}]", quoted.join(", "))
}

fn format_valid() -> String {
    let ids: Vec<String> = GrammarMode::ALL.iter().map(|m| m.id().to_string()).collect();
    format_list(&ids)
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("parse_steps must contain at least one step")]
    NoSteps,

    #[error("derivation tree deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("derivation tree larger than {max} nodes")]
    TooLarge { max: usize },
}

// ---------------------------------------------------------------------------
// Cipher
// ---------------------------------------------------------------------------

/// Encryption could not complete (RNG or cipher init failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("encryption failed")]
pub struct SealError;

/// Every decryption failure collapses into this one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("decryption failed")]
pub struct OpenError;
