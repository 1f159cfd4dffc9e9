//! Grammar modes: which terminal alphabets a generated key may draw from.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

const DIGITS: &str = "0123456789";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|\\;:'\",.<>/?~`";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarMode {
    Numeric,
    Alphabetic,
    Alphanumeric,
    Symbolic,
}

impl GrammarMode {
    pub const ALL: [GrammarMode; 4] = [
        GrammarMode::Numeric,
        GrammarMode::Alphabetic,
        GrammarMode::Alphanumeric,
        GrammarMode::Symbolic,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "numeric",
            GrammarMode::Alphabetic => "alphabetic",
            GrammarMode::Alphanumeric => "alphanumeric",
            GrammarMode::Symbolic => "symbolic",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "Numeric",
            GrammarMode::Alphabetic => "Alphabetic",
            GrammarMode::Alphanumeric => "Alphanumeric",
            GrammarMode::Symbolic => "Symbolic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GrammarMode::Numeric => "Numbers only (0-9)",
            GrammarMode::Alphabetic => "Letters only (a-z, A-Z)",
            GrammarMode::Alphanumeric => "Letters and numbers (a-z, A-Z, 0-9)",
            GrammarMode::Symbolic => "Special characters only",
        }
    }

    /// Terminal characters contributed by this mode, in grammar order.
    pub fn terminals(&self) -> impl Iterator<Item = char> {
        let parts: &[&'static str] = match self {
            GrammarMode::Numeric => &[DIGITS],
            GrammarMode::Alphabetic => &[LOWER, UPPER],
            GrammarMode::Alphanumeric => &[DIGITS, LOWER, UPPER],
            GrammarMode::Symbolic => &[SYMBOLS],
        };
        parts.iter().flat_map(|s| s.chars())
    }
}

impl fmt::Display for GrammarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GrammarMode {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(GrammarMode::Numeric),
            "alphabetic" => Ok(GrammarMode::Alphabetic),
            "alphanumeric" => Ok(GrammarMode::Alphanumeric),
            "symbolic" => Ok(GrammarMode::Symbolic),
            _ => Err(GenerateError::InvalidModes { invalid: vec![s.to_string()] }),
        }
    }
}

/// Catalog entry served to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<GrammarMode> for ModeInfo {
    fn from(mode: GrammarMode) -> Self {
        Self {
            id: mode.id().to_string(),
            name: mode.name().to_string(),
            description: mode.description().to_string(),
        }
    }
}

pub fn catalog() -> Vec<ModeInfo> {
    GrammarMode::ALL.iter().copied().map(ModeInfo::from).collect()
}

/// Validate a client-supplied mode list.
///
/// Every unknown id is reported at once, not just the first.
pub fn parse_modes<S: AsRef<str>>(ids: &[S]) -> Result<Vec<GrammarMode>, GenerateError> {
    if ids.is_empty() {
        return Err(GenerateError::NoModes);
    }

    let mut modes = Vec::with_capacity(ids.len());
    let mut invalid = Vec::new();
    for id in ids {
        match id.as_ref().parse::<GrammarMode>() {
            Ok(mode) => modes.push(mode),
            Err(_) => {
                let id = id.as_ref().to_string();
                if !invalid.contains(&id) {
                    invalid.push(id);
                }
            }
        }
    }

    if !invalid.is_empty() {
        return Err(GenerateError::InvalidModes { invalid });
    }
    Ok(modes)
}
