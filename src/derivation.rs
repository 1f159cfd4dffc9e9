//! Randomized derivation of keys from the grammar.
//!
//! Every step rewrites all nonterminals of the current sentential form at
//! once, so `Start` takes one step and the `Terminal`s it produces take one
//! more. Each step is recorded for visualization.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::grammar::{Grammar, START, START_LENGTHS, TERMINAL};
use crate::mode::GrammarMode;

/// Largest explicit key length accepted by default.
pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Rule string recorded for the initial step.
pub const INITIAL_RULE: &str = "Start: Start";

/// One rewrite `symbol → production` applied during a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleApplication {
    pub symbol: String,
    pub production: Vec<String>,
}

impl RuleApplication {
    fn render(&self) -> String {
        format!("{} → {}", self.symbol, self.production.join(" "))
    }
}

/// Snapshot of the sentential form after one derivation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStep {
    pub step: usize,
    pub symbols: Vec<String>,
    pub rule_applied: String,
    pub result: String,
    #[serde(default)]
    pub rules_meta: Vec<RuleApplication>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub key: String,
    pub parse_steps: Vec<ParseStep>,
}

pub struct Generator<R = OsRng> {
    grammar: Grammar,
    rng: R,
    max_length: usize,
}

impl Generator<OsRng> {
    pub fn new(modes: &[GrammarMode]) -> Self {
        Self::with_rng(modes, OsRng)
    }
}

impl<R: RngCore + CryptoRng> Generator<R> {
    pub fn with_rng(modes: &[GrammarMode], rng: R) -> Self {
        Self {
            grammar: Grammar::new(modes),
            rng,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Derive a key. `None` or `Some(0)` lets the grammar pick one of the
    /// `Start` productions.
    pub fn generate(&mut self, length: Option<usize>) -> Result<Derivation, GenerateError> {
        let forced = match length {
            Some(0) | None => None,
            Some(n) if n > self.max_length => {
                return Err(GenerateError::LengthTooLarge { requested: n, max: self.max_length })
            }
            Some(n) => Some(n),
        };

        let mut current = vec![START.to_string()];
        let mut steps = vec![ParseStep {
            step: 0,
            symbols: current.clone(),
            rule_applied: INITIAL_RULE.to_string(),
            result: current.concat(),
            rules_meta: Vec::new(),
        }];

        while current.iter().any(|s| Grammar::is_nonterminal(s)) {
            let mut next = Vec::with_capacity(current.len() * 2);
            let mut applied = Vec::new();

            for symbol in &current {
                let production = match symbol.as_str() {
                    START => self.start_production(forced),
                    TERMINAL => vec![self.pick_terminal()],
                    _ => {
                        next.push(symbol.clone());
                        continue;
                    }
                };
                next.extend(production.iter().cloned());
                applied.push(RuleApplication { symbol: symbol.clone(), production });
            }

            let rule_applied = if applied.is_empty() {
                TERMINAL.to_string()
            } else {
                applied.iter().map(RuleApplication::render).collect::<Vec<_>>().join(" | ")
            };

            current = next;
            steps.push(ParseStep {
                step: steps.len(),
                symbols: current.clone(),
                rule_applied,
                result: current.concat(),
                rules_meta: applied,
            });
        }

        let key = current.concat();
        if let Some(last) = steps.last_mut() {
            last.result = key.clone();
        }

        tracing::debug!(
            steps = steps.len(),
            key_len = key.chars().count(),
            alphabet = self.grammar.terminals().len(),
            "derived key"
        );

        Ok(Derivation { key, parse_steps: steps })
    }

    fn start_production(&mut self, forced: Option<usize>) -> Vec<String> {
        let n = match forced {
            Some(n) => n,
            None => *START_LENGTHS.choose(&mut self.rng).unwrap_or(&START_LENGTHS[0]),
        };
        vec![TERMINAL.to_string(); n]
    }

    fn pick_terminal(&mut self) -> String {
        // Grammar::new never leaves the alphabet empty.
        self.grammar
            .terminals()
            .choose(&mut self.rng)
            .map(char::to_string)
            .unwrap_or_default()
    }
}
