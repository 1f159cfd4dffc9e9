//! The key grammar.
//!
//! ```text
//! Start    → Terminal^8 | Terminal^10 | Terminal^12 | Terminal^16
//! Terminal → c₁ | c₂ | … | cₙ        (selected mode alphabets, deduplicated)
//! ```

use crate::mode::GrammarMode;

pub const START: &str = "Start";
pub const TERMINAL: &str = "Terminal";

/// Names of every nonterminal, in the order rule strings may mention them.
pub const NONTERMINALS: [&str; 2] = [START, TERMINAL];

/// Lengths of the `Start` productions.
pub const START_LENGTHS: [usize; 4] = [8, 10, 12, 16];

#[derive(Clone, Debug)]
pub struct Grammar {
    modes: Vec<GrammarMode>,
    terminals: Vec<char>,
}

impl Grammar {
    /// Build the grammar for a mode selection. An empty selection means
    /// alphanumeric.
    pub fn new(modes: &[GrammarMode]) -> Self {
        let mut selected: Vec<GrammarMode> = Vec::with_capacity(modes.len());
        for mode in modes {
            if !selected.contains(mode) {
                selected.push(*mode);
            }
        }
        if selected.is_empty() {
            selected.push(GrammarMode::Alphanumeric);
        }

        let mut terminals: Vec<char> = Vec::new();
        for c in selected.iter().flat_map(|m| m.terminals()) {
            if !terminals.contains(&c) {
                terminals.push(c);
            }
        }

        Self { modes: selected, terminals }
    }

    pub fn modes(&self) -> &[GrammarMode] {
        &self.modes
    }

    /// Right-hand sides of `Terminal`, one character each.
    pub fn terminals(&self) -> &[char] {
        &self.terminals
    }

    pub fn is_nonterminal(symbol: &str) -> bool {
        NONTERMINALS.contains(&symbol)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new(&[GrammarMode::Alphanumeric])
    }
}

/// A symbol renders as a terminal when it is exactly one character and
/// not a nonterminal name.
pub fn is_terminal_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    matches!((chars.next(), chars.next()), (Some(_), None)) && !Grammar::is_nonterminal(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_modes_are_deduplicated() {
        let g = Grammar::new(&[GrammarMode::Numeric, GrammarMode::Alphanumeric]);
        assert_eq!(g.terminals().len(), 62);
        assert_eq!(&g.terminals()[..3], &['0', '1', '2']);
        assert_eq!(g.terminals()[10], 'a');
    }

    #[test]
    fn first_seen_order_is_kept() {
        let g = Grammar::new(&[GrammarMode::Symbolic, GrammarMode::Numeric]);
        assert_eq!(g.terminals()[0], '!');
        assert_eq!(g.terminals()[32], '0');
        assert_eq!(g.modes(), &[GrammarMode::Symbolic, GrammarMode::Numeric]);
    }

    #[test]
    fn empty_selection_falls_back_to_alphanumeric() {
        let g = Grammar::new(&[]);
        assert_eq!(g.modes(), &[GrammarMode::Alphanumeric]);
        assert_eq!(g.terminals().len(), 62);
    }

    #[test]
    fn all_modes_union() {
        let g = Grammar::new(&GrammarMode::ALL);
        assert_eq!(g.terminals().len(), 62 + 32);
    }

    #[test]
    fn terminal_symbol_classification() {
        assert!(is_terminal_symbol("a"));
        assert!(is_terminal_symbol("|"));
        assert!(is_terminal_symbol("é"));
        assert!(!is_terminal_symbol("Start"));
        assert!(!is_terminal_symbol("Terminal"));
        assert!(!is_terminal_symbol(""));
        assert!(!is_terminal_symbol("ab"));
    }
}
