//! Rebuilding the derivation tree from recorded parse steps.
//!
//! Steps record a flat sentential form, so the tree is recovered by
//! replaying each step's rewrites: every `A → x y z` expands the first
//! unexpanded `A` leaf in pre-order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::derivation::{ParseStep, RuleApplication};
use crate::error::TreeError;
use crate::grammar::{is_terminal_symbol, NONTERMINALS, START, TERMINAL};

/// Deepest tree accepted from untrusted steps.
pub const MAX_DEPTH: usize = 64;
/// Largest tree accepted from untrusted steps.
pub const MAX_NODES: usize = 50_000;

const ARROW: char = '→';

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree {
    pub symbol: String,
    #[serde(default)]
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn leaf(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), children: Vec::new() }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        is_terminal_symbol(&self.symbol)
    }

    /// Number of levels; a lone leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(ParseTree::height).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseTree::node_count).sum::<usize>()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children.iter().map(ParseTree::leaf_count).sum()
    }

    /// Concatenated leaf symbols, left to right.
    pub fn frontier(&self) -> String {
        if self.is_leaf() {
            return self.symbol.clone();
        }
        self.children.iter().map(ParseTree::frontier).collect()
    }
}

/// Split a `rule_applied` string into rewrites.
///
/// Segments are separated by `" | "` only where the next segment opens with
/// a nonterminal and an arrow, so `|` as a terminal survives.
pub fn parse_rules(rule_applied: &str) -> Vec<RuleApplication> {
    if rule_applied.is_empty() || rule_applied == TERMINAL {
        return Vec::new();
    }

    split_segments(rule_applied)
        .into_iter()
        .filter_map(parse_segment)
        .collect()
}

fn split_segments(s: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut search = 0;
    while let Some(rel) = s[search..].find(" | ") {
        let at = search + rel;
        let rest = &s[at + 3..];
        if nonterminal_arrow(rest).is_some() {
            segments.push(&s[start..at]);
            start = at + 3;
        }
        search = at + 1;
    }
    segments.push(&s[start..]);
    segments
}

/// If `s` opens with `<Nonterminal>\s*→`, return that nonterminal and the
/// text after the arrow.
fn nonterminal_arrow(s: &str) -> Option<(&'static str, &str)> {
    NONTERMINALS.iter().find_map(|&name| {
        let after = s.strip_prefix(name)?;
        let after = after.trim_start().strip_prefix(ARROW)?;
        Some((name, after))
    })
}

fn parse_segment(segment: &str) -> Option<RuleApplication> {
    // Leftmost position where a rule head starts.
    let (symbol, production) = segment
        .char_indices()
        .find_map(|(i, _)| nonterminal_arrow(&segment[i..]))?;

    let production: Vec<String> = production.split_whitespace().map(str::to_string).collect();
    if production.is_empty() {
        return None;
    }
    Some(RuleApplication { symbol: symbol.to_string(), production })
}

fn step_rules(step: &ParseStep) -> Vec<RuleApplication> {
    if !step.rules_meta.is_empty() {
        return step.rules_meta.clone();
    }
    parse_rules(&step.rule_applied)
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Arena the replay grows before it is folded into a `ParseTree`.
struct Replay {
    symbols: Vec<String>,
    children: Vec<Vec<usize>>,
    /// Childless nodes per symbol, keyed by their path from the root.
    /// Paths compare lexicographically in pre-order.
    pending: HashMap<String, BTreeMap<Vec<usize>, usize>>,
}

impl Replay {
    fn new(root: &str) -> Self {
        let mut replay = Self {
            symbols: Vec::new(),
            children: Vec::new(),
            pending: HashMap::new(),
        };
        replay.push_leaf(root, Vec::new());
        replay
    }

    fn len(&self) -> usize {
        self.symbols.len()
    }

    fn push_leaf(&mut self, symbol: &str, path: Vec<usize>) -> usize {
        let id = self.symbols.len();
        self.symbols.push(symbol.to_string());
        self.children.push(Vec::new());
        self.park(symbol, path, id);
        id
    }

    fn park(&mut self, symbol: &str, path: Vec<usize>, id: usize) {
        self.pending.entry(symbol.to_string()).or_default().insert(path, id);
    }

    /// Remove and return the first childless `symbol` node in pre-order.
    fn take_first(&mut self, symbol: &str) -> Option<(Vec<usize>, usize)> {
        self.pending.get_mut(symbol)?.pop_first()
    }

    fn into_tree(mut self) -> ParseTree {
        self.fold(0)
    }

    fn fold(&mut self, id: usize) -> ParseTree {
        let children = std::mem::take(&mut self.children[id]);
        ParseTree {
            symbol: std::mem::take(&mut self.symbols[id]),
            children: children.into_iter().map(|c| self.fold(c)).collect(),
        }
    }
}

/// Replay `steps` into a tree rooted at `Start`.
///
/// Rules whose head has no unexpanded leaf are ignored, matching how a
/// partial or foreign step list still renders as much as it can.
pub fn build_tree(steps: &[ParseStep]) -> Result<ParseTree, TreeError> {
    if steps.is_empty() {
        return Err(TreeError::NoSteps);
    }

    let mut replay = Replay::new(START);

    for step in &steps[1..] {
        for rule in step_rules(step) {
            let production: Vec<&str> = rule
                .production
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();

            let Some((path, id)) = replay.take_first(&rule.symbol) else {
                continue;
            };
            if path.len() + 1 >= MAX_DEPTH {
                return Err(TreeError::TooDeep { max: MAX_DEPTH });
            }
            if replay.len() + production.len() > MAX_NODES {
                return Err(TreeError::TooLarge { max: MAX_NODES });
            }
            if production.is_empty() {
                replay.park(&rule.symbol, path, id);
                continue;
            }

            for (i, symbol) in production.into_iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                let child = replay.push_leaf(symbol, child_path);
                replay.children[id].push(child);
            }
        }
    }

    Ok(replay.into_tree())
}
