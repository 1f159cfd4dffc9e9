//! # grammarkey
//!
//! Grammar-derived key generation with a replayable derivation, plus the
//! tooling around it: Shannon entropy scoring, passphrase-based AES-256-GCM
//! text sealing, and a tidy tree layout that renders the derivation as SVG.
//!
//! ## Quick Start
//!
//! ```rust
//! use grammarkey::{visualize, EntropyReport, Generator, GrammarMode};
//!
//! let mut generator = Generator::new(&[GrammarMode::Alphanumeric, GrammarMode::Symbolic]);
//! let derivation = generator.generate(Some(12)).unwrap();
//! assert_eq!(derivation.key.chars().count(), 12);
//!
//! let report = EntropyReport::measure(&derivation.key);
//! assert!(report.entropy <= report.max_entropy);
//!
//! let view = visualize(&derivation.parse_steps).unwrap();
//! assert!(view.svg.starts_with("<svg"));
//! ```
//!
//! ## Sealing text
//!
//! ```rust
//! use grammarkey::{decrypt_text, encrypt_text, KdfParams};
//!
//! let params = KdfParams::with_iterations(1_000);
//! let sealed = encrypt_text("attack at dawn", "k3y!", params).unwrap();
//! assert_eq!(decrypt_text(&sealed, "k3y!", params).unwrap(), "attack at dawn");
//! assert!(decrypt_text(&sealed, "wrong", params).is_err());
//! ```

#![deny(unsafe_code)]

// ---------------------------------------------------------------------------
// Internal modules
// ---------------------------------------------------------------------------

mod aead;
mod error;
mod kdf;

// ---------------------------------------------------------------------------
// Public modules
// ---------------------------------------------------------------------------

pub mod cipher;
pub mod derivation;
pub mod entropy;
pub mod grammar;
pub mod layout;
pub mod mode;
pub mod svg;
pub mod tree;

pub use cipher::{decrypt_text, encrypt_text, SealedText};
pub use derivation::{Derivation, Generator, ParseStep, RuleApplication, DEFAULT_MAX_LENGTH};
pub use entropy::{shannon_entropy, EntropyColor, EntropyReport, MAX_ENTROPY};
pub use error::{GenerateError, OpenError, SealError, TreeError};
pub use grammar::{is_terminal_symbol, Grammar};
pub use kdf::{KdfParams, DEFAULT_ITERATIONS, KDF_SALT};
pub use layout::{compute_bounds, layout_tree, Bounds, PositionedNode, ViewBox};
pub use mode::{catalog, parse_modes, GrammarMode, ModeInfo};
pub use svg::render_svg;
pub use tree::{build_tree, parse_rules, ParseTree};

pub use aead::{AEAD_TAG_BYTES, NONCE_BYTES};

// ---------------------------------------------------------------------------
// Visualization pipeline
// ---------------------------------------------------------------------------

/// Everything needed to draw a derivation.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TreeView {
    pub tree: PositionedNode,
    pub bounds: Bounds,
    pub view_box: String,
    pub svg: String,
}

/// steps → tree → layout → bounds → SVG
pub fn visualize(steps: &[ParseStep]) -> Result<TreeView, TreeError> {
    let tree = build_tree(steps)?;
    let positioned = layout_tree(&tree);
    let bounds = compute_bounds(&positioned);
    let view_box = ViewBox::for_bounds(&bounds).to_string();
    let svg = render_svg(&positioned);

    tracing::debug!(
        steps = steps.len(),
        nodes = tree.node_count(),
        height = tree.height(),
        "laid out derivation tree"
    );

    Ok(TreeView { tree: positioned, bounds, view_box, svg })
}
