//! Tidy top-down layout of a derivation tree.
//!
//! Subtrees are laid out bottom-up. A leaf occupies one `NODE_WIDTH` slot,
//! siblings are packed left to right with `HORIZONTAL_GAP` between them,
//! and every parent is centered over the span of its children. The root
//! lands at x = 0.

use serde::{Deserialize, Serialize};

use crate::tree::ParseTree;

pub const NODE_WIDTH: f64 = 60.0;
pub const HORIZONTAL_GAP: f64 = 40.0;
pub const LEVEL_HEIGHT: f64 = 110.0;
pub const TOP_OFFSET: f64 = 40.0;

/// Extra space kept around each node center when measuring bounds.
pub const NODE_MARGIN: f64 = 40.0;
/// Padding added on each side of the bounds for the SVG viewBox.
pub const VIEW_PADDING: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    /// Horizontal span reserved for this subtree.
    pub width: f64,
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    fn shift(&mut self, dx: f64) {
        self.x += dx;
        for child in &mut self.children {
            child.shift(dx);
        }
    }

    /// Pre-order walk over every node.
    pub fn walk(&self, f: &mut impl FnMut(&PositionedNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

pub fn layout_tree(tree: &ParseTree) -> PositionedNode {
    layout_at(tree, 0)
}

fn layout_at(node: &ParseTree, depth: usize) -> PositionedNode {
    let y = depth as f64 * LEVEL_HEIGHT + TOP_OFFSET;

    if node.children.is_empty() {
        return PositionedNode {
            symbol: node.symbol.clone(),
            x: 0.0,
            y,
            width: NODE_WIDTH,
            children: Vec::new(),
        };
    }

    let mut children: Vec<PositionedNode> =
        node.children.iter().map(|c| layout_at(c, depth + 1)).collect();

    let packed = children.iter().map(|c| c.width).sum::<f64>()
        + HORIZONTAL_GAP * (children.len() - 1) as f64;
    let width = packed.max(NODE_WIDTH);

    let mut cursor = -width / 2.0;
    for child in &mut children {
        let center = cursor + child.width / 2.0;
        cursor += child.width + HORIZONTAL_GAP;
        child.shift(center);
    }

    PositionedNode { symbol: node.symbol.clone(), x: 0.0, y, width, children }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds used when there is nothing to draw.
    pub const EMPTY_TREE: Bounds = Bounds { min_x: -100.0, max_x: 100.0, min_y: 0.0, max_y: 400.0 };

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

pub fn compute_bounds(root: &PositionedNode) -> Bounds {
    let mut b = Bounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    root.walk(&mut |n| {
        b.min_x = b.min_x.min(n.x - NODE_MARGIN);
        b.max_x = b.max_x.max(n.x + NODE_MARGIN);
        b.min_y = b.min_y.min(n.y - NODE_MARGIN);
        b.max_y = b.max_y.max(n.y + NODE_MARGIN);
    });
    b
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn for_bounds(b: &Bounds) -> Self {
        Self {
            x: b.min_x - VIEW_PADDING,
            y: b.min_y - VIEW_PADDING,
            width: b.width() + 2.0 * VIEW_PADDING,
            height: b.height() + 2.0 * VIEW_PADDING,
        }
    }
}

impl core::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(symbol: &str, children: Vec<ParseTree>) -> ParseTree {
        ParseTree { symbol: symbol.into(), children }
    }

    #[test]
    fn leaf_only() {
        let p = layout_tree(&ParseTree::leaf("Start"));
        assert_eq!((p.x, p.y, p.width), (0.0, 40.0, NODE_WIDTH));
        let b = compute_bounds(&p);
        assert_eq!(b, Bounds { min_x: -40.0, max_x: 40.0, min_y: 0.0, max_y: 80.0 });
    }

    #[test]
    fn two_leaves_are_spaced_and_centered() {
        let t = node("Start", vec![ParseTree::leaf("a"), ParseTree::leaf("b")]);
        let p = layout_tree(&t);
        // 60 + 40 + 60 = 160, children at -50 and +50.
        assert_eq!(p.width, 160.0);
        assert_eq!(p.children[0].x, -50.0);
        assert_eq!(p.children[1].x, 50.0);
        assert_eq!(p.children[0].y, 150.0);
    }

    #[test]
    fn single_child_sits_under_parent() {
        let t = node("Terminal", vec![ParseTree::leaf("x")]);
        let p = layout_tree(&t);
        assert_eq!(p.width, NODE_WIDTH);
        assert_eq!(p.children[0].x, 0.0);
    }

    #[test]
    fn subtrees_shift_with_their_parent() {
        let t = node(
            "Start",
            vec![
                node("Terminal", vec![ParseTree::leaf("a")]),
                node("Terminal", vec![ParseTree::leaf("b")]),
                node("Terminal", vec![ParseTree::leaf("c")]),
            ],
        );
        let p = layout_tree(&t);
        let xs: Vec<f64> = p.children.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![-100.0, 0.0, 100.0]);
        for c in &p.children {
            assert_eq!(c.children[0].x, c.x);
            assert_eq!(c.children[0].y, 260.0);
        }
    }

    #[test]
    fn viewbox_pads_bounds() {
        let b = Bounds { min_x: -90.0, max_x: 90.0, min_y: 0.0, max_y: 300.0 };
        let v = ViewBox::for_bounds(&b);
        assert_eq!(v, ViewBox { x: -130.0, y: -40.0, width: 260.0, height: 380.0 });
        assert_eq!(v.to_string(), "-130 -40 260 380");
    }

    #[test]
    fn empty_tree_default_viewbox() {
        let v = ViewBox::for_bounds(&Bounds::EMPTY_TREE);
        assert_eq!(v.to_string(), "-140 -40 280 480");
    }
}
