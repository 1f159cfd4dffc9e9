//! Standalone SVG rendering of a laid-out derivation tree.

use core::fmt::Write as _;

use crate::grammar::is_terminal_symbol;
use crate::layout::{compute_bounds, PositionedNode, ViewBox};

pub const NODE_RADIUS: f64 = 20.0;

const TERMINAL_FILL: &str = "#10b981";
const TERMINAL_STROKE: &str = "#059669";
const NONTERMINAL_FILL: &str = "#3b82f6";
const NONTERMINAL_STROKE: &str = "#2563eb";
const EDGE_STROKE: &str = "#64748b";

pub fn render_svg(root: &PositionedNode) -> String {
    let view_box = ViewBox::for_bounds(&compute_bounds(root));
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{vb}" preserveAspectRatio="xMidYMin meet">"#,
        w = view_box.width,
        h = view_box.height,
        vb = view_box,
    );
    render_node(&mut out, root);
    out.push_str("</svg>\n");
    out
}

fn render_node(out: &mut String, node: &PositionedNode) {
    let (fill, stroke) = if is_terminal_symbol(&node.symbol) {
        (TERMINAL_FILL, TERMINAL_STROKE)
    } else {
        (NONTERMINAL_FILL, NONTERMINAL_STROKE)
    };

    let _ = writeln!(out, "<g>");
    let _ = writeln!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
        node.x, node.y, NODE_RADIUS, fill, stroke
    );
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="monospace" font-size="12" font-weight="bold" fill="white">{}</text>"#,
        node.x,
        node.y + 5.0,
        escape_xml(&node.symbol)
    );

    for child in &node.children {
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
            node.x,
            node.y + NODE_RADIUS,
            child.x,
            child.y - NODE_RADIUS,
            EDGE_STROKE
        );
        render_node(out, child);
    }
    let _ = writeln!(out, "</g>");
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
