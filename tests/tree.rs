use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use grammarkey::layout::{HORIZONTAL_GAP, LEVEL_HEIGHT, NODE_WIDTH, TOP_OFFSET};
use grammarkey::{
    build_tree, compute_bounds, layout_tree, visualize, Generator, GrammarMode, ParseStep,
    ParseTree, PositionedNode, RuleApplication,
};
use grammarkey::tree::MAX_NODES;

fn derive(length: usize, seed: u64) -> Vec<ParseStep> {
    Generator::with_rng(&GrammarMode::ALL, StdRng::seed_from_u64(seed))
        .generate(Some(length))
        .unwrap()
        .parse_steps
}

fn strip_meta(steps: &[ParseStep]) -> Vec<ParseStep> {
    steps
        .iter()
        .cloned()
        .map(|mut s| {
            s.rules_meta.clear();
            s
        })
        .collect()
}

#[test]
fn generated_steps_rebuild_the_key() {
    let steps = derive(16, 3);
    let tree = build_tree(&steps).unwrap();
    assert_eq!(tree.symbol, "Start");
    assert_eq!(tree.children.len(), 16);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.frontier(), steps.last().unwrap().result);
}

#[test]
fn rule_strings_and_metadata_agree() {
    // Symbolic alphabet includes '|', which the string parser must survive.
    for seed in 0..32 {
        let steps = derive(12, seed);
        let from_meta = build_tree(&steps).unwrap();
        let from_text = build_tree(&strip_meta(&steps)).unwrap();
        assert_eq!(from_meta, from_text, "seed {}", seed);
    }
}

#[test]
fn initial_step_alone_is_a_single_node() {
    let steps = derive(4, 0);
    let tree = build_tree(&steps[..1]).unwrap();
    assert_eq!(tree, ParseTree::leaf("Start"));
}

#[test]
fn unknown_rule_heads_are_ignored() {
    let mut steps = derive(2, 9);
    steps[1].rules_meta[0].symbol = "Nope".into();
    let tree = build_tree(&steps).unwrap();
    assert!(tree.children.is_empty());
}

#[test]
fn visualize_pipeline() {
    let steps = derive(8, 5);
    let view = visualize(&steps).unwrap();
    assert_eq!(view.tree.children.len(), 8);
    // 8 slots of 60 with 7 gaps of 40 = 760 wide, leaves at ±(760/2 - 30) = ±350
    assert_eq!(view.tree.width, 760.0);
    assert_eq!(view.bounds.min_x, -350.0 - 40.0);
    assert_eq!(view.bounds.max_x, 350.0 + 40.0);
    assert_eq!(view.view_box, "-430 -40 860 380");
    assert_eq!(view.svg.matches("<circle").count(), 1 + 8 + 8);
}

#[test]
fn replay_at_node_cap_finishes_quickly() {
    let n = (MAX_NODES - 1) / 2;
    let start = RuleApplication { symbol: "Start".into(), production: vec!["Terminal".into(); n] };
    let leaf = RuleApplication { symbol: "Terminal".into(), production: vec!["a".into()] };
    let step = |i: usize, rules_meta: Vec<RuleApplication>| ParseStep {
        step: i,
        symbols: Vec::new(),
        rule_applied: String::new(),
        result: String::new(),
        rules_meta,
    };
    let steps = vec![
        step(0, Vec::new()),
        step(1, vec![start]),
        step(2, vec![leaf; n]),
    ];

    let began = Instant::now();
    let view = visualize(&steps).unwrap();
    let took = began.elapsed();

    assert_eq!(view.tree.children.len(), n);
    assert!(view.tree.children.iter().all(|t| t.children.len() == 1));
    assert!(took < Duration::from_secs(5), "replay of {} nodes took {:?}", 1 + 2 * n, took);
}

fn arb_tree() -> impl Strategy<Value = ParseTree> {
    let leaf = "[a-z]".prop_map(ParseTree::leaf);
    leaf.prop_recursive(4, 64, 5, |inner| {
        prop::collection::vec(inner, 1..5)
            .prop_map(|children| ParseTree { symbol: "Terminal".into(), children })
    })
}

fn check_centered(node: &PositionedNode, depth: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(node.y, depth as f64 * LEVEL_HEIGHT + TOP_OFFSET);
    prop_assert!(node.width >= NODE_WIDTH);
    if node.children.is_empty() {
        return Ok(());
    }
    let first = &node.children[0];
    let last = &node.children[node.children.len() - 1];
    let left = first.x - first.width / 2.0;
    let right = last.x + last.width / 2.0;
    let mid = (left + right) / 2.0;
    prop_assert!((mid - node.x).abs() < 1e-9, "parent {} not centered over {}", node.x, mid);
    prop_assert!((right - left - node.width).abs() < 1e-9);
    for pair in node.children.windows(2) {
        let spacing = pair[1].x - pair[0].x;
        let needed = (pair[0].width + pair[1].width) / 2.0 + HORIZONTAL_GAP;
        prop_assert!((spacing - needed).abs() < 1e-9);
    }
    for child in &node.children {
        check_centered(child, depth + 1)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn layout_centers_every_parent(tree in arb_tree()) {
        let positioned = layout_tree(&tree);
        prop_assert_eq!(positioned.x, 0.0);
        check_centered(&positioned, 0)?;
    }

    #[test]
    fn bounds_are_symmetric_about_root(tree in arb_tree()) {
        let b = compute_bounds(&layout_tree(&tree));
        prop_assert!(b.min_x <= -40.0 && b.max_x >= 40.0);
        prop_assert_eq!(b.min_y, 0.0);
    }
}
