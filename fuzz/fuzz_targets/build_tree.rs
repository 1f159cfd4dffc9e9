#![no_main]

use grammarkey::{build_tree, layout_tree, parse_rules, ParseStep};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = parse_rules(text);

    // Each line becomes one step's rule string, with a leading seed step.
    let mut steps = vec![ParseStep {
        step: 0,
        symbols: vec!["Start".into()],
        rule_applied: "Start: Start".into(),
        result: "Start".into(),
        rules_meta: Vec::new(),
    }];
    for (i, line) in text.lines().enumerate() {
        steps.push(ParseStep {
            step: i + 1,
            symbols: Vec::new(),
            rule_applied: line.to_string(),
            result: String::new(),
            rules_meta: Vec::new(),
        });
    }

    if let Ok(tree) = build_tree(&steps) {
        let _ = layout_tree(&tree);
    }
});
