//! Property-based tests for the domain crate.
//!
//! Invariants covered:
//! - name-status parsing never panics and never yields more entries than lines
//! - semver recommendation is monotonic in the change set
//! - the verdict depends only on blocking failures

use crate::aggregate::{aggregate, classify};
use crate::changes::{PathFilter, parse_name_status, summarize};
use crate::model::Outcome;
use crate::policy::EffectiveConfig;
use releasegate_types::{CheckStatus, ProjectType, SemverBump, Verdict};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
}

fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..4).prop_map(|parts| parts.join("/"))
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_path().prop_map(|p| format!("A\t{p}")),
        arb_path().prop_map(|p| format!("M\t{p}")),
        arb_path().prop_map(|p| format!("D\t{p}")),
        (arb_path(), arb_path(), 50u8..=100).prop_map(|(a, b, s)| format!("R{s:03}\t{a}\t{b}")),
    ]
}

fn arb_status() -> impl Strategy<Value = CheckStatus> {
    prop_oneof![
        Just(CheckStatus::Pass),
        Just(CheckStatus::Fail),
        Just(CheckStatus::Warn),
        Just(CheckStatus::Skip),
    ]
}

proptest! {
    #[test]
    fn parse_never_panics(text in "\\PC{0,200}") {
        let entries = parse_name_status(&text);
        prop_assert!(entries.len() <= text.lines().count());
    }

    #[test]
    fn adding_a_public_deletion_forces_major(lines in prop::collection::vec(arb_line(), 0..20)) {
        let mut lines = lines;
        lines.push("D\tsrc/public_api.rs".to_string());
        let entries = parse_name_status(&lines.join("\n"));
        let summary = summarize("v1", &entries, &BTreeSet::new(), &PathFilter::default());
        prop_assert_eq!(summary.semver(), SemverBump::Major);
    }

    #[test]
    fn any_change_set_recommends_at_least_patch(lines in prop::collection::vec(arb_line(), 0..20)) {
        let entries = parse_name_status(&lines.join("\n"));
        let summary = summarize("v1", &entries, &BTreeSet::new(), &PathFilter::default());
        prop_assert!(summary.semver() >= SemverBump::Patch);
    }

    #[test]
    fn breaking_list_is_sorted(lines in prop::collection::vec(arb_line(), 0..30)) {
        let entries = parse_name_status(&lines.join("\n"));
        let summary = summarize("v1", &entries, &BTreeSet::new(), &PathFilter::default());
        let mut sorted = summary.breaking.clone();
        sorted.sort();
        prop_assert_eq!(summary.breaking, sorted);
    }

    #[test]
    fn verdict_matches_blocking_failures(
        checks in prop::collection::vec((arb_status(), any::<bool>()), 0..16)
    ) {
        let results: Vec<_> = checks
            .iter()
            .enumerate()
            .map(|(i, (status, blocking))| {
                let outcome = Outcome {
                    status: *status,
                    message: String::new(),
                    detail: None,
                    data: serde_json::Value::Null,
                };
                classify(&format!("check-{i}"), *blocking, outcome)
            })
            .collect();
        let expect_blocked = checks
            .iter()
            .any(|(status, blocking)| *status == CheckStatus::Fail && *blocking);

        let report = aggregate(ProjectType::Generic, ".", results, None, &EffectiveConfig::default());
        let expected = if expect_blocked { Verdict::NotReady } else { Verdict::Ready };
        prop_assert_eq!(report.verdict, expected);
        prop_assert!(report.checks.iter().all(|c| c.blocking || c.status != CheckStatus::Fail));
    }
}
