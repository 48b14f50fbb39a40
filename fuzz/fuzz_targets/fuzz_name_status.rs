//! Fuzz target for `git diff --name-status` parsing and classification.
//!
//! Goal: parsing and summarizing should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_name_status
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use releasegate_domain::changes::{PathFilter, parse_name_status, summarize};
use std::collections::BTreeSet;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let entries = parse_name_status(&text);

    let top_level: BTreeSet<String> = entries
        .iter()
        .take(4)
        .map(|e| e.path.top_level().to_string())
        .collect();
    let Ok(filter) = PathFilter::new(&[]) else {
        return;
    };
    let summary = summarize("v0.0.0", &entries, &top_level, &filter);
    let _ = summary.semver();
});
