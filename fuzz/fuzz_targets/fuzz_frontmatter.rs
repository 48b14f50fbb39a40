//! Fuzz target for markdown frontmatter and changelog parsing.
//!
//! Goal: The parsers should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_frontmatter
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = releasegate_repo::fuzz::parse_frontmatter(text);
        releasegate_repo::fuzz::evaluate_changelog(text);
    }
});
