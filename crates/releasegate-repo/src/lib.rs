//! Repository adapters: detect the project type, inspect structure, read project config.
//!
//! This crate is allowed to do filesystem IO. It never spawns external processes;
//! command execution and git queries live in the runner.

#![forbid(unsafe_code)]

mod detect;
mod frontmatter;
mod inspect;
mod native;
mod probe;

pub use detect::detect_project_type;
pub use inspect::run_inspection;
pub use native::native_coverage_threshold;
pub use probe::{describe_probe, probe_satisfied};

/// Fuzz-friendly API for parser robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a markdown file with optional YAML frontmatter.
    ///
    /// Returns `Err(...)` when frontmatter is opened but not closed, or is not a YAML
    /// mapping. **Never panics** on any input.
    pub fn parse_frontmatter(text: &str) -> anyhow::Result<()> {
        let _ = crate::frontmatter::parse_frontmatter(text)?;
        Ok(())
    }

    /// Evaluate arbitrary text as a `CHANGELOG.md`. **Never panics** on any input.
    pub fn evaluate_changelog(text: &str) {
        let _ = crate::inspect::changelog::evaluate_changelog(text);
    }
}
