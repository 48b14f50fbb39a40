//! Stable identifiers for checks.
//!
//! Report consumers parse these; existing IDs must never be renamed.

// Structural
pub const CHECK_PLUGIN_MANIFEST: &str = "plugin.json";
pub const CHECK_AGENTS: &str = "agents";
pub const CHECK_SKILLS: &str = "skills";
pub const CHECK_COMMANDS: &str = "commands";
pub const CHECK_MANIFEST: &str = "manifest";

// Tests
pub const CHECK_TESTS: &str = "tests";
pub const CHECK_COVERAGE: &str = "coverage";

// Lint / type
pub const CHECK_FORMAT: &str = "format";
pub const CHECK_LINT: &str = "lint";
pub const CHECK_TYPECHECK: &str = "typecheck";
pub const CHECK_VET: &str = "vet";

// Security
pub const CHECK_SECURITY: &str = "security";
pub const CHECK_DEPENDENCIES: &str = "dependencies";

// Release process
pub const CHECK_CHANGELOG: &str = "changelog";
pub const CHECK_CI_CONFIG: &str = "ci-config";
pub const CHECK_BREAKING_CHANGES: &str = "breaking-changes";

/// Every known check ID, in catalog order.
pub const ALL_CHECK_IDS: &[&str] = &[
    CHECK_PLUGIN_MANIFEST,
    CHECK_AGENTS,
    CHECK_SKILLS,
    CHECK_COMMANDS,
    CHECK_MANIFEST,
    CHECK_TESTS,
    CHECK_COVERAGE,
    CHECK_FORMAT,
    CHECK_LINT,
    CHECK_TYPECHECK,
    CHECK_VET,
    CHECK_SECURITY,
    CHECK_DEPENDENCIES,
    CHECK_CHANGELOG,
    CHECK_CI_CONFIG,
    CHECK_BREAKING_CHANGES,
];

/// Environment variable consulted for the coverage threshold.
pub const ENV_COVERAGE_THRESHOLD: &str = "RELEASEGATE_COVERAGE_THRESHOLD";

/// Default project-local config file name.
pub const CONFIG_FILE_NAME: &str = "releasegate.toml";
