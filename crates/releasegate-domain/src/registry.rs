//! Check registry: the ordered checks for each project type.
//!
//! Order within a type is fixed and grouped by concern: structural validation, tests,
//! lint/type, security, release process. Reports are parsed downstream, so existing
//! entries must keep their shape; new ecosystems get a new table.

use crate::model::{Action, CheckSpec, CommandTemplate, CoverageFormat, Inspection, Probe};
use releasegate_types::{ids, ProjectType};

const PYTEST_CONFIGS: &[&str] = &["pytest.ini", "pyproject.toml", "setup.cfg", "tox.ini"];

const ESLINT_CONFIGS: &[&str] = &[
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
];

// Python
const PY_TEST: &[CommandTemplate] = &[CommandTemplate::requires(
    &["python", "-m", "pytest", "--cov=.", "--cov-report=term", "-q"],
    Probe::AnyFile(PYTEST_CONFIGS),
)];
const PY_LINT: &[CommandTemplate] = &[
    CommandTemplate::new(&["ruff", "check", "."]),
    CommandTemplate::new(&["flake8", "."]),
];
const PY_TYPECHECK: &[CommandTemplate] =
    &[CommandTemplate::new(&["mypy", ".", "--ignore-missing-imports"])];
const PY_SECURITY: &[CommandTemplate] = &[CommandTemplate::new(&["bandit", "-r", ".", "-q"])];
const PY_DEPENDENCIES: &[CommandTemplate] = &[CommandTemplate::new(&["pip-audit"])];

// Node.js
const NODE_TEST: &[CommandTemplate] = &[CommandTemplate::requires(
    &["npm", "test"],
    Probe::NpmScript("test"),
)];
const NODE_LINT: &[CommandTemplate] = &[
    CommandTemplate::requires(&["npm", "run", "lint"], Probe::NpmScript("lint")),
    CommandTemplate::requires(
        &["npx", "--no-install", "eslint", "."],
        Probe::AnyFile(ESLINT_CONFIGS),
    ),
];
const NODE_SECURITY: &[CommandTemplate] =
    &[CommandTemplate::new(&["npm", "audit", "--omit=dev"])];

// Go
const GO_TEST: &[CommandTemplate] = &[CommandTemplate::new(&["go", "test", "-cover", "./..."])];
const GO_LINT: &[CommandTemplate] = &[CommandTemplate::new(&["golangci-lint", "run"])];
const GO_VET: &[CommandTemplate] = &[CommandTemplate::new(&["go", "vet", "./..."])];

// Rust
const RUST_TEST: &[CommandTemplate] = &[CommandTemplate::new(&["cargo", "test"])];
const RUST_COVERAGE: &[CommandTemplate] = &[CommandTemplate::new(&[
    "cargo-tarpaulin",
    "tarpaulin",
    "--skip-clean",
])];
const RUST_FORMAT: &[CommandTemplate] = &[CommandTemplate::new(&["cargo", "fmt", "--check"])];
const RUST_LINT: &[CommandTemplate] = &[CommandTemplate::new(&[
    "cargo", "clippy", "--", "-D", "warnings",
])];
const RUST_SECURITY: &[CommandTemplate] = &[CommandTemplate::new(&["cargo-audit", "audit"])];

const fn inspect(id: &'static str, inspection: Inspection, blocking: bool) -> CheckSpec {
    CheckSpec {
        id,
        action: Action::Inspect(inspection),
        blocking,
    }
}

const fn command(id: &'static str, commands: &'static [CommandTemplate], blocking: bool) -> CheckSpec {
    CheckSpec {
        id,
        action: Action::Command(commands),
        blocking,
    }
}

const fn coverage(
    commands: &'static [CommandTemplate],
    format: CoverageFormat,
    blocking: bool,
) -> CheckSpec {
    CheckSpec {
        id: ids::CHECK_COVERAGE,
        action: Action::Coverage { commands, format },
        blocking,
    }
}

const CHANGELOG: CheckSpec = inspect(ids::CHECK_CHANGELOG, Inspection::Changelog, true);
const CI_CONFIG: CheckSpec = inspect(ids::CHECK_CI_CONFIG, Inspection::CiConfig, false);
const BREAKING_CHANGES: CheckSpec = CheckSpec {
    id: ids::CHECK_BREAKING_CHANGES,
    action: Action::ChangeScan,
    blocking: false,
};
const MANIFEST: CheckSpec = inspect(ids::CHECK_MANIFEST, Inspection::Manifest, true);

static CLAUDE_PLUGIN_CHECKS: &[CheckSpec] = &[
    inspect(ids::CHECK_PLUGIN_MANIFEST, Inspection::PluginManifest, true),
    inspect(ids::CHECK_AGENTS, Inspection::Agents, true),
    inspect(ids::CHECK_SKILLS, Inspection::Skills, true),
    inspect(ids::CHECK_COMMANDS, Inspection::Commands, false),
    CHANGELOG,
    CI_CONFIG,
    BREAKING_CHANGES,
];

static PYTHON_CHECKS: &[CheckSpec] = &[
    MANIFEST,
    command(ids::CHECK_TESTS, PY_TEST, true),
    coverage(PY_TEST, CoverageFormat::Pytest, true),
    command(ids::CHECK_LINT, PY_LINT, true),
    command(ids::CHECK_TYPECHECK, PY_TYPECHECK, false),
    command(ids::CHECK_SECURITY, PY_SECURITY, false),
    command(ids::CHECK_DEPENDENCIES, PY_DEPENDENCIES, false),
    CHANGELOG,
    CI_CONFIG,
    BREAKING_CHANGES,
];

static NODEJS_CHECKS: &[CheckSpec] = &[
    MANIFEST,
    command(ids::CHECK_TESTS, NODE_TEST, true),
    command(ids::CHECK_LINT, NODE_LINT, true),
    command(ids::CHECK_SECURITY, NODE_SECURITY, false),
    CHANGELOG,
    CI_CONFIG,
    BREAKING_CHANGES,
];

static GO_CHECKS: &[CheckSpec] = &[
    MANIFEST,
    command(ids::CHECK_TESTS, GO_TEST, true),
    coverage(GO_TEST, CoverageFormat::GoTest, true),
    command(ids::CHECK_LINT, GO_LINT, false),
    command(ids::CHECK_VET, GO_VET, false),
    CHANGELOG,
    CI_CONFIG,
    BREAKING_CHANGES,
];

static RUST_CHECKS: &[CheckSpec] = &[
    MANIFEST,
    command(ids::CHECK_TESTS, RUST_TEST, true),
    coverage(RUST_COVERAGE, CoverageFormat::Tarpaulin, false),
    command(ids::CHECK_FORMAT, RUST_FORMAT, true),
    command(ids::CHECK_LINT, RUST_LINT, false),
    command(ids::CHECK_SECURITY, RUST_SECURITY, false),
    CHANGELOG,
    CI_CONFIG,
    BREAKING_CHANGES,
];

static GENERIC_CHECKS: &[CheckSpec] = &[CHANGELOG, CI_CONFIG, BREAKING_CHANGES];

/// Ordered checks applicable to `project_type`.
pub fn checks_for(project_type: ProjectType) -> &'static [CheckSpec] {
    match project_type {
        ProjectType::ClaudePlugin => CLAUDE_PLUGIN_CHECKS,
        ProjectType::Python => PYTHON_CHECKS,
        ProjectType::NodeJs => NODEJS_CHECKS,
        ProjectType::Go => GO_CHECKS,
        ProjectType::Rust => RUST_CHECKS,
        ProjectType::Generic => GENERIC_CHECKS,
    }
}

/// Look up a check by ID within a project type's catalog.
pub fn find(project_type: ProjectType, id: &str) -> Option<&'static CheckSpec> {
    checks_for(project_type).iter().find(|spec| spec.id == id)
}
