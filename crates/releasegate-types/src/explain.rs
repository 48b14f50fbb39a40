//! Explain registry for checks.
//!
//! Maps check IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check.
    pub title: &'static str,
    /// What the check inspects or runs.
    pub description: &'static str,
    /// How to fix a failing or skipped check.
    pub remediation: &'static str,
    /// External tools the check may invoke, in fallback order.
    pub tools: &'static [&'static str],
}

/// Look up an explanation by check ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_PLUGIN_MANIFEST => Some(explain_plugin_manifest()),
        ids::CHECK_AGENTS => Some(explain_agents()),
        ids::CHECK_SKILLS => Some(explain_skills()),
        ids::CHECK_COMMANDS => Some(explain_commands()),
        ids::CHECK_MANIFEST => Some(explain_manifest()),
        ids::CHECK_TESTS => Some(explain_tests()),
        ids::CHECK_COVERAGE => Some(explain_coverage()),
        ids::CHECK_FORMAT => Some(explain_format()),
        ids::CHECK_LINT => Some(explain_lint()),
        ids::CHECK_TYPECHECK => Some(explain_typecheck()),
        ids::CHECK_VET => Some(explain_vet()),
        ids::CHECK_SECURITY => Some(explain_security()),
        ids::CHECK_DEPENDENCIES => Some(explain_dependencies()),
        ids::CHECK_CHANGELOG => Some(explain_changelog()),
        ids::CHECK_CI_CONFIG => Some(explain_ci_config()),
        ids::CHECK_BREAKING_CHANGES => Some(explain_breaking_changes()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    ids::ALL_CHECK_IDS
}

fn explain_plugin_manifest() -> Explanation {
    Explanation {
        title: "Plugin Manifest",
        description: "\
Reads `.claude-plugin/plugin.json` (or `plugin.json` at the root) and verifies it is a
JSON object carrying the `name`, `version` and `description` fields.",
        remediation: "\
Create the manifest if it is missing and add every field named in the failure message.
Only presence and JSON syntax are checked, not the values themselves.",
        tools: &[],
    }
}

fn explain_agents() -> Explanation {
    Explanation {
        title: "Agent Frontmatter",
        description: "\
Every `agents/**/*.md` file must open with a YAML frontmatter block (`---` ... `---`)
that sets a non-empty `name` and `description`.",
        remediation: "\
Add or close the frontmatter block in each file listed in the detail output.",
        tools: &[],
    }
}

fn explain_skills() -> Explanation {
    Explanation {
        title: "Skill Definitions",
        description: "\
Every directory under `skills/` must contain a `SKILL.md` whose YAML frontmatter sets a
non-empty `name` and `description`.",
        remediation: "\
Add the missing `SKILL.md` files or fix their frontmatter.",
        tools: &[],
    }
}

fn explain_commands() -> Explanation {
    Explanation {
        title: "Slash Commands",
        description: "\
Counts `commands/**/*.md` files. Frontmatter is optional, but an opened block must be
closed and parse as YAML.",
        remediation: "\
Close or remove the broken frontmatter block in the listed command files.",
        tools: &[],
    }
}

fn explain_manifest() -> Explanation {
    Explanation {
        title: "Package Manifest",
        description: "\
Checks the ecosystem manifest for presence and syntax: `pyproject.toml` name/version,
`package.json` name/version, the `go.mod` module directive, or `Cargo.toml` package
name/version (workspace inheritance and virtual manifests are accepted).",
        remediation: "\
Add the fields named in the failure message to the manifest.",
        tools: &[],
    }
}

fn explain_tests() -> Explanation {
    Explanation {
        title: "Test Suite",
        description: "\
Runs the ecosystem test command (`pytest`, `npm test`, `go test`, `cargo test`) and
passes when it exits with status 0.",
        remediation: "\
Fix the failing tests shown in the detail output. A skip means the test runner is not
installed or no test configuration exists.",
        tools: &["python", "npm", "go", "cargo"],
    }
}

fn explain_coverage() -> Explanation {
    Explanation {
        title: "Coverage Threshold",
        description: "\
Runs the test suite with coverage instrumentation, parses the total percentage and
compares it to the threshold (default 95). The threshold is taken from
`--coverage-threshold`, then `RELEASEGATE_COVERAGE_THRESHOLD`, then `releasegate.toml`,
then the project's own coverage config.",
        remediation: "\
Add tests until coverage reaches the threshold, or lower the threshold explicitly.",
        tools: &["python", "go", "cargo-tarpaulin"],
    }
}

fn explain_format() -> Explanation {
    Explanation {
        title: "Formatting",
        description: "Runs `cargo fmt --check`.",
        remediation: "Run `cargo fmt` and commit the result.",
        tools: &["cargo"],
    }
}

fn explain_lint() -> Explanation {
    Explanation {
        title: "Lint",
        description: "\
Runs the ecosystem linter: `ruff` (falling back to `flake8`), the `lint` npm script
(falling back to `eslint`), `golangci-lint`, or `cargo clippy -- -D warnings`.",
        remediation: "\
Fix the reported lint violations. Install the linter if the check was skipped.",
        tools: &["ruff", "flake8", "npm", "npx", "golangci-lint", "cargo"],
    }
}

fn explain_typecheck() -> Explanation {
    Explanation {
        title: "Type Check",
        description: "Runs `mypy . --ignore-missing-imports`. Advisory by default.",
        remediation: "Fix the reported type errors or install `mypy`.",
        tools: &["mypy"],
    }
}

fn explain_vet() -> Explanation {
    Explanation {
        title: "Go Vet",
        description: "Runs `go vet ./...`. Advisory by default.",
        remediation: "Fix the issues reported by `go vet`.",
        tools: &["go"],
    }
}

fn explain_security() -> Explanation {
    Explanation {
        title: "Security Scan",
        description: "\
Runs the ecosystem security scanner: `bandit`, `npm audit`, or `cargo audit`. Advisory
by default.",
        remediation: "\
Review the advisories in the detail output and upgrade or patch the affected code.",
        tools: &["bandit", "npm", "cargo-audit"],
    }
}

fn explain_dependencies() -> Explanation {
    Explanation {
        title: "Dependency Audit",
        description: "Runs `pip-audit` against the installed Python dependencies.",
        remediation: "Upgrade the vulnerable dependencies reported by `pip-audit`.",
        tools: &["pip-audit"],
    }
}

fn explain_changelog() -> Explanation {
    Explanation {
        title: "Changelog",
        description: "\
Requires `CHANGELOG.md` with a literal `## [Unreleased]` heading. An empty section is
reported as a warning.",
        remediation: "\
Add a `## [Unreleased]` section listing the changes that ship in this release.",
        tools: &[],
    }
}

fn explain_ci_config() -> Explanation {
    Explanation {
        title: "CI Configuration",
        description: "\
Looks for `.github/workflows`, `.gitlab-ci.yml`, `Jenkinsfile`, or `.circleci`.",
        remediation: "Add a CI workflow that runs the test suite on every push.",
        tools: &[],
    }
}

fn explain_breaking_changes() -> Explanation {
    Explanation {
        title: "Breaking Changes",
        description: "\
Diffs the working tree against the most recent git tag. Deleted or renamed paths outside
tests and dotfiles are breaking signals and raise the semver recommendation to `major`.
New top-level files or directories raise it to `minor`.",
        remediation: "\
Confirm the listed removals are intended and release a new major version, or restore the
paths. Add `ignore` globs under `[checks.breaking-changes]` for paths that are not public.",
        tools: &["git"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_check_id_has_an_explanation() {
        for id in all_check_ids() {
            let exp = lookup_explanation(id).unwrap_or_else(|| panic!("missing explanation: {id}"));
            assert!(!exp.title.is_empty());
            assert!(!exp.description.is_empty());
            assert!(!exp.remediation.is_empty());
        }
    }

    #[test]
    fn unknown_identifier_has_no_explanation() {
        assert!(lookup_explanation("does-not-exist").is_none());
    }
}
