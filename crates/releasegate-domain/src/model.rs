use releasegate_types::CheckStatus;
use serde_json::Value as JsonValue;

/// Static descriptor of one check: what it does and whether its failure blocks a release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckSpec {
    pub id: &'static str,
    pub action: Action,
    pub blocking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Filesystem inspection; no subprocess.
    Inspect(Inspection),
    /// Run the first applicable, installed command; exit status decides.
    Command(&'static [CommandTemplate]),
    /// Run an instrumented test command and compare the parsed percentage to the threshold.
    Coverage {
        commands: &'static [CommandTemplate],
        format: CoverageFormat,
    },
    /// Diff the working tree against the last release tag.
    ChangeScan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inspection {
    PluginManifest,
    Agents,
    Skills,
    Commands,
    Manifest,
    Changelog,
    CiConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageFormat {
    /// pytest-cov terminal report (`TOTAL ... 87%`).
    Pytest,
    /// `go test -cover` (`coverage: 81.2% of statements`, one line per package).
    GoTest,
    /// cargo-tarpaulin summary (`85.71% coverage, 6/7 lines covered`).
    Tarpaulin,
}

/// Precondition a command needs before it is worth running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Always,
    /// At least one of these root-relative files exists.
    AnyFile(&'static [&'static str]),
    /// `package.json` declares this script.
    NpmScript(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandTemplate {
    pub argv: &'static [&'static str],
    pub requires: Probe,
}

impl CommandTemplate {
    pub const fn new(argv: &'static [&'static str]) -> Self {
        Self {
            argv,
            requires: Probe::Always,
        }
    }

    pub const fn requires(argv: &'static [&'static str], requires: Probe) -> Self {
        Self { argv, requires }
    }

    pub fn program(&self) -> &'static str {
        self.argv.first().copied().unwrap_or_default()
    }

    pub fn args(&self) -> &'static [&'static str] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Raw outcome of a check before blocking policy is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub status: CheckStatus,
    pub message: String,
    pub detail: Option<String>,
    pub data: JsonValue,
}

impl Outcome {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
            data: JsonValue::Null,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Skip, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.trim().is_empty() {
            self.detail = Some(detail);
        }
        self
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = data;
        self
    }
}
