use crate::process::{ProcessError, ProcessOutput, ProcessRunner};
use camino::Utf8Path;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

pub(crate) type CommandResult = Rc<Result<ProcessOutput, ProcessError>>;

/// Runs each distinct command line at most once per validation run.
pub(crate) struct CommandCache<'a> {
    process: &'a dyn ProcessRunner,
    root: &'a Utf8Path,
    timeout: Duration,
    entries: BTreeMap<String, CommandResult>,
}

impl<'a> CommandCache<'a> {
    pub(crate) fn new(process: &'a dyn ProcessRunner, root: &'a Utf8Path, timeout: Duration) -> Self {
        Self {
            process,
            root,
            timeout,
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn run(&mut self, argv: &[&str]) -> CommandResult {
        let key = argv.join(" ");
        if let Some(hit) = self.entries.get(&key) {
            debug!(command = %key, "reusing cached command result");
            return Rc::clone(hit);
        }
        let (program, args) = argv.split_first().map_or(("", &[][..]), |(p, a)| (*p, a));
        debug!(command = %key, timeout_secs = self.timeout.as_secs(), "running command");
        let result = Rc::new(self.process.run(self.root, program, args, self.timeout));
        self.entries.insert(key, Rc::clone(&result));
        result
    }
}
