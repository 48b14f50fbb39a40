//! Scripted [`ProcessRunner`] for tests.
//!
//! Responses are keyed by the full command line (`program arg1 arg2`). Any command
//! without a scripted response behaves as if its program were not installed.

use crate::process::{ProcessError, ProcessOutput, ProcessRunner};
use camino::Utf8Path;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Clone, Debug)]
enum Scripted {
    Output(ProcessOutput),
    TimedOut,
}

#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: BTreeMap<String, Scripted>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a finished process.
    pub fn with_output(mut self, command_line: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            Scripted::Output(ProcessOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        );
        self
    }

    /// Script a process that exceeds its timeout.
    pub fn with_timeout(mut self, command_line: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), Scripted::TimedOut);
        self
    }

    /// Command lines requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(
        &self,
        _cwd: &Utf8Path,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());
        match self.responses.get(&line) {
            Some(Scripted::Output(out)) => Ok(out.clone()),
            Some(Scripted::TimedOut) => Err(ProcessError::TimedOut {
                program: program.to_string(),
                seconds: timeout.as_secs(),
            }),
            None => Err(ProcessError::NotFound {
                program: program.to_string(),
            }),
        }
    }
}
