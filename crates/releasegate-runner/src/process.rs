use camino::Utf8Path;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Captured result of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("`{program}` is not installed")]
    NotFound { program: String },

    #[error("`{program}` timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    #[error("running `{program}` failed: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability to run an external command with a bounded timeout.
pub trait ProcessRunner {
    fn run(
        &self,
        cwd: &Utf8Path,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;
}

/// Runs real processes. Output is captured in anonymous temp files while the child is
/// polled for exit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        cwd: &Utf8Path,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let io = |source: std::io::Error| ProcessError::Io {
            program: program.to_string(),
            source,
        };

        let mut stdout_file = tempfile::tempfile().map_err(io)?;
        let mut stderr_file = tempfile::tempfile().map_err(io)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.try_clone().map_err(io)?))
            .stderr(Stdio::from(stderr_file.try_clone().map_err(io)?))
            .env("NO_COLOR", "1")
            .env("CI", "true");

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessError::NotFound {
                    program: program.to_string(),
                });
            }
            Err(e) => return Err(io(e)),
        };
        debug!(program, ?args, pid = child.id(), "spawned");

        let started = Instant::now();
        let status = loop {
            match child.try_wait().map_err(io)? {
                Some(status) => break status,
                None if started.elapsed() > timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::TimedOut {
                        program: program.to_string(),
                        seconds: timeout.as_secs(),
                    });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout: read_capture(&mut stdout_file).map_err(io)?,
            stderr: read_capture(&mut stderr_file).map_err(io)?,
        })
    }
}

fn read_capture(file: &mut File) -> std::io::Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
