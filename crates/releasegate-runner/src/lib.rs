//! Check runner: executes the registry's checks against a project root.
//!
//! All process execution goes through the [`ProcessRunner`] capability so the pipeline
//! can be driven by [`fake::ScriptedRunner`] in tests.

#![forbid(unsafe_code)]

mod cache;
pub mod fake;
mod git;
mod process;
mod runner;

pub use process::{ProcessError, ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use runner::{RunContext, RunOutput, run_checks};
