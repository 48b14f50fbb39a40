//! Use case orchestration for releasegate.
//!
//! This crate coordinates the settings, repo, runner, domain and render layers. The CLI
//! crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod list;
mod render;
mod validate;

pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use list::run_list_checks;
pub use render::{ReportFormat, parse_report_json, render_report, serialize_report, write_report};
pub use validate::{ValidateInput, ValidateOutput, run_validation, verdict_exit_code};
