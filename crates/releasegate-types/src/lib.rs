//! Stable DTOs and IDs used across the releasegate workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report and its JSON envelope
//! - stable string IDs for checks
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod report;

pub use explain::{lookup_explanation, Explanation};
pub use path::RepoPath;
pub use report::{
    BreakingChange, BreakingKind, CheckResult, CheckStatus, ProjectType, ReportEnvelope, RunMeta,
    SemverBump, ThresholdSource, ToolMeta, ValidationReport, Verdict, SCHEMA_REPORT_V1,
};
