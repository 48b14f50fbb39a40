//! Pure release-readiness evaluation (no IO).
//!
//! Input: check outcomes and a change set gathered elsewhere.
//! Output: the check catalog per project type, classified results, verdict and semver bump.

#![forbid(unsafe_code)]

pub mod changes;
pub mod coverage;
pub mod model;
pub mod policy;
pub mod registry;

mod aggregate;

pub use aggregate::{aggregate, classify, recommend_semver};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
