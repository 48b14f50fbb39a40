//! Config parsing and threshold/policy resolution.
//!
//! This crate is IO-free: it parses configuration provided as strings and resolves it
//! against explicit overrides and a captured environment.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CheckConfig, ReleasegateConfigV1};
pub use resolve::{Environment, Overrides, ResolvedConfig};

/// Parse `releasegate.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ReleasegateConfigV1> {
    let cfg: ReleasegateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the runner (overrides, environment, config file).
///
/// The project-native coverage threshold is applied afterwards with
/// [`ResolvedConfig::with_native_threshold`], once the project type is known.
pub fn resolve_config(
    cfg: ReleasegateConfigV1,
    overrides: Overrides,
    env: &Environment,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides, env)
}
