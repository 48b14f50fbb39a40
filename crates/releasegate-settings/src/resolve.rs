use crate::model::ReleasegateConfigV1;
use anyhow::Context;
use globset::Glob;
use releasegate_domain::policy::{CheckPolicy, EffectiveConfig};
use releasegate_types::{ProjectType, ThresholdSource, ids};
use std::collections::BTreeMap;
use std::time::Duration;

/// Values given explicitly on the command line.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub project_type: Option<ProjectType>,
    pub coverage_threshold: Option<f64>,
    pub command_timeout_secs: Option<u64>,
    pub deadline_secs: Option<u64>,
    pub advisory_only: bool,
}

/// Environment variables captured once at the process boundary.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Forced project type; `None` means detect.
    pub project_type: Option<ProjectType>,
}

impl ResolvedConfig {
    /// Apply the threshold declared in the project's own tooling config (pytest-cov
    /// `fail_under`, jest `coverageThreshold`). It only replaces the built-in default.
    pub fn with_native_threshold(mut self, native: Option<f64>) -> Self {
        if let Some(value) = native
            && self.effective.threshold_source == ThresholdSource::Default
            && validate_threshold(value).is_ok()
        {
            self.effective.coverage_threshold = value;
            self.effective.threshold_source = ThresholdSource::ProjectNative;
        }
        self
    }
}

pub fn resolve_config(
    cfg: ReleasegateConfigV1,
    overrides: Overrides,
    env: &Environment,
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    let env_threshold = env
        .get(ids::ENV_COVERAGE_THRESHOLD)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid {}: {raw}", ids::ENV_COVERAGE_THRESHOLD))
        })
        .transpose()?;

    let candidates = [
        (overrides.coverage_threshold, ThresholdSource::Cli),
        (env_threshold, ThresholdSource::Environment),
        (cfg.coverage_threshold, ThresholdSource::ConfigFile),
    ];
    if let Some((value, source)) = candidates
        .into_iter()
        .find_map(|(v, s)| v.map(|v| (v, s)))
    {
        validate_threshold(value)
            .with_context(|| format!("coverage threshold from {}", source.as_str()))?;
        effective.coverage_threshold = value;
        effective.threshold_source = source;
    }

    if let Some(secs) = overrides.command_timeout_secs.or(cfg.command_timeout_secs) {
        anyhow::ensure!(secs > 0, "command timeout must be at least 1 second");
        effective.command_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = overrides.deadline_secs.or(cfg.deadline_secs) {
        anyhow::ensure!(secs > 0, "deadline must be at least 1 second");
        effective.deadline = Some(Duration::from_secs(secs));
    }
    effective.advisory_only = overrides.advisory_only || cfg.advisory_only.unwrap_or(false);

    for (check_id, cc) in cfg.checks.iter() {
        anyhow::ensure!(
            ids::ALL_CHECK_IDS.contains(&check_id.as_str()),
            "unknown check id in [checks]: {check_id}"
        );
        validate_globs(check_id, &cc.ignore)?;
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::default);
        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        entry.blocking = cc.blocking;
        entry.ignore = cc.ignore.clone();
    }

    let project_type = match overrides.project_type {
        Some(t) => Some(t),
        None => cfg
            .project_type
            .as_deref()
            .map(|s| s.parse::<ProjectType>().map_err(anyhow::Error::msg))
            .transpose()
            .context("invalid project_type")?,
    };

    Ok(ResolvedConfig {
        effective,
        project_type,
    })
}

fn validate_threshold(value: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        value.is_finite() && (0.0..=100.0).contains(&value),
        "coverage threshold must be between 0 and 100, got {value}"
    );
    Ok(())
}

fn validate_globs(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid ignore glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}
