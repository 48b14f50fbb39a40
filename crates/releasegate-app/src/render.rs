//! Render use cases: pick the output format and write reports to disk.

use anyhow::Context;
use camino::Utf8Path;
use releasegate_render::TextOptions;
use releasegate_types::{ReportEnvelope, SCHEMA_REPORT_V1};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!(
                "unknown format: {other} (expected text|json|markdown)"
            )),
        }
    }
}

pub fn serialize_report(envelope: &ReportEnvelope) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(envelope).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

/// Parse a previously written JSON report, rejecting other schemas.
pub fn parse_report_json(text: &str) -> anyhow::Result<ReportEnvelope> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    anyhow::ensure!(
        schema == SCHEMA_REPORT_V1,
        "unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})"
    );
    serde_json::from_value(value).context("parse releasegate report")
}

pub fn render_report(
    envelope: &ReportEnvelope,
    format: ReportFormat,
    verbose: bool,
) -> anyhow::Result<String> {
    match format {
        ReportFormat::Text => Ok(releasegate_render::render_text(
            &envelope.report,
            TextOptions { verbose },
        )),
        ReportFormat::Markdown => Ok(releasegate_render::render_markdown(&envelope.report)),
        ReportFormat::Json => {
            let data = serialize_report(envelope)?;
            String::from_utf8(data).context("report json is not UTF-8")
        }
    }
}

pub fn write_report(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
