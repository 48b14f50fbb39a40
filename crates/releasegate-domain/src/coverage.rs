use crate::model::{CoverageFormat, Outcome};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

static PYTEST_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^TOTAL\s+.*?(\d+(?:\.\d+)?)%\s*$").expect("static regex")
});

static GO_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"coverage:\s+(\d+(?:\.\d+)?)%\s+of\s+statements").expect("static regex")
});

static TARPAULIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%\s+coverage").expect("static regex"));

/// Extract a coverage percentage from tool output. `None` when the output carries none.
///
/// Go reports one percentage per package; the result is their arithmetic mean.
/// For pytest and tarpaulin the last matching line wins.
pub fn parse_coverage(format: CoverageFormat, output: &str) -> Option<f64> {
    match format {
        CoverageFormat::Pytest => last_match(&PYTEST_TOTAL, output),
        CoverageFormat::Tarpaulin => last_match(&TARPAULIN, output),
        CoverageFormat::GoTest => {
            let values: Vec<f64> = GO_PACKAGE
                .captures_iter(output)
                .filter_map(|c| c[1].parse().ok())
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        }
    }
}

fn last_match(re: &Regex, output: &str) -> Option<f64> {
    re.captures_iter(output)
        .filter_map(|c| c[1].parse::<f64>().ok())
        .last()
}

/// Compare a measured percentage to the threshold. Equal to the threshold passes.
pub fn evaluate_coverage(measured: Option<f64>, threshold: f64) -> Outcome {
    let Some(coverage) = measured else {
        return Outcome::warn("Coverage ran but no percentage was reported")
            .with_data(json!({ "threshold": threshold }));
    };
    let data = json!({ "coverage": round1(coverage), "threshold": threshold });
    if coverage >= threshold {
        Outcome::pass(format!("Coverage {coverage:.1}% meets threshold {threshold:.1}%"))
            .with_data(data)
    } else {
        Outcome::fail(format!("Coverage {coverage:.1}% below threshold {threshold:.1}%"))
            .with_data(data)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
