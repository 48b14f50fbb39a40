use releasegate_types::{CheckStatus, ValidationReport, Verdict};

pub fn render_markdown(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str("# Release validation report\n\n");
    let verdict = match report.verdict {
        Verdict::Ready => "READY",
        Verdict::NotReady => "NOT READY",
    };
    out.push_str(&format!(
        "- Verdict: **{verdict}**\n- Project type: `{}`\n- Semver recommendation: **{}**\n- Coverage threshold: {:.1}% ({})\n\n",
        report.project_type,
        report.semver,
        report.coverage_threshold,
        report.threshold_source.as_str()
    ));

    if report.checks.is_empty() {
        out.push_str("No checks ran.\n");
    } else {
        out.push_str("| Check | Status | Blocking | Message |\n");
        out.push_str("|---|---|---|---|\n");
        for c in &report.checks {
            let status = match c.status {
                CheckStatus::Pass => "PASS",
                CheckStatus::Fail => "FAIL",
                CheckStatus::Warn => "WARN",
                CheckStatus::Skip => "SKIP",
            };
            out.push_str(&format!(
                "| `{}` | {status} | {} | {} |\n",
                c.id,
                if c.blocking { "yes" } else { "no" },
                escape_cell(&c.message)
            ));
        }
    }

    if !report.breaking_changes.is_empty() {
        out.push_str(&format!(
            "\n## Breaking changes ({})\n\n",
            report.breaking_changes.len()
        ));
        for change in &report.breaking_changes {
            out.push_str(&format!("- `{change}`\n"));
        }
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
