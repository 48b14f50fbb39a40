use releasegate_types::{CheckResult, CheckStatus, ValidationReport, Verdict};

const RULE_WIDTH: usize = 60;
const DETAIL_CHARS: usize = 200;
const BREAKING_SHOWN: usize = 5;
const DETAIL_INDENT: &str = "       ";

#[derive(Clone, Copy, Debug, Default)]
pub struct TextOptions {
    /// Also print detail lines of warnings (failures always show theirs).
    pub verbose: bool,
}

pub fn render_text(report: &ValidationReport, opts: TextOptions) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\nRELEASE VALIDATION REPORT\n{rule}\n"));
    out.push_str(&format!("Project Type: {}\n", report.project_type));
    out.push_str(&format!("Project Path: {}\n", report.project_path));
    out.push_str(&format!("Semver Recommendation: {}\n", report.semver));
    out.push_str(&format!(
        "Coverage Threshold: {:.1}% ({})\n",
        report.coverage_threshold,
        report.threshold_source.as_str()
    ));
    out.push_str(&format!("{rule}\n"));

    let sections = [
        (CheckStatus::Pass, "PASSED", "[OK]", false),
        (CheckStatus::Warn, "WARNINGS", "[!!]", opts.verbose),
        (CheckStatus::Fail, "FAILED", "[XX]", true),
        (CheckStatus::Skip, "SKIPPED", "[--]", opts.verbose),
    ];
    for (status, title, marker, show_detail) in sections {
        let checks: Vec<&CheckResult> = report.with_status(status).collect();
        if checks.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}:\n"));
        for c in checks {
            out.push_str(&format!("  {marker} {}: {}\n", c.id, c.message));
            if let Some(detail) = c.detail.as_deref().filter(|_| show_detail) {
                push_detail(&mut out, detail);
            }
        }
    }

    if !report.breaking_changes.is_empty() {
        out.push_str(&format!(
            "\nBREAKING CHANGES DETECTED ({}):\n",
            report.breaking_changes.len()
        ));
        for change in report.breaking_changes.iter().take(BREAKING_SHOWN) {
            out.push_str(&format!("  - {change}\n"));
        }
        if report.breaking_changes.len() > BREAKING_SHOWN {
            out.push_str(&format!(
                "  ... and {} more\n",
                report.breaking_changes.len() - BREAKING_SHOWN
            ));
        }
    }

    out.push_str(&format!("\n{rule}\n"));
    match report.verdict {
        Verdict::Ready => {
            out.push_str("RESULT: READY FOR RELEASE\n");
            if report.has_warnings() {
                out.push_str("(Some warnings should be reviewed)\n");
            }
        }
        Verdict::NotReady => {
            out.push_str("RESULT: NOT READY FOR RELEASE\n");
            out.push_str(&format!(
                "Fix {} blocking check(s) before release\n",
                report.blocking_failures().count()
            ));
        }
    }
    out.push_str(&format!("{rule}\n"));
    out
}

fn push_detail(out: &mut String, detail: &str) {
    let clipped: String = detail.chars().take(DETAIL_CHARS).collect();
    for line in clipped.lines().filter(|l| !l.trim().is_empty()) {
        out.push_str(DETAIL_INDENT);
        out.push_str(line);
        out.push('\n');
    }
}
