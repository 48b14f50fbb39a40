//! The `explain` use case: look up check documentation.

use releasegate_types::explain::{self, Explanation};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the available check ids.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push('\n');

    if !exp.tools.is_empty() {
        out.push_str("\nTools\n");
        out.push_str("-----\n");
        for tool in exp.tools {
            out.push_str(&format!("  - {tool}\n"));
        }
    }

    out
}

pub fn format_not_found(identifier: &str, check_ids: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check id: {identifier}\n\n"));
    out.push_str("Available check ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {id}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use releasegate_types::ids;

    #[test]
    fn explains_every_known_check() {
        for id in ids::ALL_CHECK_IDS {
            match run_explain(id) {
                ExplainOutput::Found(exp) => {
                    let text = format_explanation(&exp);
                    assert!(text.starts_with(exp.title));
                    assert!(text.contains("Remediation"));
                }
                ExplainOutput::NotFound { .. } => panic!("{id} has no explanation"),
            }
        }
    }

    #[test]
    fn unknown_id_lists_alternatives() {
        match run_explain("nope") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
            } => {
                let text = format_not_found(&identifier, available_check_ids);
                assert!(text.starts_with("Unknown check id: nope"));
                assert!(text.contains("  - changelog\n"));
            }
            ExplainOutput::Found(_) => panic!("unexpected explanation"),
        }
    }
}
