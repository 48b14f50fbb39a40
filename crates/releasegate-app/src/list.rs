//! The `list-checks` use case: print the check catalog per project type.

use releasegate_domain::model::{Action, CheckSpec, CommandTemplate};
use releasegate_domain::registry;
use releasegate_types::ProjectType;

/// List the checks for one project type, or for every type when `None`.
pub fn run_list_checks(project_type: Option<ProjectType>) -> String {
    let types: Vec<ProjectType> = match project_type {
        Some(ty) => vec![ty],
        None => ProjectType::ALL.to_vec(),
    };

    let mut out = String::new();
    for (i, ty) in types.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{ty}:\n"));
        for spec in registry::checks_for(ty) {
            out.push_str(&format_spec(spec));
        }
    }
    out
}

fn format_spec(spec: &CheckSpec) -> String {
    let kind = if spec.blocking { "blocking" } else { "advisory" };
    format!("  {:<18} {:<9} {}\n", spec.id, kind, describe_action(&spec.action))
}

fn describe_action(action: &Action) -> String {
    match action {
        Action::Inspect(_) => "filesystem inspection".to_string(),
        Action::Command(commands) | Action::Coverage { commands, .. } => {
            join_commands(commands)
        }
        Action::ChangeScan => "git diff against the last tag".to_string(),
    }
}

fn join_commands(commands: &[CommandTemplate]) -> String {
    commands
        .iter()
        .map(CommandTemplate::display)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_type_lists_its_catalog_in_order() {
        let out = run_list_checks(Some(ProjectType::Generic));
        assert_eq!(
            out,
            "generic:\n\
             \x20 changelog          blocking  filesystem inspection\n\
             \x20 ci-config          advisory  filesystem inspection\n\
             \x20 breaking-changes   advisory  git diff against the last tag\n"
        );
    }

    #[test]
    fn all_types_are_listed() {
        let out = run_list_checks(None);
        for ty in ProjectType::ALL {
            assert!(out.contains(&format!("{ty}:\n")), "missing {ty}");
        }
        assert!(out.contains("ruff check . | flake8 ."));
    }
}
