use camino::Utf8Path;
use releasegate_domain::model::{Inspection, Outcome};
use releasegate_types::ProjectType;

pub(crate) mod changelog;
mod ci;
mod manifest;
mod plugin;

/// Run one filesystem inspection against the project root.
///
/// `Err` means the inspection itself could not complete (unreadable file, IO error);
/// findings about the project are always an `Ok` outcome.
pub fn run_inspection(
    root: &Utf8Path,
    project_type: ProjectType,
    inspection: Inspection,
) -> anyhow::Result<Outcome> {
    match inspection {
        Inspection::PluginManifest => plugin::plugin_manifest(root),
        Inspection::Agents => plugin::agents(root),
        Inspection::Skills => plugin::skills(root),
        Inspection::Commands => plugin::commands(root),
        Inspection::Manifest => manifest::manifest(root, project_type),
        Inspection::Changelog => changelog::changelog(root),
        Inspection::CiConfig => Ok(ci::ci_config(root)),
    }
}

/// Paths relative to `root`, `/`-separated, for messages.
fn relative(root: &Utf8Path, path: &Utf8Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .as_str()
        .replace('\\', "/")
}
