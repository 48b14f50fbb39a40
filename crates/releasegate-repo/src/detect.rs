use camino::Utf8Path;
use releasegate_types::ProjectType;

/// Marker files per project type, in detection precedence order.
const MARKERS: &[(ProjectType, &[&str])] = &[
    (
        ProjectType::ClaudePlugin,
        &[".claude-plugin/plugin.json", "plugin.json"],
    ),
    (ProjectType::Python, &["pyproject.toml", "setup.py"]),
    (ProjectType::NodeJs, &["package.json"]),
    (ProjectType::Go, &["go.mod"]),
    (ProjectType::Rust, &["Cargo.toml"]),
];

/// Classify a project root by marker-file existence. File contents are not read.
///
/// The first matching type in precedence order wins; no markers means `Generic`.
pub fn detect_project_type(root: &Utf8Path) -> ProjectType {
    MARKERS
        .iter()
        .find(|(_, files)| files.iter().any(|f| root.join(f).is_file()))
        .map(|(ty, _)| *ty)
        .unwrap_or(ProjectType::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn root_with(files: &[&str]) -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
        for f in files {
            let path = root.join(f);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create parent");
            }
            std::fs::write(&path, "").expect("write marker");
        }
        (dir, root)
    }

    #[test]
    fn each_marker_maps_to_its_type() {
        let cases: &[(&str, ProjectType)] = &[
            (".claude-plugin/plugin.json", ProjectType::ClaudePlugin),
            ("plugin.json", ProjectType::ClaudePlugin),
            ("pyproject.toml", ProjectType::Python),
            ("setup.py", ProjectType::Python),
            ("package.json", ProjectType::NodeJs),
            ("go.mod", ProjectType::Go),
            ("Cargo.toml", ProjectType::Rust),
        ];
        for (marker, expected) in cases {
            let (_dir, root) = root_with(&[marker]);
            assert_eq!(detect_project_type(&root), *expected, "marker {marker}");
        }
    }

    #[test]
    fn plugin_wins_over_node() {
        let (_dir, root) = root_with(&[".claude-plugin/plugin.json", "package.json"]);
        assert_eq!(detect_project_type(&root), ProjectType::ClaudePlugin);
    }

    #[test]
    fn python_wins_over_rust() {
        let (_dir, root) = root_with(&["Cargo.toml", "pyproject.toml"]);
        assert_eq!(detect_project_type(&root), ProjectType::Python);
    }

    #[test]
    fn no_markers_is_generic() {
        let (_dir, root) = root_with(&["README.md"]);
        assert_eq!(detect_project_type(&root), ProjectType::Generic);
    }

    #[test]
    fn marker_directory_does_not_count() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        std::fs::create_dir_all(root.join("go.mod")).expect("mkdir");
        assert_eq!(detect_project_type(&root), ProjectType::Generic);
    }
}
