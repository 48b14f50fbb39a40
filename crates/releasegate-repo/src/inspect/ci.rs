use camino::Utf8Path;
use releasegate_domain::model::Outcome;
use serde_json::json;

/// CI locations in lookup order; the first one present wins.
const CI_LOCATIONS: &[&str] = &[".github/workflows", ".gitlab-ci.yml", "Jenkinsfile", ".circleci"];

pub fn ci_config(root: &Utf8Path) -> Outcome {
    for location in CI_LOCATIONS {
        let path = root.join(location);
        if path.is_dir() {
            let workflows = count_workflows(&path);
            return Outcome::pass(format!("Found {workflows} CI workflow(s) in {location}"))
                .with_data(json!({ "location": location, "workflows": workflows }));
        }
        if path.is_file() {
            return Outcome::pass(format!("Found CI config: {location}"))
                .with_data(json!({ "location": location }));
        }
    }
    Outcome::warn("No CI configuration found")
}

fn count_workflows(dir: &Utf8Path) -> usize {
    let Ok(entries) = dir.read_dir_utf8() else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .filter(|e| matches!(e.path().extension(), Some("yml" | "yaml")))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use releasegate_types::CheckStatus;
    use tempfile::TempDir;

    #[test]
    fn github_workflows_are_counted() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        std::fs::create_dir_all(root.join(".github/workflows")).expect("mkdir");
        std::fs::write(root.join(".github/workflows/ci.yml"), "on: push\n").expect("write");
        std::fs::write(root.join(".github/workflows/release.yaml"), "on: tag\n").expect("write");
        std::fs::write(root.join(".github/workflows/README.md"), "").expect("write");

        let outcome = ci_config(&root);
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert_eq!(outcome.message, "Found 2 CI workflow(s) in .github/workflows");
    }

    #[test]
    fn gitlab_file_is_found() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join(".gitlab-ci.yml"), "stages: []\n").expect("write");
        assert_eq!(ci_config(&root).message, "Found CI config: .gitlab-ci.yml");
    }

    #[test]
    fn no_ci_warns() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        assert_eq!(ci_config(&root).status, CheckStatus::Warn);
    }
}
