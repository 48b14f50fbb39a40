use camino::Utf8Path;
use releasegate_domain::model::Probe;

/// Whether a command's precondition holds in this project root.
pub fn probe_satisfied(root: &Utf8Path, probe: &Probe) -> bool {
    match probe {
        Probe::Always => true,
        Probe::AnyFile(files) => files.iter().any(|f| root.join(f).exists()),
        Probe::NpmScript(name) => npm_scripts(root).iter().any(|s| s == name),
    }
}

/// Human-readable precondition, used in skip messages.
pub fn describe_probe(probe: &Probe) -> String {
    match probe {
        Probe::Always => "nothing".to_string(),
        Probe::AnyFile(files) => format!("one of {}", files.join(", ")),
        Probe::NpmScript(name) => format!("a \"{name}\" script in package.json"),
    }
}

fn npm_scripts(root: &Utf8Path) -> Vec<String> {
    let Ok(text) = std::fs::read_to_string(root.join("package.json")) else {
        return Vec::new();
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
        return Vec::new();
    };
    value
        .get("scripts")
        .and_then(|s| s.as_object())
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default()
}
