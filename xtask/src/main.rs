//! Developer tasks (schema generation, report validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(releasegate_types::ReportEnvelope)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(releasegate_settings::ReleasegateConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "releasegate.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "releasegate.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate a JSON report written by `releasegate check --format json`.
fn validate_report(path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;

    let schema = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;

    let errors: Vec<String> = validator
        .iter_errors(&report)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        println!("✓ {} is a valid releasegate report", path.display());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("Report validation failed with {} errors", errors.len())
}

/// Validate that all check IDs have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = releasegate_types::explain::all_check_ids();
    let mut errors = Vec::new();

    for check_id in check_ids {
        match releasegate_types::explain::lookup_explanation(check_id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Check ID '{check_id}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Check ID '{check_id}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Check ID '{check_id}' has empty remediation"));
                }
            }
            None => errors.push(format!("Check ID '{check_id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                    Show this message");
    eprintln!("  emit-schemas            Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas        Check if schemas/ matches generated output (for CI)");
    eprintln!("  validate-report <FILE>  Validate a JSON report against the report schema");
    eprintln!("  print-schema-ids        Print known schema IDs");
    eprintln!("  explain-coverage        Validate all check IDs have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-report" => match args.get(2) {
            Some(path) => validate_report(Path::new(path)),
            None => bail!("validate-report requires a report path"),
        },
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
