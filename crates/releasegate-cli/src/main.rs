//! CLI entry point for releasegate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `releasegate-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use releasegate_app::{
    ExplainOutput, ReportFormat, ValidateInput, render_report, run_explain, run_list_checks,
    run_validation, verdict_exit_code, write_report,
};
use releasegate_runner::SystemProcessRunner;
use releasegate_settings::{Environment, Overrides};
use releasegate_types::ProjectType;
use releasegate_types::ids::CONFIG_FILE_NAME;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_TOOL_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "releasegate",
    version,
    about = "Release-readiness gate: per-ecosystem quality checks with a semver recommendation"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a project for release.
    Check {
        /// Project root to validate.
        #[arg(default_value = ".")]
        path: Utf8PathBuf,

        /// Force the project type (claude-plugin|python|nodejs|go|rust|generic).
        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<ProjectType>,

        /// Minimum coverage percentage (0-100).
        #[arg(long, value_name = "PERCENT")]
        coverage_threshold: Option<f64>,

        /// Path to the config TOML (default: releasegate.toml in the project root).
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// Report format (text|json|markdown).
        #[arg(long, default_value = "text")]
        format: ReportFormat,

        /// Show warning and skip details, and debug logging on stderr.
        #[arg(long, short)]
        verbose: bool,

        /// Treat every check as advisory; the verdict never blocks.
        #[arg(long)]
        advisory_only: bool,

        /// Timeout for each external command, in seconds.
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Deadline for the whole run, in seconds.
        #[arg(long, value_name = "SECS")]
        deadline_secs: Option<u64>,

        /// Write the report to this file instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a check id with remediation guidance.
    Explain {
        /// The check id (e.g. "changelog", "coverage").
        check_id: String,
    },

    /// List the checks run for each project type.
    ListChecks {
        /// Only list checks for this project type.
        #[arg(long = "type", value_name = "TYPE")]
        project_type: Option<ProjectType>,
    },
}

struct CheckArgs {
    path: Utf8PathBuf,
    config: Option<Utf8PathBuf>,
    format: ReportFormat,
    verbose: bool,
    output: Option<Utf8PathBuf>,
    overrides: Overrides,
}

fn main() {
    let cli = Cli::parse();
    let verbose = matches!(cli.cmd, Commands::Check { verbose: true, .. });
    init_logging(verbose);

    let code = match run(cli.cmd) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("releasegate error: {err:#}");
            EXIT_TOOL_ERROR
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cmd: Commands) -> anyhow::Result<i32> {
    match cmd {
        Commands::Check {
            path,
            project_type,
            coverage_threshold,
            config,
            format,
            verbose,
            advisory_only,
            timeout_secs,
            deadline_secs,
            output,
        } => cmd_check(CheckArgs {
            path,
            config,
            format,
            verbose,
            output,
            overrides: Overrides {
                project_type,
                coverage_threshold,
                command_timeout_secs: timeout_secs,
                deadline_secs,
                advisory_only,
            },
        }),
        Commands::Explain { check_id } => Ok(cmd_explain(&check_id)),
        Commands::ListChecks { project_type } => {
            print!("{}", run_list_checks(project_type));
            Ok(0)
        }
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<i32> {
    let project_root = args
        .path
        .canonicalize_utf8()
        .with_context(|| format!("project path not found: {}", args.path))?;

    let config_text = read_config(&project_root, args.config.as_deref())?;
    let env = Environment::from_vars(std::env::vars());
    let process = SystemProcessRunner;

    let output = run_validation(ValidateInput {
        project_root: &project_root,
        config_text: &config_text,
        overrides: args.overrides,
        env: &env,
        process: &process,
    })?;

    let rendered = render_report(&output.envelope, args.format, args.verbose)?;
    match &args.output {
        Some(path) => {
            write_report(path, &rendered).context("write report")?;
            tracing::info!("report written to {path}");
        }
        None => print!("{rendered}"),
    }

    Ok(verdict_exit_code(output.envelope.report.verdict))
}

/// An explicit `--config` must exist; the default file is optional.
fn read_config(project_root: &Utf8Path, explicit: Option<&Utf8Path>) -> anyhow::Result<String> {
    match explicit {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
        }
        None => {
            let path = project_root.join(CONFIG_FILE_NAME);
            if path.is_file() {
                std::fs::read_to_string(&path).with_context(|| format!("read config: {path}"))
            } else {
                Ok(String::new())
            }
        }
    }
}

fn cmd_explain(check_id: &str) -> i32 {
    match run_explain(check_id) {
        ExplainOutput::Found(exp) => {
            print!("{}", releasegate_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
        } => {
            eprint!(
                "{}",
                releasegate_app::format_not_found(&identifier, available_check_ids)
            );
            EXIT_TOOL_ERROR
        }
    }
}
