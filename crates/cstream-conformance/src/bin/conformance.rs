//! CLI entrypoint for cstream conformance tooling.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cstream_conformance::structured_log::unix_timestamp;
use cstream_conformance::{
    ConformanceReport, LogEmitter, LogEntry, LogLevel, Outcome, ScenarioSummary, config, run_all,
};

/// CLI for the cstream conformance suite.
#[derive(Debug, Parser)]
#[command(name = "cstream-conformance")]
#[command(about = "Conformance tooling for cstream-core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the scenario suite and write markdown/json reports.
    Run {
        /// Output markdown report path.
        #[arg(long)]
        report_md: PathBuf,
        /// Output json report path.
        #[arg(long)]
        report_json: PathBuf,
        /// Optional JSONL log output path (default: stdout).
        #[arg(long)]
        log_jsonl: Option<PathBuf>,
        /// Scenario scratch directory (default: a per-process temp dir).
        #[arg(long)]
        workdir: Option<PathBuf>,
    },
    /// Render a previously written json report as markdown.
    Render {
        /// Input json report path.
        #[arg(long)]
        report_json: PathBuf,
    },
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            report_md,
            report_json,
            log_jsonl,
            workdir,
        } => {
            let workdir = workdir.unwrap_or_else(|| {
                std::env::temp_dir().join(format!("cstream-conformance-{}", std::process::id()))
            });
            let mode = config::run_mode();

            let mut emitter = match &log_jsonl {
                Some(path) => LogEmitter::to_file(path)?,
                None => LogEmitter::stdout(),
            };

            let results = run_all(&workdir).map_err(std::io::Error::other)?;

            if mode.per_scenario_logging() {
                for r in &results {
                    let outcome = if r.passed { Outcome::Pass } else { Outcome::Fail };
                    let entry = LogEntry::new(LogLevel::Info, "scenario_done")
                        .with_scenario(r.name.clone(), outcome)
                        .with_detail(format!("expected={} actual={}", r.expected, r.actual));
                    emitter.emit(&entry)?;
                }
            }

            let summary = ScenarioSummary::from_results(results);
            let all_passed = summary.all_passed();
            let report = ConformanceReport {
                title: "cstream conformance".to_string(),
                mode: format!("{mode:?}").to_ascii_lowercase(),
                timestamp: unix_timestamp(),
                summary,
            };

            let level = if all_passed {
                LogLevel::Info
            } else {
                LogLevel::Error
            };
            let entry = LogEntry::new(level, "suite_done").with_detail(format!(
                "total={} passed={} failed={}",
                report.summary.total, report.summary.passed, report.summary.failed
            ));
            emitter.emit(&entry)?;

            fs::write(report_md, report.to_markdown())?;
            fs::write(report_json, report.to_json())?;

            if !all_passed {
                std::process::exit(1);
            }
        }
        Command::Render { report_json } => {
            let body = fs::read_to_string(report_json)?;
            let report = ConformanceReport::from_json(&body).map_err(std::io::Error::other)?;
            println!("{}", report.to_markdown());
        }
    }

    Ok(())
}
