//! dockadvisor CLI.
//!
//! Usage:
//! ```bash
//! dockadvisor -f Dockerfile
//! dockadvisor -f Dockerfile --format json
//! dockadvisor -f Dockerfile --fail-on-error --minimum-score 80
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dockadvisor::Analysis;

/// Static analyzer for Dockerfiles
#[derive(Parser)]
#[command(name = "dockadvisor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Dockerfile to analyze
    #[arg(short, long, default_value = "Dockerfile")]
    file: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Exit nonzero when any error-severity rule is reported
    #[arg(long)]
    fail_on_error: bool,

    /// Exit nonzero when any warning-severity rule is reported
    #[arg(long)]
    fail_on_warning: bool,

    /// Exit nonzero when the score falls below this threshold
    #[arg(long, default_value_t = 0)]
    minimum_score: i32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let content = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Error reading {}", cli.file.display()))?;

    let analysis = dockadvisor::parse(&content)
        .with_context(|| format!("Error parsing {}", cli.file.display()))?;

    match cli.format {
        OutputFormat::Text => print_text(&analysis),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    if let Some(reason) = gate_failure(&cli, &analysis) {
        tracing::error!("{reason}");
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(analysis: &Analysis) {
    println!("Rules:");
    println!("------");
    for rule in &analysis.rules {
        println!("{rule}");
    }
    println!("------");
    println!("Dockerfile Score: {}/100", analysis.score);
}

/// Evaluates the optional CI gates. Fatal rules count as errors.
fn gate_failure(cli: &Cli, analysis: &Analysis) -> Option<String> {
    let (fatals, errors, warnings) = analysis.count_by_severity();

    if cli.fail_on_error && fatals + errors > 0 {
        return Some(format!("found {} error(s)", fatals + errors));
    }
    if cli.fail_on_warning && warnings > 0 {
        return Some(format!("found {warnings} warning(s)"));
    }
    if analysis.score < cli.minimum_score {
        return Some(format!(
            "score {} is below the minimum {}",
            analysis.score, cli.minimum_score
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockadvisor::{RuleCode, Severity, Violation};

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("dockadvisor").chain(args.iter().copied()))
    }

    fn analysis_with(severity: Severity, score: i32) -> Analysis {
        Analysis {
            rules: vec![Violation::new(
                RuleCode::UndefinedVar,
                severity,
                1,
                1,
                "test",
                "",
            )],
            score,
        }
    }

    #[test]
    fn no_gates_means_no_failure() {
        let analysis = analysis_with(Severity::Error, 85);
        assert!(gate_failure(&cli(&[]), &analysis).is_none());
    }

    #[test]
    fn fail_on_error_trips_on_errors_and_fatals() {
        let flags = cli(&["--fail-on-error"]);
        assert!(gate_failure(&flags, &analysis_with(Severity::Error, 85)).is_some());
        assert!(gate_failure(&flags, &analysis_with(Severity::Fatal, 0)).is_some());
        assert!(gate_failure(&flags, &analysis_with(Severity::Warning, 95)).is_none());
    }

    #[test]
    fn fail_on_warning_trips_on_warnings_only() {
        let flags = cli(&["--fail-on-warning"]);
        assert!(gate_failure(&flags, &analysis_with(Severity::Warning, 95)).is_some());
        assert!(gate_failure(&flags, &analysis_with(Severity::Error, 85)).is_none());
    }

    #[test]
    fn minimum_score_gate() {
        let flags = cli(&["--minimum-score", "90"]);
        assert!(gate_failure(&flags, &analysis_with(Severity::Error, 85)).is_some());
        assert!(gate_failure(&flags, &analysis_with(Severity::Warning, 95)).is_none());
    }
}
