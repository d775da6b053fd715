//! # CLI
//!
//! Runs the check catalogue from a terminal or a CI job:
//! - `reqres-check list`
//! - `reqres-check run --tag smoke --format json`
//!
//! The process exits non-zero when any check failed.

use std::fmt::Write as _;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::testing::{Filter, RunReport, Suite, Tag};

#[derive(Debug, Parser)]
#[command(name = "reqres-check", version, about = "End-to-end checks against the reqres.in API")]
pub struct Cli {
    /// Base URL of the API under test.
    #[arg(long, env = "REQRES_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Value sent in the `x-api-key` header.
    #[arg(long, env = "REQRES_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the checks in run order.
    List,
    /// Run the checks one after another and print a report.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Only run checks carrying this tag.
    #[arg(long, value_enum)]
    pub tag: Option<Tag>,

    /// Only run checks whose name contains this text.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl RunArgs {
    pub fn filter(&self) -> Filter {
        Filter {
            tag: self.tag,
            name: self.name.clone(),
        }
    }
}

pub fn render_listing(suite: &Suite) -> String {
    let mut out = String::new();
    for (index, scenario) in suite.scenarios().iter().enumerate() {
        let tags = scenario.tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let _ = writeln!(
            out,
            "{:>2}. {:<7} {:<34} {:<28} {:<8} {:<20} [{tags}]",
            index + 1,
            scenario.request.method.to_string(),
            scenario.request.display_target(),
            scenario.name,
            scenario.severity.to_string(),
            scenario.feature,
        );
    }
    out
}

pub fn render_report(report: &RunReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for outcome in &report.results {
        let mark = if outcome.passed { "PASS" } else { "FAIL" };
        let status = outcome.status.map_or_else(|| "---".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "{mark} {:<7} {:<34} {status} {:>6}ms  {}",
            outcome.method.to_string(),
            outcome.target,
            outcome.duration_ms,
            outcome.name,
        );
        if let Some(failure) = &outcome.failure {
            let _ = writeln!(out, "     [{}] {}: {}", outcome.severity, outcome.feature, outcome.story);
            let _ = writeln!(out, "     {failure}");
        }
    }
    let _ = writeln!(
        out,
        "\n{} checks, {} passed, {} failed in {}ms",
        report.total, report.passed, report.failed, report.duration_ms
    );
    out
}
