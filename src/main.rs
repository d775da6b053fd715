use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reqres_check::catalog::reqres_suite;
use reqres_check::cli::{Cli, Command, render_listing, render_report};
use reqres_check::ApiClient;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let suite = reqres_suite();

    match cli.command {
        Command::List => {
            print!("{}", render_listing(&suite));
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(ref args) => {
            let config = cli.config();
            let client = ApiClient::from_config(&config)
                .with_context(|| format!("Failed to create client for {}", config.base_url))?;

            let report = suite.run(&client, &args.filter()).await;
            let rendered = render_report(&report, args.format).context("Failed to render report")?;
            println!("{rendered}");

            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
