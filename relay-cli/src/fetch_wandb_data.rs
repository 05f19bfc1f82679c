use anyhow::{Context, Result};
use clap::Parser;
use relay_core::logging::TracingRelayLogger;
use relay_core::HttpTransport;
use relay_provider_wandb::{RunPath, WandbClient};
use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::{parse_args, Outcome, STYLES};

#[derive(Parser, Debug)]
#[command(
    name = "fetch-wandb-data",
    version,
    about = "Print the logged-metric history of a Weights & Biases run as split-oriented JSON",
    styles = STYLES
)]
pub struct FetchWandbDataArgs {
    #[arg(help = "Entity (user or team) owning the project")]
    pub entity_name: String,

    #[arg(help = "Project name")]
    pub project_name: String,

    #[arg(help = "Run id")]
    pub run_id: String,

    #[arg(help = "Weights & Biases API key")]
    pub api_key: String,
}

/// Runs the `fetch-wandb-data` command against `transport`.
pub async fn run_fetch_wandb_data<I, T, H>(
    argv: I,
    settings: &Settings,
    transport: H,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    H: HttpTransport,
{
    let args: FetchWandbDataArgs = match parse_args(argv, stdout, stderr) {
        Ok(args) => args,
        Err(outcome) => return outcome,
    };

    match fetch(&args, settings, transport).await {
        Ok(json) => {
            let _ = writeln!(stdout, "{}", json);
            Outcome::Success
        }
        Err(err) => {
            use colored::Colorize;
            let _ = writeln!(stderr, "{} {:#}", "error:".red().bold(), err);
            Outcome::Failure
        }
    }
}

async fn fetch<H: HttpTransport>(
    args: &FetchWandbDataArgs,
    settings: &Settings,
    transport: H,
) -> Result<String> {
    let mut config = settings.wandb_config();
    config.logger = Some(Arc::new(TracingRelayLogger));

    let client = WandbClient::with_config(transport, args.api_key.as_str(), config);
    let run = RunPath::new(&args.entity_name, &args.project_name, &args.run_id);

    let frame = client
        .fetch_run_history(&run)
        .await
        .with_context(|| format!("failed to fetch history of run {}", run))?;

    frame.to_json().context("failed to encode run history")
}
