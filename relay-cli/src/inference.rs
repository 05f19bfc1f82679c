use clap::Parser;
use relay_core::logging::TracingRelayLogger;
use relay_core::{HttpTransport, RelayResult};
use relay_provider_tgi::{generated_text, TgiClient, TgiClientConfig};
use serde_json::Value;
use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::{parse_args, report_error, Outcome, STYLES};

#[derive(Parser, Debug)]
#[command(
    name = "inference",
    version,
    about = "Send one text-generation request to a hosted inference endpoint",
    long_about = "Posts PROMPT with the configured generation parameters to ENDPOINT_URL and prints the generated text.\n\nSet RELAY_PARAMETERS_FILE to a JSON file to override generation parameters.\n\nPROMPT may start with '-'. To send a prompt that is exactly --help or --version, put -- before it.",
    styles = STYLES
)]
pub struct InferenceArgs {
    #[arg(help = "URL of the text-generation endpoint", allow_hyphen_values = true)]
    pub endpoint_url: String,

    #[arg(help = "The prompt to send", allow_hyphen_values = true)]
    pub prompt: String,
}

/// Runs the `inference` command against `transport`.
///
/// Nothing is sent unless both arguments parse and the parameter set loads.
pub async fn run_inference<I, T, H>(
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
    let args: InferenceArgs = match parse_args(argv, stdout, stderr) {
        Ok(args) => args,
        Err(outcome) => return outcome,
    };

    match generate(&args, settings, transport).await {
        Ok(response) => match write_response(stdout, &response) {
            Ok(()) => Outcome::Success,
            Err(err) => {
                report_error(stderr, &err);
                Outcome::Failure
            }
        },
        Err(err) => {
            tracing::debug!(error = ?err, "inference failed");
            report_error(stderr, &err);
            Outcome::Failure
        }
    }
}

async fn generate<H: HttpTransport>(
    args: &InferenceArgs,
    settings: &Settings,
    transport: H,
) -> RelayResult<Value> {
    let config = TgiClientConfig {
        parameters: settings.generation_parameters()?,
        logger: Some(Arc::new(TracingRelayLogger)),
    };
    let client = TgiClient::with_config(transport, config);
    client.generate(&args.endpoint_url, &args.prompt).await
}

/// Prints the generated text, one line per candidate, or the whole body as
/// pretty JSON when it carries no `generated_text`.
pub fn write_response(out: &mut impl Write, response: &Value) -> std::io::Result<()> {
    match generated_text(response) {
        Some(texts) => {
            for text in texts {
                writeln!(out, "{}", text)?;
            }
            Ok(())
        }
        None => {
            let pretty = serde_json::to_string_pretty(response).map_err(std::io::Error::other)?;
            writeln!(out, "{}", pretty)
        }
    }
}
