use relay_cli::config::Settings;
use relay_cli::fetch_wandb_data::run_fetch_wandb_data;
use relay_core::ReqwestTransport;
use std::io;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    relay_cli::logging::init();

    let settings = Settings::from_env();
    run_fetch_wandb_data(
        std::env::args_os(),
        &settings,
        ReqwestTransport::new(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
    .into()
}
