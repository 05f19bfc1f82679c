use relay_cli::config::Settings;
use relay_cli::inference::run_inference;
use relay_core::ReqwestTransport;
use std::io;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    relay_cli::logging::init();

    let settings = Settings::from_env();
    run_inference(
        std::env::args_os(),
        &settings,
        ReqwestTransport::new(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await
    .into()
}
