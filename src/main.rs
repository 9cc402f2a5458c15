use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;

use suroy_notifier::{config::Cli, initialize_logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    // import .env file
    dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = initialize_logging();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
