//! Classboard command line entry point.

use clap::Parser;
use classboard_app::{App, AppConfig, AppError, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match pollster::block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::from_cli(&cli)?;
    let mut app = App::start(config).await?;
    let mut out = std::io::stdout().lock();
    app.run(cli.command, &mut out).await
}
