use clap::Parser;
use fixture_export::cli::{Args, is_config_command};
use fixture_export::commands;
use fixture_export::config::Config;
use fixture_export::logging::setup_logging;
use fixture_export::reporter::TracingReporter;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Loaded before logging so a configured log path takes effect.
    let config = Config::load().await;
    let config_log_path = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_file_path.clone());

    let _guard = match setup_logging(&args, config_log_path.as_deref()).await {
        Ok((log_file_path, guard)) => {
            info!("Logs are being written to: {log_file_path}");
            guard
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.list_config {
        commands::handle_list_config_command().await
    } else if is_config_command(&args) {
        commands::handle_config_update_command(&args).await
    } else {
        match config {
            Ok(config) => commands::run_export(&args, &config, TracingReporter::shared())
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
