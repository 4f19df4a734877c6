//! File Fetcher - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use file_fetcher::{
    cli::Args,
    config::Config,
    download::Downloader,
    error::{exit_codes, Error, Result},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                Error::UndeterminableExtension(_) => {
                    ExitCode::from(exit_codes::EXTENSION_ERROR as u8)
                }
                Error::Http(_) | Error::Download(_) | Error::Io(_) => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Build configuration from defaults, environment, and CLI overrides
    let url = args.url.clone();
    let headers = args.parse_headers()?;
    let mut config = Config::from_env();
    args.merge_into_config(&mut config);

    let downloader = Downloader::new(config)?;

    let custom_headers = if headers.is_empty() {
        None
    } else {
        Some(&headers)
    };

    let path = downloader.download(&url, custom_headers).await?;
    println!("{}", path.display());

    Ok(())
}
