//! ig-spider - CLI entry point.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ig_spider::{
    api::InstagramApi,
    checkpoint::{Checkpoint, CheckpointStore},
    cli::Args,
    config::{validate_config, Config},
    download::{AbortCause, CrawlSettings, Crawler, TerminalState},
    error::{exit_codes, Error, Result},
    fs::require_directory,
    output::{
        print_banner, print_error, print_info, print_run_config, print_run_summary,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::DirectoryNotFound(_)
        | Error::CheckpointNotFound(_)
        | Error::CorruptState { .. }
        | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
        Error::MissingField(_) | Error::FeedExhausted | Error::Json(_) | Error::UrlParse(_) => {
            exit_codes::API_ERROR
        }
        Error::TransientFetch(_) | Error::AbortRequested(_) | Error::InvalidFilename(_) => {
            exit_codes::DOWNLOAD_ERROR
        }
        Error::Io(_) => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration; the file is optional
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        tracing::debug!(
            "No configuration file at {}, using defaults",
            args.config.display()
        );
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let download_dir = config.download_directory();
    require_directory(&download_dir)?;
    let store = CheckpointStore::in_directory(&download_dir);

    let policy = args.budget_policy();
    let checkpoint = Checkpoint::for_run(&config, &store, policy)?;

    print_run_config(
        &checkpoint.username,
        &policy.map_or_else(|| "new".to_string(), |p| p.to_string()),
        &checkpoint.download_type.to_string(),
        (checkpoint.page_index, checkpoint.page_limit),
        &download_dir.display().to_string(),
    );

    let api = InstagramApi::new(&config.client)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            signal.store(true, Ordering::SeqCst);
        }
    });

    let settings = CrawlSettings {
        download_dir,
        stop_on_existing: config.options.stop_on_existing,
        page_delay_ms: config.options.page_delay_ms,
        show_progress: config.options.show_downloads,
        show_skipped: config.options.show_skipped_downloads,
    };

    let crawler = Crawler::new(&api, &api, store.clone(), settings, shutdown);
    let report = crawler.run(checkpoint).await;

    print_run_summary(&report);
    match &report.flush_error {
        None => print_success(&format!("{} was saved", store.path().display())),
        Some(e) => print_warning(&format!("Checkpoint was not saved: {}", e)),
    }

    match report.terminal {
        TerminalState::Exhausted => {
            print_info("No more pages");
            Ok(exit_codes::SUCCESS)
        }
        TerminalState::LimitReached => {
            print_info("Page limit reached, use --continue to download more");
            Ok(exit_codes::SUCCESS)
        }
        TerminalState::Aborted(AbortCause::ExistingFile(_)) => Ok(exit_codes::SUCCESS),
        TerminalState::Aborted(AbortCause::Interrupted) => Ok(exit_codes::ABORT),
        TerminalState::Aborted(AbortCause::Failed(e)) => Err(e),
    }
}
