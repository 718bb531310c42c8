use anyhow::{Context, Result};
use pagegrab_core::{BatchDownloader, HttpClient};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::{config_manager, output, progress_manager, terminal, validation};
use crate::cli::Args;

pub(crate) async fn run_pagegrab(args: Args) -> Result<ProcessExit> {
    let resolved = config_manager::resolve_config(&args)?;

    let no_color = terminal::is_no_color_requested(resolved.no_color);
    terminal::init_tracing(resolved.log_level, resolved.force_cli_log_level, no_color);
    debug!(?resolved, "configuration resolved");

    let Some((input, output_dir)) =
        validation::require_paths(resolved.input.as_deref(), resolved.output_dir.as_deref())
    else {
        eprintln!("{}", validation::MISSING_PATHS_MESSAGE);
        return Ok(ProcessExit::Usage);
    };

    let client =
        HttpClient::try_with_timeouts(resolved.connect_timeout_secs, resolved.read_timeout_secs)
            .context("Failed to initialize HTTP client")?;
    let downloader = BatchDownloader::with_http_client(client);

    let handle = match downloader.start_from_list(&input, output_dir.clone()).await {
        Ok(handle) => handle,
        Err(error) => {
            eprintln!("{}", output::input_error_message(&error));
            return Ok(ProcessExit::Failure);
        }
    };
    info!(input = %input.display(), output = %output_dir.display(), "run started");

    let event_output = progress_manager::EventOutput::select(
        resolved.json,
        resolved.quiet,
        terminal::progress_bar_requested(resolved.quiet, resolved.json),
    );

    match progress_manager::drive_run(handle, event_output).await {
        Ok(summary) => {
            if !resolved.quiet && !resolved.json {
                println!("{}", output::summary_message(&summary, &output_dir));
            }
            Ok(ProcessExit::Success)
        }
        Err(error) => {
            eprintln!("{}", output::run_failure_message(&error));
            Ok(ProcessExit::Failure)
        }
    }
}
