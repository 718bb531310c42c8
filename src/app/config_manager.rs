//! Configuration lifecycle: load file config, merge CLI, resolve timeouts and log level.

use std::path::PathBuf;

use anyhow::Result;
use pagegrab_core::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

use crate::app::config::{FileConfig, VerbositySetting, load_default_file_config};
use crate::cli::Args;

/// Settings for one invocation after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub(crate) input: Option<PathBuf>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) read_timeout_secs: u64,
    pub(crate) log_level: &'static str,
    /// True when -v/-q were given, so `RUST_LOG` must not override them.
    pub(crate) force_cli_log_level: bool,
    pub(crate) quiet: bool,
    pub(crate) json: bool,
    pub(crate) no_color: bool,
}

/// Loads the default config file and merges `args` over it.
pub(crate) fn resolve_config(args: &Args) -> Result<ResolvedConfig> {
    let file_config = load_default_file_config()?;
    Ok(merge_config(args, file_config.as_ref()))
}

pub(crate) fn merge_config(args: &Args, file_config: Option<&FileConfig>) -> ResolvedConfig {
    let file_verbosity = file_config.and_then(|c| c.verbosity);
    let cli_sets_verbosity = args.quiet || args.verbose > 0;

    let verbosity = if cli_sets_verbosity {
        cli_verbosity(args)
    } else {
        file_verbosity.unwrap_or(VerbositySetting::Default)
    };

    ResolvedConfig {
        input: args.input.clone(),
        output_dir: args
            .output
            .clone()
            .or_else(|| file_config.and_then(|c| c.output_dir.clone())),
        connect_timeout_secs: args
            .connect_timeout
            .or_else(|| file_config.and_then(|c| c.connect_timeout_secs))
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        read_timeout_secs: args
            .read_timeout
            .or_else(|| file_config.and_then(|c| c.read_timeout_secs))
            .unwrap_or(READ_TIMEOUT_SECS),
        log_level: log_level_for(verbosity),
        force_cli_log_level: cli_sets_verbosity,
        quiet: verbosity == VerbositySetting::Quiet,
        json: args.json,
        no_color: args.no_color,
    }
}

fn cli_verbosity(args: &Args) -> VerbositySetting {
    if args.quiet {
        VerbositySetting::Quiet
    } else if args.verbose == 1 {
        VerbositySetting::Verbose
    } else {
        VerbositySetting::Debug
    }
}

fn log_level_for(verbosity: VerbositySetting) -> &'static str {
    match verbosity {
        VerbositySetting::Quiet => "error",
        VerbositySetting::Default => "info",
        VerbositySetting::Verbose => "debug",
        VerbositySetting::Debug => "trace",
    }
}
