//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Scrape pages for download links and fetch them into per-page folders.
///
/// Reads a list of page URLs (one per line), names a folder after each
/// page's <h1> heading, and downloads every link containing "download"
/// into that folder.
#[derive(Parser, Debug, Clone)]
#[command(name = "pagegrab")]
#[command(author, version, about)]
pub struct Args {
    /// Text file with one page URL per line
    pub input: Option<PathBuf>,

    /// Directory that receives one sub-folder per page
    pub output: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Print run events as JSON lines on stdout instead of a progress bar
    #[arg(long)]
    pub json: bool,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,
}
