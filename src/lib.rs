//! Pagegrab Core Library
//!
//! This library scrapes web pages for download links, names a folder after
//! each page's heading, and streams the linked files into that folder while
//! emitting progress events.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Reading the page list (one URL per line)
//! - [`resolver`] - Page → folder name + download links
//! - [`download`] - Streaming file fetches and folder-name sanitization
//! - [`batch`] - Sequential run engine, event stream and run handle

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod download;
pub mod parser;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use batch::{
    BatchDownloader, BatchError, CancelFlag, DownloadEvent, EventSink, RunHandle, RunSummary,
};
pub use download::{
    FetchError, FetchFileError, FileFetcher, HttpClient, PageText, WriteError, filename_from_url,
    sanitize_folder_name,
};
pub use parser::{InputError, PageJob, parse_page_list, read_page_list};
pub use resolver::{HtmlLinkResolver, PageResolver, ParseError, ResolveError, ResolvedPage};
