//! Page resolution: turning a page URL into a destination folder name and
//! the ordered list of file links found on that page.
//!
//! # Architecture
//!
//! - [`PageResolver`] - Async trait the batch engine resolves pages through
//! - [`HtmlLinkResolver`] - Fetches the page over HTTP and scrapes it
//! - [`parse_page`] - The pure HTML extraction step, usable without a network
//!
//! # Example
//!
//! ```no_run
//! use pagegrab_core::download::HttpClient;
//! use pagegrab_core::resolver::{HtmlLinkResolver, PageResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = HtmlLinkResolver::new(HttpClient::new());
//! let page = resolver.resolve("https://example.com/packs/42").await?;
//! println!("{} -> {} link(s)", page.folder_name, page.file_links.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod page;
mod utils;

pub use error::{ParseError, ResolveError};
pub use page::{HtmlLinkResolver, parse_page};
pub use utils::{DOWNLOAD_MARKER, absolutize_url, is_download_link};

use async_trait::async_trait;

/// A page reduced to what the batch engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Sanitized heading text; never empty.
    pub folder_name: String,
    /// Download links in document order, duplicates kept.
    pub file_links: Vec<String>,
}

/// Trait that page resolvers implement.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `Arc<dyn PageResolver>`, which lets tests substitute a counting fake.
#[async_trait]
pub trait PageResolver: Send + Sync {
    /// Fetches and parses `page_url`.
    async fn resolve(&self, page_url: &str) -> Result<ResolvedPage, ResolveError>;
}
