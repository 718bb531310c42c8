//! HTML page resolver: heading → folder name, `download` anchors → file links.

use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, instrument, warn};
use url::Url;

use super::utils::{ANCHOR_SELECTOR, HEADING_SELECTOR, absolutize_url, is_download_link};
use super::{PageResolver, ParseError, ResolveError, ResolvedPage};
use crate::download::{FetchError, HttpClient, sanitize_folder_name};

/// Resolves pages by fetching them with a shared [`HttpClient`] and
/// scraping the HTML.
#[derive(Debug, Clone)]
pub struct HtmlLinkResolver {
    client: HttpClient,
}

impl HtmlLinkResolver {
    /// Creates a resolver that issues its page requests through `client`.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageResolver for HtmlLinkResolver {
    #[instrument(skip(self), fields(url = %page_url))]
    async fn resolve(&self, page_url: &str) -> Result<ResolvedPage, ResolveError> {
        let page = self.client.fetch_text(page_url).await?;
        let resolved = parse_page(&page.final_url, &page.body)?;
        debug!(
            folder = %resolved.folder_name,
            links = resolved.file_links.len(),
            "page resolved"
        );
        Ok(resolved)
    }
}

/// Extracts the folder name and download links from an HTML document.
///
/// `page_url` is used to absolutize relative hrefs and for error context.
///
/// # Errors
///
/// Returns [`ParseError`] when the page has no `<h1>` or the heading
/// sanitizes to nothing, and [`FetchError::InvalidUrl`] when `page_url`
/// itself cannot be parsed.
pub fn parse_page(page_url: &str, html: &str) -> Result<ResolvedPage, ResolveError> {
    let base_url = Url::parse(page_url).map_err(|_| FetchError::invalid_url(page_url))?;
    let document = Html::parse_document(html);

    let heading = document
        .select(&HEADING_SELECTOR)
        .next()
        .ok_or_else(|| ParseError::missing_heading(page_url))?;
    let heading_text = heading.text().collect::<String>();
    let heading_text = heading_text.trim();

    let folder_name = sanitize_folder_name(heading_text);
    if folder_name.is_empty() {
        return Err(ParseError::empty_heading(page_url, heading_text).into());
    }

    let mut file_links = Vec::new();
    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_download_link(href) {
            continue;
        }
        match absolutize_url(href, &base_url) {
            Some(link) => file_links.push(link),
            None => warn!(href = %href, page = %page_url, "skipping unresolvable download href"),
        }
    }

    Ok(ResolvedPage {
        folder_name,
        file_links,
    })
}
