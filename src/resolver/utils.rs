//! Shared helpers for link resolution: static selectors and href handling.

use std::sync::LazyLock;

use scraper::Selector;
use url::Url;

/// Literal, case-sensitive marker that classifies an href as a download link.
pub const DOWNLOAD_MARKER: &str = "download";

/// Compiles a CSS selector at static init; panics on invalid pattern.
pub fn compile_static_selector(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid static selector '{pattern}': {e}"))
}

/// First-level heading.
pub static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("h1"));

/// Anchors carrying an `href`.
pub static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("a[href]"));

/// Returns true if `href` looks like a download link.
///
/// Deliberately loose: the marker may appear anywhere, including the host,
/// an unrelated path segment or the query string.
#[must_use]
pub fn is_download_link(href: &str) -> bool {
    href.contains(DOWNLOAD_MARKER)
}

/// Resolves a possibly relative href against the page URL.
///
/// Returns the value as-is if it already starts with `http://` or `https://`;
/// gives `//...` the page's scheme; otherwise joins with `base_url`.
#[must_use]
pub fn absolutize_url(value: &str, base_url: &Url) -> Option<String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(value.to_string());
    }
    if value.starts_with("//") {
        return Some(format!("{}:{value}", base_url.scheme()));
    }
    base_url.join(value).ok().map(|url| url.to_string())
}
