//! Folder-name sanitization and filename derivation for downloads.

/// Characters that are never allowed in a folder name.
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum folder name length, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// Name used when a URL ends in `/` and has no final segment.
pub const FALLBACK_FILENAME: &str = "download";

/// Turns arbitrary text into a safe, length-bounded folder name.
///
/// Every forbidden character is dropped (nothing is substituted) and the
/// result is cut to [`MAX_FOLDER_NAME_LEN`] characters. Input made only of
/// forbidden characters yields an empty string; callers that need a
/// non-empty name must check for it.
#[must_use]
pub fn sanitize_folder_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .take(MAX_FOLDER_NAME_LEN)
        .collect()
}

/// Derives the local filename from a URL: the text after its last `/`.
///
/// No decoding or query stripping is applied. A URL ending in `/` has no
/// such text and maps to [`FALLBACK_FILENAME`].
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or(url);
    if last.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        last.to_string()
    }
}
