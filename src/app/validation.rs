use std::path::{Path, PathBuf};

/// Message shown when the input list or output directory is missing.
pub(crate) const MISSING_PATHS_MESSAGE: &str = "Please select both input and output paths.";

/// Returns both paths when both were supplied (and non-empty).
pub(crate) fn require_paths(
    input: Option<&Path>,
    output: Option<&Path>,
) -> Option<(PathBuf, PathBuf)> {
    let input = input.filter(|p| !p.as_os_str().is_empty())?;
    let output = output.filter(|p| !p.as_os_str().is_empty())?;
    Some((input.to_path_buf(), output.to_path_buf()))
}
