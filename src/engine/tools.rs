//! Path and filter utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// True if the file name ends with `.<extension>`, ignoring case.
pub fn has_document_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());
    name.to_lowercase().ends_with(&suffix)
}

/// Canonicalize the target directory; fails if it does not exist.
pub fn check_root_and_canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("canonicalize path {}", path.display()))
}

/// Join CLI words into the search term with single spaces.
pub fn join_term(words: &[String]) -> String {
    words.join(" ")
}
