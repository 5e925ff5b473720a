//! Pattern source loaders.
//!
//! Turn `.gitignore` files and include/exclude list files into the flat,
//! ordered string lists the filter consumes. Missing sources give empty lists.

use crate::GITIGNORE_FILE;
use std::path::Path;
use tracing::{debug, warn};

/// Ignore-rule lines from `.gitignore` text: trimmed, blank and `#` lines dropped.
pub fn parse_ignore_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Tokens from an include/exclude list: split on newlines and commas, trimmed.
pub fn parse_pattern_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| matches!(c, '\r' | '\n' | ','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read ignore lines from one `.gitignore` file.
pub fn read_ignore_file(path: &Path) -> Option<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(parse_ignore_lines(&text)),
        Err(e) => {
            debug!("No ignore rules read from {}: {}", path.display(), e);
            None
        }
    }
}

/// Read tokens from one include/exclude list file.
pub fn read_token_file(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_pattern_tokens(&text),
        Err(e) => {
            debug!("No pattern tokens read from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Concatenate the lines of each `.gitignore` below `root`, in the given order.
pub fn load_gitignore_patterns<S: AsRef<str>>(root: &Path, relative_paths: &[S]) -> Vec<String> {
    let mut combined = Vec::new();

    for rel in relative_paths {
        let path = root.join(rel.as_ref());
        match read_ignore_file(&path) {
            Some(lines) => combined.extend(lines),
            None => warn!("Skipping missing {} at {}", GITIGNORE_FILE, path.display()),
        }
    }

    combined
}
