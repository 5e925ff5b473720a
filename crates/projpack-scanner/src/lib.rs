//! projpack-scanner: Directory scanning, pattern loading, and packing.

pub mod content;
pub mod pack;
pub mod patterns;
pub mod profile;

use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use pack::{PackOutcome, PackRequest, Packer, Selection};
pub use profile::{ProfilePatterns, ProfileStore};

/// Name of the files holding ignore rules.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Files found under a scan root, relative and `/`-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanListing {
    /// Regular files, in walk order.
    pub files: Vec<String>,
    /// `.gitignore` files, in discovery order. Never part of `files`.
    pub gitignore_files: Vec<String>,
}

/// Recursive directory scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner;

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// List every regular file below `root`.
    ///
    /// A missing root yields an empty listing.
    pub fn scan(&self, root: &Path) -> ScanListing {
        let mut listing = ScanListing::default();

        if !root.is_dir() {
            warn!("Source folder {} does not exist", root.display());
            return listing;
        }

        info!("Scanning {}", root.display());

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };

            let is_gitignore = entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case(GITIGNORE_FILE);

            if is_gitignore {
                listing.gitignore_files.push(relative);
            } else {
                listing.files.push(relative);
            }
        }

        debug!(
            "Found {} files and {} .gitignore files in {}",
            listing.files.len(),
            listing.gitignore_files.len(),
            root.display()
        );

        listing
    }
}

/// `path` relative to `root`, joined with `/`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let listing = Scanner::new().scan(&dir.path().join("missing"));
        assert_eq!(listing, ScanListing::default());
    }

    #[test]
    fn test_scan_relative_slash_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("src/nested/b.rs"), "b").unwrap();

        let listing = Scanner::new().scan(root);
        assert_eq!(listing.files, vec!["a.txt", "src/nested/b.rs"]);
        assert!(listing.gitignore_files.is_empty());
    }

    #[test]
    fn test_scan_separates_gitignore_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join(".gitignore"), "bin/").unwrap();
        fs::write(root.join("sub/.GITIGNORE"), "*.log").unwrap();
        fs::write(root.join("sub/keep.rs"), "").unwrap();

        let listing = Scanner::new().scan(root);
        assert_eq!(listing.files, vec!["sub/keep.rs"]);
        assert_eq!(listing.gitignore_files, vec![".gitignore", "sub/.GITIGNORE"]);
    }

    #[test]
    fn test_scan_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/deeper")).unwrap();
        let listing = Scanner::new().scan(dir.path());
        assert!(listing.files.is_empty());
    }
}
