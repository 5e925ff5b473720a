//! Reading the contents of selected files.

use projpack_core::{Error, FileContent, Result};
use rayon::prelude::*;
use std::path::Path;
use tracing::warn;

/// Read each relative path below `root` on a pool of `threads` workers.
///
/// Output order follows `paths`. Files that vanished or cannot be read are
/// skipped. Bytes are decoded as UTF-8, replacing invalid sequences.
pub fn read_contents<S>(root: &Path, paths: &[S], threads: usize) -> Result<Vec<FileContent>>
where
    S: AsRef<str> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| Error::Scanner(e.to_string()))?;

    let files: Vec<FileContent> = pool.install(|| {
        paths
            .par_iter()
            .filter_map(|rel| read_one(root, rel.as_ref()))
            .collect()
    });

    Ok(files)
}

fn read_one(root: &Path, rel: &str) -> Option<FileContent> {
    let full = root.join(rel.trim_start_matches(|c: char| c == '/' || c == '\\'));
    match std::fs::read(&full) {
        Ok(bytes) => Some(FileContent {
            path: rel.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        }),
        Err(e) => {
            warn!("Skipping {}: {}", full.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("file1.txt"), "Content1").unwrap();
        fs::write(dir.path().join("sub/file2.txt"), "Content2").unwrap();

        let files = read_contents(dir.path(), &["sub/file2.txt", "file1.txt"], 2).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "sub/file2.txt");
        assert_eq!(files[0].content, "Content2");
        assert_eq!(files[1].content, "Content1");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("file1.txt"), "Content1").unwrap();

        let files = read_contents(dir.path(), &["file1.txt", "file2.txt"], 1).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "file1.txt");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin.dat"), [0x66, 0x6f, 0xff, 0x6f]).unwrap();

        let files = read_contents(dir.path(), &["bin.dat"], 0).unwrap();
        assert_eq!(files[0].content, "fo\u{fffd}o");
    }
}
