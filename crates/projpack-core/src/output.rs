//! Output artifact formats.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File name used when the destination is a directory.
pub const DEFAULT_OUTPUT_FILE: &str = "Result.txt";

/// A packed file: its relative path and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

/// How packed files are serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of `{path, content}` records.
    #[default]
    Json,
    /// `--FILE` / `--END` delimited plain text.
    Divider,
}

impl OutputFormat {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Divider => "Simple Divider",
        }
    }

    /// Serialize the files in this format.
    pub fn render(self, files: &[FileContent]) -> crate::Result<String> {
        match self {
            OutputFormat::Json => format_json(files),
            OutputFormat::Divider => Ok(format_divider(files)),
        }
    }
}

/// Serialize files as a compact JSON array.
pub fn format_json(files: &[FileContent]) -> crate::Result<String> {
    Ok(serde_json::to_string(files)?)
}

/// Serialize files as divider-delimited blocks.
pub fn format_divider(files: &[FileContent]) -> String {
    let mut out = String::new();
    for file in files {
        let file_name = file.path.rsplit('/').next().unwrap_or(&file.path);
        // Writing to a String cannot fail.
        let _ = writeln!(out, "--FILE {}", file.path);
        let _ = writeln!(out, "{}", file.content);
        let _ = writeln!(out, "--END ({file_name})");
        out.push('\n');
    }
    out
}

/// Resolve the user's destination input into a concrete output file path.
///
/// - blank input: `<cwd>/Result.txt`
/// - input with an extension: that file, made absolute against `cwd`
/// - anything else is treated as a directory: `<dir>/Result.txt`
pub fn build_output_path(input: &str, cwd: &Path) -> PathBuf {
    let input = input.trim();
    if input.is_empty() {
        return cwd.join(DEFAULT_OUTPUT_FILE);
    }

    let path = cwd.join(input);
    if Path::new(input).extension().is_some() {
        path
    } else {
        path.join(DEFAULT_OUTPUT_FILE)
    }
}
