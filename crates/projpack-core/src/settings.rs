//! Persisted last-used scan settings.

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The choices made for one scan run, remembered for the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserScanSettings {
    /// Name of the project profile supplying patterns.
    pub project: String,
    /// Folder that gets scanned.
    pub source_folder: PathBuf,
    /// Output file.
    pub destination: PathBuf,
    pub format: OutputFormat,
}

impl UserScanSettings {
    /// Load saved settings.
    ///
    /// Returns `None` when the file is missing, unparsable, or incomplete.
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let settings: Self = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                debug!("Ignoring unreadable settings at {}: {}", path.display(), e);
                return None;
            }
        };

        settings.is_complete().then_some(settings)
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// All of project, source and destination are set.
    pub fn is_complete(&self) -> bool {
        !self.project.is_empty()
            && !self.source_folder.as_os_str().is_empty()
            && !self.destination.as_os_str().is_empty()
    }

    /// Multi-line summary for display before reuse.
    pub fn summary(&self) -> String {
        format!(
            "  Project Folder: {}\n  Source Folder:  {}\n  Destination:    {}\n  Format:         {}",
            self.project,
            self.source_folder.display(),
            self.destination.display(),
            self.format.label()
        )
    }
}
