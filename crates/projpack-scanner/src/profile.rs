//! Named project profiles.
//!
//! A profile bundles the pattern sources for one kind of project. It can be
//! declared inline in the config file, or as a folder under the profiles
//! directory:
//!
//! ```text
//! <profiles_dir>/<Name>/.gitignore
//! <profiles_dir>/<Name>/only-include.txt
//! <profiles_dir>/<Name>/also-exclude.txt
//! ```
//!
//! Both sources are merged when a name appears in each.

use crate::patterns::{read_ignore_file, read_token_file};
use crate::GITIGNORE_FILE;
use projpack_core::config::ProjectProfile;
use projpack_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Include list file inside a profile folder.
pub const INCLUDE_FILE: &str = "only-include.txt";
/// Exclude list file inside a profile folder.
pub const EXCLUDE_FILE: &str = "also-exclude.txt";

/// Raw pattern lists for one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatterns {
    /// Lines of the profile's `.gitignore`.
    pub ignore_lines: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Looks up profiles from the config and the profiles directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles_dir: PathBuf,
    projects: Vec<ProjectProfile>,
}

impl ProfileStore {
    /// Create a store over `profiles_dir` and inline `projects`.
    pub fn new(profiles_dir: impl Into<PathBuf>, projects: Vec<ProjectProfile>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            projects,
        }
    }

    /// Create a store from the configured profiles folder and projects.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.profiles_dir.clone(), config.projects.clone())
    }

    /// Folder holding one sub-directory per profile.
    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    /// Distinct profile names: inline ones first, then folders by name.
    pub fn available_profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        };

        for project in &self.projects {
            if !project.name.is_empty() {
                push(&project.name);
            }
        }

        for name in self.profile_folders() {
            push(&name);
        }

        names
    }

    /// Load all patterns for `name`. Unknown names give empty lists.
    pub fn load(&self, name: &str) -> ProfilePatterns {
        let mut patterns = ProfilePatterns::default();

        if let Some(project) = self.projects.iter().find(|p| p.name.eq_ignore_ascii_case(name)) {
            patterns.include.extend(project.only_include.iter().cloned());
            patterns.exclude.extend(project.also_exclude.iter().cloned());
        }

        match self.profile_dir(name) {
            Some(dir) => {
                let gitignore = dir.join(GITIGNORE_FILE);
                match read_ignore_file(&gitignore) {
                    Some(lines) => patterns.ignore_lines = lines,
                    None => warn!("No .gitignore found in {}", dir.display()),
                }
                patterns.include.extend(read_token_file(&dir.join(INCLUDE_FILE)));
                patterns.exclude.extend(read_token_file(&dir.join(EXCLUDE_FILE)));
            }
            None => warn!(
                "Profile folder for {:?} does not exist under {}",
                name,
                self.profiles_dir.display()
            ),
        }

        debug!(
            "Profile {:?}: {} ignore lines, {} include, {} exclude",
            name,
            patterns.ignore_lines.len(),
            patterns.include.len(),
            patterns.exclude.len()
        );

        patterns
    }

    /// Folder for `name`, matched case-insensitively.
    ///
    /// Only direct sub-directories are candidates, so names such as `..` or
    /// `a/b` never resolve.
    fn profile_dir(&self, name: &str) -> Option<PathBuf> {
        let folders = self.profile_folders();
        let folder = folders
            .iter()
            .find(|folder| folder.as_str() == name)
            .or_else(|| folders.iter().find(|folder| folder.eq_ignore_ascii_case(name)))?;
        Some(self.profiles_dir.join(folder))
    }

    /// Sorted names of the sub-directories of the profiles directory.
    fn profile_folders(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.profiles_dir) {
            Ok(entries) => entries,
            Err(_) => {
                warn!(
                    "Profiles folder {} does not exist",
                    self.profiles_dir.display()
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
