//! End-to-end packing: scan, filter, read, serialize.

use crate::patterns::load_gitignore_patterns;
use crate::profile::ProfileStore;
use crate::Scanner;
use projpack_core::{Config, FileContent, OutputFormat, Result};
use projpack_filter::{FilterRequest, IgnoreRules, StageCounts};
use std::path::PathBuf;
use tracing::info;

/// What to pack.
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Profile supplying patterns.
    pub project: String,
    /// Folder to scan.
    pub source_folder: PathBuf,
    pub format: OutputFormat,
}

/// Paths chosen for packing, before any content is read.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub paths: Vec<String>,
    pub counts: StageCounts,
}

/// Result of a full pack run.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub files: Vec<FileContent>,
    pub rendered: String,
    pub counts: StageCounts,
}

/// Runs pack requests against one configuration.
#[derive(Debug, Clone)]
pub struct Packer {
    config: Config,
    scanner: Scanner,
    profiles: ProfileStore,
}

impl Packer {
    /// Create a packer with the given configuration.
    pub fn new(config: Config) -> Self {
        let profiles = ProfileStore::from_config(&config);
        Self {
            config,
            scanner: Scanner::new(),
            profiles,
        }
    }

    /// Profiles visible to this packer.
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Scan and filter, without reading contents.
    pub fn select(&self, request: &PackRequest) -> Selection {
        let listing = self.scanner.scan(&request.source_folder);
        let profile = self.profiles.load(&request.project);

        // Profile rules come first; rules found in the tree follow in discovery order.
        let mut ignore_lines = profile.ignore_lines;
        ignore_lines.extend(load_gitignore_patterns(
            &request.source_folder,
            &listing.gitignore_files,
        ));

        let filter_request = FilterRequest {
            paths: listing.files,
            ignore_rules: IgnoreRules::compile(&ignore_lines),
            include_patterns: profile.include,
            exclude_patterns: profile.exclude,
        };
        let result = filter_request.apply();

        info!(
            "Selected {} of {} files ({} ignore rules, {} include, {} exclude patterns)",
            result.counts.after_exclude,
            result.counts.candidates,
            filter_request.ignore_rules.len(),
            filter_request.include_patterns.len(),
            filter_request.exclude_patterns.len()
        );

        Selection {
            paths: result.paths,
            counts: result.counts,
        }
    }

    /// Select, read and render.
    pub fn pack(&self, request: &PackRequest) -> Result<PackOutcome> {
        let selection = self.select(request);
        let files = crate::content::read_contents(
            &request.source_folder,
            &selection.paths,
            self.config.performance.reader_threads,
        )?;
        let rendered = request.format.render(&files)?;

        Ok(PackOutcome {
            files,
            rendered,
            counts: selection.counts,
        })
    }
}
