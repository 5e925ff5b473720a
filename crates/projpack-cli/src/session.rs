//! Resolving the settings for one run from flags, saved state, and prompts.

use crate::prompt::Prompter;
use projpack_core::output::build_output_path;
use projpack_core::{OutputFormat, Result, UserScanSettings};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const FORMAT_CHOICES: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Divider];

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project: Option<String>,
    pub source: Option<PathBuf>,
    pub destination: Option<String>,
    pub format: Option<OutputFormat>,
    /// Reuse saved settings without asking.
    pub assume_yes: bool,
}

impl Overrides {
    fn is_complete(&self) -> bool {
        self.project.is_some() && self.source.is_some() && self.destination.is_some()
    }

    fn apply(&self, mut settings: UserScanSettings, cwd: &Path) -> UserScanSettings {
        if let Some(project) = &self.project {
            settings.project = project.clone();
        }
        if let Some(source) = &self.source {
            settings.source_folder = source.clone();
        }
        if let Some(dest) = &self.destination {
            settings.destination = build_output_path(dest, cwd);
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        settings
    }
}

/// Work out the settings for this run.
///
/// Returns `None` when the run should be abandoned (no profile to pick).
pub fn resolve<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    overrides: &Overrides,
    saved: Option<UserScanSettings>,
    profiles: &[String],
    cwd: &Path,
) -> Result<Option<UserScanSettings>> {
    if overrides.is_complete() {
        return Ok(Some(overrides.apply(UserScanSettings::default(), cwd)));
    }

    if let Some(saved) = saved {
        let reuse = if overrides.assume_yes {
            true
        } else {
            prompter.say("Previous settings found:")?;
            prompter.say(&saved.summary())?;
            prompter.confirm("Do you want to continue with these settings? (Y/N)")?
        };
        if reuse {
            return Ok(Some(overrides.apply(saved, cwd)));
        }
    }

    prompt_for_new(prompter, overrides, profiles, cwd)
}

/// Ask whether to run again; `q`/`Q` or closed input means stop.
pub fn start_again<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<bool> {
    let answer =
        prompter.ask_or_closed("Press [Q] to quit, or any other key to start again.")?;
    Ok(match answer {
        Some(answer) => !answer.eq_ignore_ascii_case("q"),
        None => false,
    })
}

fn prompt_for_new<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    overrides: &Overrides,
    profiles: &[String],
    cwd: &Path,
) -> Result<Option<UserScanSettings>> {
    let project = match &overrides.project {
        Some(project) => project.clone(),
        None => {
            if profiles.is_empty() {
                prompter.say("No project profiles found. Exiting...")?;
                return Ok(None);
            }
            let idx = prompter.choose("Select your source project (by number):", profiles)?;
            profiles[idx].clone()
        }
    };

    let source_folder = match &overrides.source {
        Some(source) => source.clone(),
        None => PathBuf::from(prompter.ask("Enter the absolute source folder path:")?),
    };

    let destination = match &overrides.destination {
        Some(dest) => build_output_path(dest, cwd),
        None => {
            let input = prompter.ask(
                "Enter the destination path (folder or file). If folder only, will use 'Result.txt':",
            )?;
            build_output_path(&input, cwd)
        }
    };

    let format = match overrides.format {
        Some(format) => format,
        None => {
            let labels: Vec<&str> = FORMAT_CHOICES.iter().map(|f| f.label()).collect();
            FORMAT_CHOICES[prompter.choose("Select output text format:", &labels)?]
        }
    };

    Ok(Some(UserScanSettings {
        project,
        source_folder,
        destination,
        format,
    }))
}
