//! projpack-cli: Command-line interface for projpack.

mod prompt;
mod session;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use projpack_core::{Config, OutputFormat, UserScanSettings};
use projpack_scanner::{PackRequest, Packer};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::prompt::Prompter;
use crate::session::Overrides;

#[derive(Parser)]
#[command(name = "projpack")]
#[command(about = "Pack a project's source files into one JSON or text file", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PROJPACK_DIR/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan, filter and pack a project (the default)
    Run(RunArgs),

    /// List available project profiles
    Projects,

    /// Show build information
    Version,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Project profile supplying the patterns
    #[arg(short, long)]
    project: Option<String>,

    /// Folder to scan
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output file, or a folder to write Result.txt into
    #[arg(short, long)]
    dest: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Reuse saved settings without asking
    #[arg(short, long)]
    yes: bool,

    /// Print the selected paths instead of writing output
    #[arg(long)]
    dry_run: bool,

    /// Don't remember these settings for next time
    #[arg(long)]
    no_save: bool,

    /// Offer to start again after each run
    #[arg(long)]
    repeat: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Divider,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Divider => OutputFormat::Divider,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.log_level {
        Some(level) => projpack_core::logging::init_with_level(level),
        None => projpack_core::logging::init(),
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(projpack_core::paths::config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    match cli.command {
        Some(Commands::Run(args)) => run(config, &args),
        Some(Commands::Projects) => projects(config),
        Some(Commands::Version) => {
            println!(
                "{}",
                projpack_core::build_info::version_string("projpack")
            );
            Ok(())
        }
        None => run(config, &RunArgs::default()),
    }
}

fn run(config: Config, args: &RunArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let packer = Packer::new(config.clone());
    let profiles = packer.profiles().available_profiles();

    let overrides = Overrides {
        project: args.project.clone(),
        source: args.source.clone(),
        destination: args.dest.clone(),
        format: args.format.map(OutputFormat::from),
        assume_yes: args.yes,
    };

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    loop {
        let saved = UserScanSettings::load(&config.settings_path);
        let Some(settings) = session::resolve(&mut prompter, &overrides, saved, &profiles, &cwd)
            .context("failed to read settings")?
        else {
            return Ok(());
        };

        run_once(&packer, &config, args, &settings)?;

        if !args.repeat || !session::start_again(&mut prompter).context("failed to read answer")? {
            return Ok(());
        }
    }
}

fn run_once(
    packer: &Packer,
    config: &Config,
    args: &RunArgs,
    settings: &UserScanSettings,
) -> Result<()> {
    let request = PackRequest {
        project: settings.project.clone(),
        source_folder: settings.source_folder.clone(),
        format: settings.format,
    };

    if args.dry_run {
        let selection = packer.select(&request);
        for path in &selection.paths {
            println!("{path}");
        }
        println!(
            "Dry run: would pack {} of {} files",
            selection.counts.after_exclude, selection.counts.candidates
        );
        return Ok(());
    }

    let outcome = packer.pack(&request).context("failed to pack files")?;
    let write_result = write_output(&settings.destination, &outcome.rendered);

    if !args.no_save {
        if let Err(e) = settings.save(&config.settings_path) {
            warn!("Failed to save user settings: {}", e);
        }
    }

    write_result?;
    info!("Packed {} files", outcome.files.len());
    println!(
        "Successfully saved the result to: {}",
        settings.destination.display()
    );
    println!("Processing completed.");

    Ok(())
}

fn write_output(destination: &std::path::Path, rendered: &str) -> Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(destination, rendered)
        .with_context(|| format!("failed to write {}", destination.display()))
}

fn projects(config: Config) -> Result<()> {
    let packer = Packer::new(config);
    let profiles = packer.profiles().available_profiles();

    if profiles.is_empty() {
        println!("No project profiles found.");
        println!(
            "Create a folder under {} or add [[projects]] to the config file.",
            packer.profiles().profiles_dir().display()
        );
        return Ok(());
    }

    for name in profiles {
        println!("{name}");
    }
    Ok(())
}
