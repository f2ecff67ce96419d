//! Nulock - package lock file generator
//!
//! Usage:
//!   nulock lock restore.json     # Write the lock file next to the project
//!   nulock show restore.json     # Print the lock file
//!   nulock path restore.json     # Show where the lock file lives

mod input;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nulock_core::config::{LockSettings, SETTINGS_FILE_NAME};
use nulock_core::lockfile::{
    LockFile, LockFileBuilder, LockFileFormat, is_lock_file_enabled, lock_file_path,
};

use crate::input::RestoreSnapshot;

#[derive(Parser)]
#[command(name = "nulock")]
#[command(about = "Package lock file generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the lock file and write it to disk
    Lock {
        #[command(flatten)]
        build: BuildArgs,

        /// Write here instead of the project's lock file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the lock file and print it
    Show {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show the project's lock file path
    Path {
        /// Restore snapshot (JSON with `project` and `graph`)
        snapshot: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Restore snapshot (JSON with `project` and `graph`)
    snapshot: PathBuf,

    /// Settings file (defaults to nulock.toml next to the snapshot)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the schema version written to the lock file
    #[arg(long)]
    lock_file_version: Option<u32>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nulock=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lock { build, output } => run_lock(build, output),
        Commands::Show { build } => run_show(build),
        Commands::Path { snapshot } => run_path(&snapshot),
    }
}

fn run_lock(args: BuildArgs, output: Option<PathBuf>) -> Result<()> {
    let (snapshot, lock_file) = build(&args)?;
    let destination = output.unwrap_or_else(|| lock_file_path(&snapshot.project));

    LockFileFormat::write(&destination, &lock_file)
        .with_context(|| format!("Failed to write lock file: {}", destination.display()))?;

    println!("✓ Wrote {}", destination.display());
    for target in lock_file.targets() {
        let direct = target.dependencies().iter().filter(|d| d.is_direct()).count();
        println!(
            "  {}: {} direct, {} transitive",
            target,
            direct,
            target.dependencies().len() - direct
        );
    }
    Ok(())
}

fn run_show(args: BuildArgs) -> Result<()> {
    let (_, lock_file) = build(&args)?;
    let document = LockFileFormat::serialize(&lock_file).context("Failed to render lock file")?;
    println!("{}", document);
    Ok(())
}

fn run_path(snapshot_path: &Path) -> Result<()> {
    let snapshot = RestoreSnapshot::load(snapshot_path)?;
    let path = lock_file_path(&snapshot.project);
    let enabled = is_lock_file_enabled(&snapshot.project);

    println!("{}", path.display());
    println!(
        "Lock file restore: {}",
        if enabled { "enabled" } else { "disabled" }
    );
    if snapshot.project.restore.restore_with_lock_file && !enabled {
        println!("  ⚠ Requested, but no lock file exists yet");
    }
    Ok(())
}

fn build(args: &BuildArgs) -> Result<(RestoreSnapshot, LockFile)> {
    let settings = load_settings(args)?;
    let snapshot = RestoreSnapshot::load(&args.snapshot)?;

    let lock_file = LockFileBuilder::from_settings(&settings)
        .build(&snapshot.graph, &snapshot.project)
        .with_context(|| format!("Failed to build lock file from {}", args.snapshot.display()))?;

    Ok((snapshot, lock_file))
}

fn load_settings(args: &BuildArgs) -> Result<LockSettings> {
    let path = match &args.config {
        Some(path) if !path.exists() => bail!("Settings file not found: {}", path.display()),
        Some(path) => path.clone(),
        None => args
            .snapshot
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(SETTINGS_FILE_NAME),
    };

    let mut settings = LockSettings::load(&path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))?;

    if let Some(version) = args.lock_file_version {
        settings.lock_file_version = version;
        settings.validate()?;
    }

    tracing::debug!(?settings, "Resolved lock settings");
    Ok(settings)
}
