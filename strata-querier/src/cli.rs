use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::{config::ConsistencyCheckConfig, error::QuerierError, snapshot::load_snapshot};

#[derive(Parser)]
#[command(name = "strata-querier")]
#[command(about = "Strata querier tooling: audits fan-out query coverage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the blocks consistency check over a recorded snapshot
    Check {
        #[arg(short, long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Config file; defaults are used when omitted
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the upload grace period (seconds)
        #[arg(long, value_name = "SECS")]
        upload_grace_period: Option<u64>,

        /// Override the deletion marks delay (seconds)
        #[arg(long, value_name = "SECS")]
        deletion_marks_delay: Option<u64>,
    },
    /// Write the default configuration file
    InitConfig {
        #[arg(short, long, value_name = "OUT", default_value = "consistency.json")]
        out: PathBuf,
    },
}

/// Applies command-line overrides on top of a loaded config.
pub fn apply_overrides(
    mut config: ConsistencyCheckConfig,
    upload_grace_period: Option<u64>,
    deletion_marks_delay: Option<u64>,
) -> ConsistencyCheckConfig {
    if let Some(secs) = upload_grace_period {
        config.upload_grace_period_secs = secs;
    }
    if let Some(secs) = deletion_marks_delay {
        config.deletion_marks_delay_secs = secs;
    }
    config
}

/// Executes a parsed command.
///
/// `check` runs at the instant recorded in the snapshot, so replaying a
/// snapshot later yields the same verdict. Missing blocks come back as
/// `QuerierError::Consistency`.
pub fn run(command: Commands) -> Result<(), QuerierError> {
    match command {
        Commands::Check {
            snapshot,
            config,
            upload_grace_period,
            deletion_marks_delay,
        } => {
            let base = match config {
                Some(path) => ConsistencyCheckConfig::load_from_file(path)?,
                None => ConsistencyCheckConfig::default(),
            };
            let config = apply_overrides(base, upload_grace_period, deletion_marks_delay);
            let checker = config.build_checker();

            let snapshot = load_snapshot(&snapshot)?;
            let now = snapshot.now()?;
            info!(
                "Checking {} known blocks against {} nodes at {}",
                snapshot.known_blocks.len(),
                snapshot.queried.len(),
                now
            );

            checker.check_at(
                now,
                &snapshot.known_blocks,
                &snapshot.deletion_mark_index(),
                &snapshot.queried,
            )?;
            println!("consistency check passed");
            Ok(())
        }
        Commands::InitConfig { out } => {
            ConsistencyCheckConfig::default().save_to_file(&out)?;
            info!("✅ Default config written to {}", out.display());
            Ok(())
        }
    }
}
