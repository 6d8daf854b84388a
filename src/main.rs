//! Command-line entry point for the Fencing Ladder
//!
//! Manages the club roster and bout results stored in a data directory and
//! prints or exports per-weapon leaderboards.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use fencing_ladder::club::{BoutDraft, ClubRecords};
use fencing_ladder::config::AppConfig;
use fencing_ladder::export::{export_bout_history, export_leaderboard};
use fencing_ladder::scoring::ClubLeaderboardCalculator;
use fencing_ladder::storage::JsonFileStore;
use fencing_ladder::types::{Fencer, Weapon};
use fencing_ladder::utils::{current_timestamp, parse_bout_date};
use chrono::FixedOffset;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Fencing Ladder - club roster and leaderboard tracker
#[derive(Parser)]
#[command(
    name = "fencing-ladder",
    version,
    about = "Track fencers and bouts, and rank them on a per-weapon leaderboard",
    long_about = "Fencing Ladder records club fencers and bout results for epee, foil and sabre, \
                 and derives a leaderboard combining an Elo-style rating with points that decay \
                 over twelve months."
)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Directory holding roster and bout data")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the fencer roster
    #[command(subcommand)]
    Fencer(FencerCommand),

    /// Record and manage bouts
    #[command(subcommand)]
    Bout(BoutCommand),

    /// Print the leaderboard for a weapon
    Leaderboard {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
    },

    /// Write a plain-text report
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Subcommand)]
enum FencerCommand {
    /// Register a new fencer
    Add { name: String },
    /// List all fencers
    List,
    /// Remove a fencer and every bout they fenced or refereed
    Remove {
        /// Fencer name or id
        fencer: String,
    },
}

#[derive(Args)]
struct BoutFields {
    /// Fencer 1 (name or id)
    #[arg(long)]
    fencer1: String,
    /// Fencer 2 (name or id)
    #[arg(long)]
    fencer2: String,
    /// Referee (name or id)
    #[arg(long)]
    referee: String,
    /// Fencer 1's score
    #[arg(long)]
    score1: u32,
    /// Fencer 2's score
    #[arg(long)]
    score2: u32,
    /// Bout date (YYYY-MM-DD or RFC 3339), defaults to now.
    ///
    /// Plain dates mean midnight in the club's time zone, set by
    /// `scoring.utc_offset_minutes` (UTC by default).
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum BoutCommand {
    /// Record a bout result
    Add {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
        #[command(flatten)]
        fields: BoutFields,
    },
    /// Replace an existing bout
    Edit {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
        /// Bout id
        id: String,
        #[command(flatten)]
        fields: BoutFields,
    },
    /// Delete a bout
    Remove {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
        /// Bout id
        id: String,
    },
    /// List a weapon's bouts, newest first
    List {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
    },
}

#[derive(Subcommand)]
enum ExportCommand {
    /// Export a weapon's leaderboard
    Leaderboard {
        #[arg(short, long, default_value = "epee")]
        weapon: Weapon,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export bout history for all weapons
    History {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &cli.log_level {
        config.service.log_level = log_level.clone();
    }

    if cli.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    fencing_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn resolve_fencer<'a>(club: &'a ClubRecords, name_or_id: &str) -> Result<&'a Fencer> {
    club.find_fencer(name_or_id)
        .ok_or_else(|| anyhow!("No fencer named or with id '{}'", name_or_id))
}

fn build_draft(club: &ClubRecords, fields: &BoutFields, offset: FixedOffset) -> Result<BoutDraft> {
    let date = match &fields.date {
        Some(raw) => {
            parse_bout_date(raw, offset).ok_or_else(|| anyhow!("Invalid bout date: {}", raw))?
        }
        None => current_timestamp(),
    };

    Ok(BoutDraft {
        date,
        fencer1_id: resolve_fencer(club, &fields.fencer1)?.id.clone(),
        fencer2_id: resolve_fencer(club, &fields.fencer2)?.id.clone(),
        referee_id: resolve_fencer(club, &fields.referee)?.id.clone(),
        score1: fields.score1,
        score2: fields.score2,
    })
}

fn write_report(report: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report to {}", path.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let offset = config.scoring.club_offset();
    let store = Arc::new(JsonFileStore::new(config.storage.data_dir.clone()));
    let calculator = ClubLeaderboardCalculator::new(config.scoring.clone())?;
    let mut club = ClubRecords::with_calculator(store, Box::new(calculator));
    debug!("Data directory: {}", config.storage.data_dir.display());

    match cli.command {
        Commands::Fencer(FencerCommand::Add { name }) => {
            let fencer = club.add_fencer(&name)?;
            println!("Added {} ({})", fencer.name, fencer.id);
        }
        Commands::Fencer(FencerCommand::List) => {
            if club.fencers().is_empty() {
                println!("No fencers registered.");
            }
            for fencer in club.fencers() {
                println!("{}  {}", fencer.id, fencer.name);
            }
        }
        Commands::Fencer(FencerCommand::Remove { fencer }) => {
            let fencer = resolve_fencer(&club, &fencer)?.clone();
            let removed = club.delete_fencer(&fencer.id)?;
            println!("Removed {} and {} bout(s)", fencer.name, removed);
        }
        Commands::Bout(BoutCommand::Add { weapon, fields }) => {
            let draft = build_draft(&club, &fields, offset)?;
            let bout = club.record_bout(weapon, draft)?;
            println!("Recorded {} bout {}", weapon, bout.id);
        }
        Commands::Bout(BoutCommand::Edit { weapon, id, fields }) => {
            let draft = build_draft(&club, &fields, offset)?;
            club.update_bout(weapon, &id, draft)?;
            println!("Updated {} bout {}", weapon, id);
        }
        Commands::Bout(BoutCommand::Remove { weapon, id }) => {
            club.delete_bout(weapon, &id)?;
            println!("Deleted {} bout {}", weapon, id);
        }
        Commands::Bout(BoutCommand::List { weapon }) => {
            let history = club.bout_history(weapon);
            if history.is_empty() {
                println!("No bouts recorded for {}.", weapon);
            }
            for bout in history {
                let name = |id: &str| club.fencer_name(id).unwrap_or("Unknown").to_string();
                println!(
                    "{}  {}  {} {} - {} {}  (ref: {})",
                    bout.id,
                    bout.date.with_timezone(&offset).format("%Y-%m-%d"),
                    name(bout.fencer1_id.as_str()),
                    bout.score1,
                    bout.score2,
                    name(bout.fencer2_id.as_str()),
                    name(bout.referee_id.as_str())
                );
            }
        }
        Commands::Leaderboard { weapon } => {
            let now = current_timestamp();
            let title = format!("{} - {} Leaderboard", config.service.name, weapon);
            print!(
                "{}",
                export_leaderboard(&title, &club.leaderboard(weapon, now), now)
            );
        }
        Commands::Export(ExportCommand::Leaderboard { weapon, output }) => {
            let now = current_timestamp();
            let title = format!("{} - {} Leaderboard", config.service.name, weapon);
            let report = export_leaderboard(&title, &club.leaderboard(weapon, now), now);
            write_report(&report, output.as_ref())?;
        }
        Commands::Export(ExportCommand::History { output }) => {
            let title = format!("{} - Bout History", config.service.name);
            let report = export_bout_history(
                &title,
                club.all_bouts(),
                &club.fencer_names(),
                offset,
                current_timestamp(),
            );
            write_report(&report, output.as_ref())?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    run(cli, config)
}
