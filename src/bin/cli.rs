//! profile-views CLI
//!
//! Fetches the profile-views badge, records the count, and renders a local
//! badge. Meant to run once per day from a scheduled job.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use profile_views::{
    error::Result,
    models::Config,
    pipeline,
    services::BadgeFetcher,
    storage::LocalStorage,
    utils,
};

/// profile-views - badge counter tracker
#[derive(Parser, Debug)]
#[command(
    name = "profile-views",
    version,
    about = "Track a profile-views badge counter"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "profile-views.toml")]
    config: PathBuf,

    /// Base directory for state files
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the badge and record today's count
    Update {
        /// Account to fetch (overrides fetch.username)
        #[arg(short, long)]
        username: Option<String>,

        /// Record under this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Add one like
    Like {
        /// Date for a freshly created snapshot (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Re-render the local badge from stored state
    Render,

    /// Show stored snapshot and history
    Show,

    /// Validate configuration
    Validate,

    /// Extract the count from a saved badge file
    Extract {
        /// Markup file to read
        file: PathBuf,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    let storage =
        LocalStorage::with_recovery(&cli.root, &config.paths, config.history.on_malformed);

    match cli.command {
        Command::Update { username, date } => {
            let username = config.username(username.as_deref())?;
            let date = date.unwrap_or_else(utils::today);
            let fetcher = BadgeFetcher::new(&config.fetch)?;

            let summary =
                pipeline::run_update(&config, &storage, &fetcher, &username, date).await?;

            log::info!(
                "OK: {} -> views={}, date={}, history entries={}",
                summary.username,
                summary.views,
                summary.date,
                summary.history_len
            );
        }

        Command::Like { date } => {
            let date = date.unwrap_or_else(utils::today);
            pipeline::run_like(&config, &storage, date).await?;
        }

        Command::Render => pipeline::run_render(&config, &storage).await?,

        Command::Show => pipeline::run_show(&storage).await?,

        // Strict load: a broken file must not pass as defaults.
        Command::Validate => pipeline::run_validate(&Config::load(&cli.config)?)?,

        Command::Extract { file } => {
            let extraction = pipeline::run_extract(&file).await?;
            println!("{}", extraction.count);
        }
    }

    Ok(())
}
