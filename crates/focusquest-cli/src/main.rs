use clap::{Parser, Subcommand};
use focusquest_core::Config;

mod commands;
mod common;
mod notify;

#[derive(Parser)]
#[command(name = "focusquest", version, about = "Gamified Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Badge catalog
    Badges {
        /// Only show earned badges
        #[arg(long)]
        earned: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    // The subscriber needs the configured level, so the load is reported here.
    focusquest_core::logging::init_with_level(&config.logging.level);
    match load_error {
        Some(e) => tracing::warn!("Failed to load config: {}. Using defaults.", e),
        None => tracing::debug!(level = %config.logging.level, "Loaded config"),
    }

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, config),
        Commands::Stats { action } => commands::stats::run(action, config),
        Commands::Badges { earned } => commands::badges::run(earned, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
