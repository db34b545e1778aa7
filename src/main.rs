//! Lockbreaker - CLI
//!
//! Mastermind-style code-breaking game with TUI and text modes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lockbreaker::{
    commands::{list_slots, run_simple, score_guess},
    config::{Config, DEFAULT_CONFIG_FILE, load_config},
    logging,
    output::{write_rules, write_score},
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lockbreaker",
    about = "Crack a 4-6 digit lock in ten guesses using red and white pin clues",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory for save slots, overriding the config file
    #[arg(short = 'd', long, global = true)]
    save_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple text menu mode
    Simple,

    /// Print the rules
    Rules,

    /// Score a guess against a secret
    Score {
        /// The secret code, e.g. 1231
        secret: String,

        /// The guess to score, e.g. 1213
        guess: String,
    },

    /// List the save slots
    Slots,
}

/// Load the config file and apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(&cli.config)?;
    if let Some(dir) = &cli.save_dir {
        config.save_dir.clone_from(dir);
        config.validate()?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&config),
        Commands::Simple => run_simple(&config.slot_store()),
        Commands::Rules => Ok(write_rules(&mut io::stdout())?),
        Commands::Score { secret, guess } => run_score_command(&secret, &guess),
        Commands::Slots => run_slots_command(&config),
    }
}

fn run_score_command(secret: &str, guess: &str) -> Result<()> {
    let result = score_guess(secret, guess)?;
    write_score(&mut io::stdout(), &result.secret, &result.guess, result.score)?;
    Ok(())
}

fn run_slots_command(config: &Config) -> Result<()> {
    list_slots(&mut io::stdout(), &config.slot_store())?;
    Ok(())
}

fn run_play_command(config: &Config) -> Result<()> {
    use lockbreaker::interactive::{App, run_tui};

    let app = App::new(config.slot_store());
    run_tui(app)
}
