//! Dicelock CLI
//!
//! Plays the provably-fair non-transitive dice game against the terminal
//! user. Dice come in on the command line, one argument per die; every
//! random decision in the session is backed by a commit-reveal round the
//! user can verify offline.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use rand::rngs::OsRng;
use tracing_subscriber::EnvFilter;

use dicelock_core::{DiceSet, GameSession, Outcome, TiePolicy};

mod term;

use term::TermInteraction;

const USAGE_EXAMPLE: &str = "dicelock 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

#[derive(Parser)]
#[command(name = "dicelock")]
#[command(about = "Provably fair non-transitive dice, one argument per die")]
#[command(version)]
struct Cli {
    /// Dice definitions, each a comma-separated list of integer faces
    dice: Vec<String>,

    /// Rule applied when both rolls come out equal: host, user or draw
    #[arg(long, default_value = "host")]
    tie_policy: TiePolicy,

    /// Write the session transcript (digests, keys, secrets) as JSON
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let dice = match DiceSet::parse(&cli.dice) {
        Ok(dice) => dice,
        Err(err) => bail!("{}\nExample: {}", err, USAGE_EXAMPLE),
    };

    let peer = TermInteraction::new()?;
    let session = GameSession::new(dice, OsRng, peer).with_tie_policy(cli.tie_policy);
    let report = session.run()?;

    tracing::info!(session = %report.session, outcome = %report.outcome, "game over");

    let banner = match report.outcome {
        Outcome::UserWins => "You win!".green().bold(),
        Outcome::HostWins => "I win!".red().bold(),
        Outcome::Tie => "It's a tie.".yellow().bold(),
    };
    println!("{}", banner);

    if let Some(path) = cli.transcript {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing transcript to {}", path.display()))?;
        println!("Transcript written to {}", path.display());
    }

    Ok(())
}
