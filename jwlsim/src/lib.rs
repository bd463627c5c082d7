#![warn(missing_docs)]
//! A headless host for the jewel auction.
//!
//! `jwlsim play` seats the requested policies, plays one complete game and
//! writes a JSON [`GameReport`]. Every random source in the game is derived
//! from a single master seed, which the report carries so any game can be
//! replayed exactly.

use jwl_core::{Game, GameEvent, StepOutcome};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::io::Write;
use tracing::{Level, event};

mod cli;
pub use cli::{Cli, Commands, PathOrStd, PlayArgs};

mod config;
pub use config::{AppConfig, GameConfig, OutputConfig};

/// Seating a human at the terminal.
pub mod console;

mod registry;
pub use registry::{CliError, PolicyCtor, Registry};

mod report;
pub use report::{AuctionRecord, GameReport, PlayerReport};

impl Cli {
    /// Execute the requested subcommand
    pub fn evaluate(self, registry: &Registry) -> anyhow::Result<()> {
        match &self.command {
            Commands::Play(args) => {
                let mut config = AppConfig::load(&self)?;
                args.apply(&mut config.game);

                let report = play(&config.game, config.output.history, registry)?;
                let mut output = args.output.write()?;
                if config.output.pretty {
                    serde_json::to_writer_pretty(&mut output, &report)?;
                } else {
                    serde_json::to_writer(&mut output, &report)?;
                }
                writeln!(output)?;
                output.flush()?;
            }
            Commands::Policies => {
                let mut out = std::io::stdout().lock();
                for (name, about) in registry.iter() {
                    writeln!(out, "{name:<14}{about}")?;
                }
            }
        }

        Ok(())
    }
}

/// Play one complete game as configured.
///
/// The master seed (drawn from the operating system if not configured)
/// seeds a generator from which the jewel source and then each seat, in
/// order, receive their own seed.
pub fn play(config: &GameConfig, history: bool, registry: &Registry) -> anyhow::Result<GameReport> {
    registry.validate(&config.seats)?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut seeds = StdRng::seed_from_u64(seed);
    let jewels = StdRng::seed_from_u64(seeds.random());
    let seats = config
        .seats
        .iter()
        .map(|name| registry.build(name, seeds.random()))
        .collect::<Result<Vec<_>, _>>()?;

    event!(Level::INFO, seed = seed, seats = ?config.seats, "starting game");
    let mut game = Game::with_rng(seats, config.rules, jewels)?;

    let mut report = GameReport {
        seed,
        auctions: 0,
        settled: 0,
        discarded: 0,
        players: Vec::new(),
        history: Vec::new(),
    };
    while !game.is_over() {
        let (phase, round) = (game.ledger().phase(), game.ledger().round());
        if let GameEvent::AuctionClosed { jewel, outcome, .. } = game.step()? {
            report.auctions += 1;
            match outcome {
                StepOutcome::Settled { .. } => report.settled += 1,
                _ => report.discarded += 1,
            }
            if history {
                report.history.push(AuctionRecord::new(phase, round, jewel, &outcome));
            }
        }
    }

    report.players =
        PlayerReport::from_ledger(game.ledger(), game.seats().iter().map(|seat| seat.name()));
    event!(
        Level::INFO,
        auctions = report.auctions,
        settled = report.settled,
        "game finished"
    );
    Ok(report)
}
