//! Command-line interface definition and parsing.

use crate::GameConfig;
use clap::{Args, Parser, Subcommand};
use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    str::FromStr,
};

/// Command-line arguments for the jewel auction simulator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// The available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one game headlessly and report the result as JSON
    Play(PlayArgs),

    /// List the registered policies
    Policies,
}

/// Arguments of the `play` subcommand; each overrides the configuration.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// A seat's policy, by registered name (repeat once per seat)
    #[arg(short, long = "seat", value_name = "POLICY")]
    pub seats: Vec<String>,

    /// The master seed every random source is derived from
    #[arg(long)]
    pub seed: Option<u64>,

    /// The report file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    pub output: PathOrStd,
}

impl PlayArgs {
    /// Replace the configured seats and seed with any given on the command line.
    pub fn apply(&self, game: &mut GameConfig) {
        if !self.seats.is_empty() {
            game.seats = self.seats.clone();
        }
        if self.seed.is_some() {
            game.seed = self.seed;
        }
    }
}

/// A file path, or one of the standard streams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStd {
    /// A file on disk
    Path(PathBuf),
    /// The standard stream
    Std,
}

impl PathOrStd {
    /// Open for writing, truncating an existing file.
    pub fn write(&self) -> std::io::Result<Box<dyn Write>> {
        match self {
            Self::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            Self::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}
