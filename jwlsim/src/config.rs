//! Application configuration management.
//!
//! Configuration is merged from default values, an optional TOML file and
//! environment variables, in increasing order of precedence. Command-line
//! arguments of the `play` subcommand are applied on top by the caller.

use crate::Cli;
use jwl_core::Rules;
use serde::{Deserialize, Serialize};

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// The game to play: seats, seed and rules
    #[serde(default)]
    pub game: GameConfig,

    /// How the report is written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Who plays, under which rules, from which seed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// One registered policy name per seat, in seating order
    pub seats: Vec<String>,
    /// The master seed; drawn from the operating system when absent
    pub seed: Option<u64>,
    /// The game's rules
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seats: vec!["montplusa".to_owned(), "montplus".to_owned()],
            seed: None,
            rules: Rules::default(),
        }
    }
}

/// Report formatting options.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the JSON report
    pub pretty: bool,
    /// Include a record of every auction in the report
    pub history: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            history: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`; seats are comma-separated.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Seat three bidders
    /// export APP_GAME__SEATS="montplusa,montplus,montplus-lv1"
    ///
    /// # Replay a game
    /// export APP_GAME__SEED=1234
    ///
    /// # Play a shorter game
    /// export APP_GAME__RULES__PHASES=3
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("game.seats")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
