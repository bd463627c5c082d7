use crate::console::human_seat;
use jwl_core::Policy;
use jwl_strategy::Montplus;
use thiserror::Error;

type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// Builds a seat's policy from the seed derived for that seat.
pub type PolicyCtor = fn(u64) -> Box<dyn Policy>;

/// Problems with the requested line-up.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    /// A seat names a policy nobody registered
    #[error("unknown policy {name:?}, expected one of: {known}")]
    UnknownPolicy {
        /// The requested name
        name: String,
        /// The registered names, comma-separated
        known: String,
    },

    /// A game needs at least two seats
    #[error("a game needs at least 2 seats, got {0}")]
    TooFewSeats(usize),

    /// Only one seat can read from the terminal
    #[error("at most one human seat is supported, got {0}")]
    TooManyHumans(usize),
}

struct Entry {
    about: &'static str,
    ctor: PolicyCtor,
}

/// The policies available by name, in registration order.
///
/// Built explicitly at startup and passed to whatever constructs the game.
#[derive(Default)]
pub struct Registry {
    entries: Map<String, Entry>,
}

impl Registry {
    /// The registry's name for the terminal-driven seat
    pub const HUMAN: &'static str = "human";

    /// Every built-in policy
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(
            "montplus",
            "best response over a multi-horizon evaluation, optimistic about its own bids",
            |seed| Box::new(Montplus::new(seed)),
        );
        registry.register(
            "montplusa",
            "best response over a multi-horizon evaluation, pessimistic about its own bids",
            |seed| Box::new(Montplus::montplusa(seed)),
        );
        registry.register(
            "montplus-lv1",
            "best response over a single-look evaluation with a willingness-to-pay bid",
            |seed| Box::new(Montplus::lv1(seed)),
        );
        registry.register(
            Self::HUMAN,
            "bids typed on standard input, e.g. \"3,0,1\"; an empty line passes",
            human_seat,
        );
        registry
    }

    /// Add (or replace) a policy under `name`
    pub fn register(&mut self, name: impl Into<String>, about: &'static str, ctor: PolicyCtor) {
        self.entries.insert(name.into(), Entry { about, ctor });
    }

    /// The registered names and their descriptions, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.about))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Check a line-up without constructing anything
    pub fn validate(&self, seats: &[String]) -> Result<(), CliError> {
        if seats.len() < 2 {
            return Err(CliError::TooFewSeats(seats.len()));
        }
        if let Some(name) = seats.iter().find(|name| !self.contains(name)) {
            return Err(self.unknown(name));
        }
        let humans = seats.iter().filter(|name| *name == Self::HUMAN).count();
        if humans > 1 {
            return Err(CliError::TooManyHumans(humans));
        }
        Ok(())
    }

    /// Construct the policy registered under `name`
    pub fn build(&self, name: &str, seed: u64) -> Result<Box<dyn Policy>, CliError> {
        self.entries
            .get(name)
            .map(|entry| (entry.ctor)(seed))
            .ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> CliError {
        CliError::UnknownPolicy {
            name: name.to_owned(),
            known: self
                .entries
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
