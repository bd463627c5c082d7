use super::{Coins, Jewel, Rules};
use crate::GameError;
use std::ops::Index;

/// Everything a single player owns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holdings {
    /// Accumulated points; never decreases
    pub score: u32,
    /// Coins received at the start of every phase
    pub income: Coins,
    /// Coins currently available for bidding
    pub balance: Coins,
}

/// The outcome of advancing the round counter after an auction closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundAdvance {
    /// The phase continues with the next round
    Round,
    /// A new phase started and income was paid out
    Phase,
    /// The final phase is complete
    Finished,
}

/// A player's position in the final (or current) standings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    /// The seat index
    pub player: usize,
    /// 1-based rank; players with equal score and coin total share a rank
    pub rank: usize,
    /// The player's score
    pub score: u32,
    /// The player's coins summed over all currencies
    pub coins: u32,
}

/// The persistent state of one game.
///
/// The ledger is mutated only by settlement and by phase-income application.
/// Hypothetical ledgers for look-ahead are produced by cloning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ledger {
    rules: Rules,
    phase: u32,
    round: u32,
    players: Vec<Holdings>,
}

impl Ledger {
    /// A fresh game for `num_players` under the default rules
    pub fn new(num_players: usize) -> Self {
        Self::with_rules(num_players, Rules::default())
    }

    /// A fresh game: phase 1, round 1, zero score and income, starting coins in every currency
    pub fn with_rules(num_players: usize, rules: Rules) -> Self {
        let start = Holdings {
            balance: Coins::splat(rules.starting_coins),
            ..Default::default()
        };
        Self {
            rules,
            phase: 1,
            round: 1,
            players: vec![start; num_players],
        }
    }

    /// Reconstruct a ledger from explicit parts, e.g. to examine a hypothetical position
    pub fn from_parts(rules: Rules, phase: u32, round: u32, players: Vec<Holdings>) -> Self {
        Self {
            rules,
            phase,
            round,
            players,
        }
    }

    /// The rules this game is played under
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The current phase, starting at 1
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// The current round within the phase, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number of seated players
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// All players' holdings, by seat
    pub fn players(&self) -> &[Holdings] {
        &self.players
    }

    /// A single player's holdings, if the seat exists
    pub fn player(&self, player: usize) -> Option<&Holdings> {
        self.players.get(player)
    }

    /// Number of auctions held in one phase
    pub fn rounds_per_phase(&self) -> u32 {
        self.rules.rounds_per_player * self.players.len() as u32
    }

    /// Fraction of the current phase's rounds already reached, in (0, 1]
    pub fn round_progress(&self) -> f64 {
        let total = self.rounds_per_phase();
        if total == 0 {
            0.0
        } else {
            f64::from(self.round) / f64::from(total)
        }
    }

    /// Phases remaining after the current one
    pub fn phases_left(&self) -> u32 {
        self.rules.phases.saturating_sub(self.phase)
    }

    /// Whether the final phase has been completed
    pub fn is_over(&self) -> bool {
        self.phase > self.rules.phases
    }

    /// Award `item` to `winner` for `price`.
    ///
    /// The winner pays the price from their balance and gains the jewel's
    /// points and income; nobody else is touched. Fails without modifying
    /// anything if the winner cannot pay.
    pub fn settle(&mut self, winner: usize, price: Coins, item: &Jewel) -> Result<(), GameError> {
        let holdings = self
            .players
            .get_mut(winner)
            .ok_or(GameError::UnknownPlayer(winner))?;

        let balance = holdings
            .balance
            .checked_sub(&price)
            .ok_or(GameError::Overdraft {
                player: winner,
                price,
                balance: holdings.balance,
            })?;

        holdings.balance = balance;
        holdings.score += item.points;
        holdings.income = holdings.income + item.income;
        Ok(())
    }

    /// Add every player's income to their balance
    pub fn apply_phase_income(&mut self) {
        for holdings in self.players.iter_mut() {
            holdings.balance = holdings.balance + holdings.income;
        }
    }

    /// Move on after an auction has closed.
    ///
    /// The round increments; once it exceeds the rounds of a phase, the phase
    /// increments and the round resets to 1. Income is paid at the start of
    /// every phase except the one past the end of the game.
    pub fn advance_round(&mut self) -> RoundAdvance {
        self.round += 1;
        if self.round <= self.rounds_per_phase() {
            return RoundAdvance::Round;
        }

        self.phase += 1;
        if self.is_over() {
            return RoundAdvance::Finished;
        }

        self.apply_phase_income();
        self.round = 1;
        RoundAdvance::Phase
    }

    /// Rank players by score, then by total coins, both descending.
    ///
    /// Ties on both keys share a rank and the next rank is skipped (1, 1, 3).
    /// The result is ordered by rank, then by seat.
    pub fn standings(&self) -> Vec<Standing> {
        let mut order = self
            .players
            .iter()
            .enumerate()
            .map(|(player, h)| (player, h.score, h.balance.total()))
            .collect::<Vec<_>>();

        // stable, so equal entries stay in seat order
        order.sort_by(|a, b| (b.1, b.2).cmp(&(a.1, a.2)));

        let mut standings = Vec::with_capacity(order.len());
        for (i, &(player, score, coins)) in order.iter().enumerate() {
            let rank = match standings.last() {
                Some(Standing {
                    rank,
                    score: s,
                    coins: c,
                    ..
                }) if *s == score && *c == coins => *rank,
                _ => i + 1,
            };
            standings.push(Standing {
                player,
                rank,
                score,
                coins,
            });
        }
        standings
    }
}

impl Index<usize> for Ledger {
    type Output = Holdings;

    fn index(&self, player: usize) -> &Self::Output {
        &self.players[player]
    }
}
