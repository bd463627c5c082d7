use crate::models::Coins;
use thiserror::Error;

/// Failures of the game machinery itself.
///
/// A policy returning an invalid or unaffordable bid is never an error; the
/// protocol treats it as a fold. These variants only arise when the caller
/// wires the game together inconsistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Error when a seat index is out of range
    #[error("player {0} is not seated at this table")]
    UnknownPlayer(usize),
    /// Error when the number of policies or session slots differs from the ledger
    #[error("expected {expected} seats, found {found}")]
    SeatMismatch {
        /// Number of players in the ledger
        expected: usize,
        /// Number of policies or session slots supplied
        found: usize,
    },
    /// Error when a game is created without players
    #[error("a game needs at least one seat")]
    NoSeats,
    /// Error when a settlement would drive a balance negative
    #[error("player {player} cannot pay {price} from a balance of {balance}")]
    Overdraft {
        /// The would-be payer
        player: usize,
        /// The price they were asked to pay
        price: Coins,
        /// Their balance at the time
        balance: Coins,
    },
    /// Error when stepping a session that has already been settled or discarded
    #[error("the auction session has already closed")]
    SessionClosed,
    /// Error when stepping a game past its final phase
    #[error("the game is over")]
    GameOver,
}

/// The human seat's mailbox has no receiver any more.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("the human seat is no longer accepting bids")]
pub struct MailboxClosed;
