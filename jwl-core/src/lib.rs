#![warn(missing_docs)]
//! The jewel auction game: a multi-round, multi-currency ascending auction
//! among N players.
//!
//! Each jewel is sold in its own [`AuctionSession`]. Players take turns to
//! raise the lead (a bid at least the lead in every currency and strictly
//! more in one); anyone who fails to raise on their turn is out of that
//! auction for good. When one bidder remains, they pay their bid and the
//! [`Ledger`] credits them the jewel's points and per-phase income.

/// Core data types: coins, jewels, the ledger and the auction session.
///
/// These are plain data with the invariants the protocol relies on (no
/// negative balances, a monotone lead) enforced by their constructors and
/// mutators.
pub mod models;

/// The interface every bidding strategy implements.
pub mod ports;

pub mod human;

mod error;
pub use error::{GameError, MailboxClosed};

mod protocol;
pub use protocol::{StepOutcome, is_valid_bid};

mod game;
pub use game::{Game, GameEvent};

pub use models::{
    AuctionSession, Coins, Currency, Holdings, Jewel, Ledger, ParseCoinsError, RoundAdvance,
    Rules, Standing,
};
pub use ports::Policy;
