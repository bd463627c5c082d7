#![warn(missing_docs)]
//! Best-response bidding for the jewel auction.
//!
//! A [`Montplus`] bidder looks one action ahead: it gathers a small pool of
//! candidate bids, simulates the auction's outcome under each, scores the
//! resulting ledgers with an [`Evaluator`] and submits the best one.

/**
 * Breakpoint-based generation of the minimal set of bids that price out
 * every active opponent.
 */
pub mod candidates;

/**
 * Pure look-ahead: the ledger after a hypothetical settlement.
 */
mod simulate;
pub use simulate::simulate;

/**
 * Position scoring, from one player's point of view.
 */
pub mod evaluate;
pub use evaluate::{Evaluator, MultiHorizon, Snapshot};

mod sampling;
pub use sampling::{Sampling, SamplingShape};

/**
 * The one-ply best-response search and its configuration.
 */
pub mod select;
pub use select::{BidResolution, Choice, PassRivals, PlusOneScope, SelectorConfig, WillingnessToPay};

mod policy;
pub use policy::Montplus;

// Insertion order keeps candidate evaluation (and so tie-breaking) reproducible
pub(crate) type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
