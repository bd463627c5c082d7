use crate::models::{AuctionSession, Coins, Jewel, Ledger};

/// A bidding strategy, human or automated.
///
/// The protocol calls [`Policy::decide`] whenever the policy's seat is due
/// to act in an active session. The acting seat is `session.turn()`.
///
/// Returning [`Coins::ZERO`] passes. Any bid that does not outrank the
/// current lead, or that the player cannot afford, is also treated as a
/// pass: the player folds and takes no further part in this auction.
///
/// # Example
/// ```
/// use jwl_core::{AuctionSession, Coins, Currency, Jewel, Ledger, Policy};
///
/// /// Raises the lead by one coin of red whenever it can afford to.
/// struct RedRaiser;
///
/// impl Policy for RedRaiser {
///     fn name(&self) -> &str {
///         "red raiser"
///     }
///
///     fn decide(&mut self, ledger: &Ledger, session: &AuctionSession, _item: &Jewel) -> Coins {
///         let lead = session.lead();
///         let bid = lead.with(Currency::Red, lead[Currency::Red] + 1);
///         if ledger[session.turn()].balance.covers(&bid) { bid } else { Coins::ZERO }
///     }
/// }
/// ```
pub trait Policy: Send {
    /// The display name of this strategy
    fn name(&self) -> &str;

    /// Choose a bid (or pass) for the seat at `session.turn()`
    fn decide(&mut self, ledger: &Ledger, session: &AuctionSession, item: &Jewel) -> Coins;
}
