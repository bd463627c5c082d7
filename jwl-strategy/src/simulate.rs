use jwl_core::{Coins, GameError, Jewel, Ledger};

/// The ledger that would result from `winner` buying `item` for `price`.
///
/// The input ledger is never modified. Fails if the winner could not pay,
/// in which case the outcome is not a plausible one to reason about.
pub fn simulate(
    ledger: &Ledger,
    item: &Jewel,
    winner: usize,
    price: Coins,
) -> Result<Ledger, GameError> {
    let mut next = ledger.clone();
    next.settle(winner, price, item)?;
    Ok(next)
}
