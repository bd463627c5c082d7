use jwl_core::Ledger;

mod horizon;
pub use horizon::{HORIZON, HorizonProfile, MultiHorizon};

mod snapshot;
pub use snapshot::{Snapshot, SnapshotWeights};

/// Scores a (possibly hypothetical) ledger from one player's point of view.
///
/// Higher is better for `me`. Implementations must be pure: structurally
/// identical ledgers always receive identical scores.
pub trait Evaluator {
    /// The value of `ledger` to the player at seat `me`
    fn evaluate(&self, ledger: &Ledger, me: usize) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, ledger: &Ledger, me: usize) -> f64 {
        (**self).evaluate(ledger, me)
    }
}
