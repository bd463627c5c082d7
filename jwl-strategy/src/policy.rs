use crate::{
    evaluate::{Evaluator, MultiHorizon, Snapshot},
    select::{Choice, SelectorConfig, select},
};
use jwl_core::{AuctionSession, Coins, Jewel, Ledger, Policy};
use rand::{SeedableRng, rngs::StdRng};

/// A one-ply best-response bidder.
///
/// Every decision builds a candidate pool, resolves each candidate with a
/// forward simulation and keeps the one its evaluator likes best. The random
/// exploration draws from the bidder's own seeded generator, so a bidder
/// constructed with the same seed makes the same decisions.
#[derive(Debug)]
pub struct Montplus<E = MultiHorizon> {
    name: String,
    config: SelectorConfig,
    evaluator: E,
    rng: StdRng,
}

impl Montplus<MultiHorizon> {
    /// The default bidder
    pub fn new(seed: u64) -> Self {
        Self::with_parts("Montplus", SelectorConfig::default(), MultiHorizon::default(), seed)
    }

    /// The default bidder, resolving its own bids pessimistically
    pub fn montplusa(seed: u64) -> Self {
        Self::with_parts("Montplusa", SelectorConfig::montplusa(), MultiHorizon::default(), seed)
    }
}

impl Montplus<Snapshot> {
    /// The lighter snapshot-evaluating bidder
    pub fn lv1(seed: u64) -> Self {
        Self::with_parts("MontplusAI Lv1", SelectorConfig::lv1(), Snapshot::default(), seed)
    }
}

impl<E: Evaluator> Montplus<E> {
    /// A bidder assembled from explicit parts
    pub fn with_parts(name: impl Into<String>, config: SelectorConfig, evaluator: E, seed: u64) -> Self {
        Self {
            name: name.into(),
            config,
            evaluator,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The selector configuration in use
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// The evaluator in use
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The best response for the player whose turn it is, with its value
    pub fn select(&mut self, ledger: &Ledger, session: &AuctionSession, item: &Jewel) -> Choice {
        select(&self.config, &self.evaluator, &mut self.rng, ledger, session, item)
    }
}

impl<E: Evaluator + Send> Policy for Montplus<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, ledger: &Ledger, session: &AuctionSession, item: &Jewel) -> Coins {
        self.select(ledger, session, item).bid
    }
}
