use super::{Coins, Currency};
use rand::Rng;

/// The item up for auction.
///
/// Winning a jewel adds its points to the winner's score and its income to
/// the winner's per-phase income, permanently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Jewel {
    /// Points awarded to the winner (1..=10 for generated jewels)
    pub points: u32,
    /// Income added to the winner's per-phase income
    pub income: Coins,
}

impl Jewel {
    /// Largest number of points a generated jewel carries
    pub const MAX_POINTS: u32 = 10;

    /// Largest income a generated jewel carries in its currency
    pub const MAX_INCOME: u32 = 5;

    /// Construct a jewel directly
    pub fn new(points: u32, income: Coins) -> Self {
        Self { points, income }
    }

    /// Draw a jewel uniformly: points in 1..=10, one currency chosen uniformly
    /// with income in 0..=5, the other two currencies zero.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let points = rng.random_range(1..=Self::MAX_POINTS);
        let currency = Currency::ALL[rng.random_range(0..Currency::ALL.len())];
        let amount = rng.random_range(0..=Self::MAX_INCOME);
        Self {
            points,
            income: Coins::single(currency, amount),
        }
    }

    /// The first currency carrying non-zero income, if any
    pub fn income_currency(&self) -> Option<Currency> {
        self.income
            .iter()
            .find(|&(_, amount)| amount > 0)
            .map(|(c, _)| c)
    }
}
