use jwl_core::{Coins, Currency};
use rand::Rng;

/// How a sampled amount is distributed within `[lead, balance]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplingShape {
    /// Every amount in the range is equally likely
    Uniform,
    /// With `floor_probability` take the lead exactly; otherwise draw through
    /// a square-root transform, which favours amounts close to the lead
    EdgeBiased {
        /// Probability of sampling exactly the lower bound
        floor_probability: f64,
    },
}

impl SamplingShape {
    fn amount<R: Rng + ?Sized>(&self, rng: &mut R, low: u32, high: u32) -> u32 {
        match *self {
            Self::Uniform => rng.random_range(low..=high),
            Self::EdgeBiased { floor_probability } => {
                if rng.random::<f64>() < floor_probability {
                    return low;
                }
                let span = f64::from(high - low);
                let root = (rng.random::<f64>() * (span + 1.0).powi(2)).sqrt();
                // truncation towards zero keeps the result inside [0, span]
                let offset = (span - root).max(0.0).trunc() as u32;
                low + offset
            }
        }
    }
}

/// Random exploration of the bid space.
///
/// Each attempt draws one amount per currency between the current lead and
/// the bidder's balance. An attempt fails outright when the balance is
/// below the lead in any currency, so a narrow or empty range simply yields
/// fewer samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    /// The per-currency distribution
    pub shape: SamplingShape,
    /// Number of samples wanted
    pub target: usize,
    /// Upper bound on attempts
    pub max_tries: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            shape: SamplingShape::EdgeBiased {
                floor_probability: 0.1,
            },
            target: 100,
            max_tries: 1000,
        }
    }
}

impl Sampling {
    /// The default budget with a uniform shape
    pub fn uniform() -> Self {
        Self {
            shape: SamplingShape::Uniform,
            ..Default::default()
        }
    }

    /// Draw up to `target` bids, each between `lead` and `balance` in every currency.
    ///
    /// Samples may repeat and may equal the lead; callers filter for valid raises.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, lead: &Coins, balance: &Coins) -> Vec<Coins> {
        if !balance.covers(lead) {
            return Vec::new();
        }

        let mut samples = Vec::with_capacity(self.target.min(self.max_tries));
        for _ in 0..self.max_tries {
            if samples.len() >= self.target {
                break;
            }
            let mut bid = Coins::ZERO;
            for c in Currency::ALL {
                bid[c] = self.shape.amount(rng, lead[c], balance[c]);
            }
            samples.push(bid);
        }
        samples
    }
}
