use super::Evaluator;
use jwl_core::{Currency, Ledger};

/// Number of future phases the multi-horizon evaluator looks at (including the current one)
pub const HORIZON: usize = 11;

/// The tunable constants of [`MultiHorizon`].
#[derive(Clone, Debug, PartialEq)]
pub struct HorizonProfile {
    /// Weight of each horizon step, heaviest at step 0
    pub weights: [f64; HORIZON],
    /// Per-phase retention of a currently held balance (models spend-down)
    pub decay: f64,
    /// Phases of grace before the decay starts to bite
    pub decay_delay: f64,
    /// Coefficient of the `i·(i-1)` compounding-income bonus at step `i`
    pub compounding: f64,
    /// Log-ratio beyond which a lead is considered decisive
    pub soft_cap: f64,
    /// Fraction of the log-ratio beyond `soft_cap` that is discounted
    pub cap_discount: f64,
    /// Scale applied to the summed currency terms
    pub coin_scale: f64,
    /// Offset added to the phase when weighting the score difference
    pub score_offset: f64,
    /// Divisor applied when weighting the score difference
    pub score_divisor: f64,
}

impl Default for HorizonProfile {
    fn default() -> Self {
        Self {
            weights: [1.0, 0.7, 0.4, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.2, 0.0],
            decay: 0.5,
            decay_delay: 0.5,
            compounding: 2.0,
            soft_cap: 2.0,
            cap_discount: 0.8,
            coin_scale: 6.0,
            score_offset: 2.0,
            score_divisor: 12.0,
        }
    }
}

/// Pairwise comparison of every player's projected coin position and score,
/// looking up to [`HORIZON`] phases ahead.
///
/// At horizon step `i` each balance is projected as
/// `balance · decay^max(i - progress - delay, 0) + i · income + compounding · i · (i - 1)`,
/// where `progress` is the fraction of the current phase already played.
/// The players are compared per currency by `ln(mine + 1) - ln(theirs + 1)`,
/// with the excess over `soft_cap` discounted. Steps past the final phase are
/// ignored. The score difference is added with a weight that grows with the phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiHorizon {
    /// The constants used
    pub profile: HorizonProfile,
}

impl MultiHorizon {
    /// An evaluator with a custom profile
    pub fn new(profile: HorizonProfile) -> Self {
        Self { profile }
    }

    /// The step weights, shifted towards the next phase as the current one
    /// nears completion.
    ///
    /// With `progress = 0` this is the profile itself; with `progress = 1`
    /// every weight has moved one step further out.
    pub fn blended_weights(&self, progress: f64) -> [f64; HORIZON] {
        let w = &self.profile.weights;
        let mut blended = [0.0; HORIZON];
        blended[0] = (1.0 - progress) * w[0];
        for i in 1..HORIZON {
            blended[i] = w[i - 1] * progress + w[i] * (1.0 - progress);
        }
        blended
    }

    fn project(&self, balance: u32, income: u32, step: usize, progress: f64) -> f64 {
        let p = &self.profile;
        let i = step as f64;
        let retained = p.decay.powf((i - progress - p.decay_delay).max(0.0));
        f64::from(balance) * retained + i * f64::from(income) + p.compounding * i * (i - 1.0)
    }

    /// The contribution of a single opponent to `me`'s score
    pub fn versus(&self, ledger: &Ledger, me: usize, opp: usize) -> f64 {
        let p = &self.profile;
        let progress = ledger.round_progress();
        let (mine, theirs) = (&ledger[me], &ledger[opp]);

        let mut value = 0.0;
        for (step, weight) in self.blended_weights(progress).into_iter().enumerate() {
            if ledger.phase() as usize + step > ledger.rules().phases as usize {
                break;
            }

            let mut position = 0.0;
            for c in Currency::ALL {
                let a = self.project(mine.balance[c], mine.income[c], step, progress);
                let b = self.project(theirs.balance[c], theirs.income[c], step, progress);
                let diff = (a + 1.0).ln() - (b + 1.0).ln();
                position += diff;
                if diff > p.soft_cap {
                    position -= (diff - p.soft_cap) * p.cap_discount;
                }
            }
            value += position * weight * p.coin_scale;
        }

        let score_diff = f64::from(mine.score) - f64::from(theirs.score);
        value
            + score_diff * p.weights[0] * (p.score_offset + f64::from(ledger.phase()))
                / p.score_divisor
    }
}

impl Evaluator for MultiHorizon {
    fn evaluate(&self, ledger: &Ledger, me: usize) -> f64 {
        (0..ledger.num_players())
            .filter(|&opp| opp != me)
            .map(|opp| self.versus(ledger, me, opp))
            .sum()
    }
}
