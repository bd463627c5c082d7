use super::Evaluator;
use jwl_core::{Currency, Holdings, Ledger};

/// Coefficients of the [`Snapshot`] evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotWeights {
    /// Score weight at the start of the game
    pub score_base: f64,
    /// Growth of the score weight over the whole game
    pub score_slope: f64,
    /// Overall scale of both coin terms
    pub coin_scale: f64,
    /// Phase progress at which coins stop mattering
    pub coin_base: f64,
    /// How sharply weight moves from current to next-phase coins near the end of a phase
    pub handoff_sharpness: f64,
    /// Income weight at the start of the game
    pub income_scale: f64,
}

impl Default for SnapshotWeights {
    fn default() -> Self {
        Self {
            score_base: 0.2,
            score_slope: 1.4,
            coin_scale: 7.0,
            coin_base: 1.4,
            handoff_sharpness: 5.0,
            income_scale: 3.0,
        }
    }
}

/// A single-look evaluator: a weighted sum of score, current coin, next-phase
/// coin and income differences against every opponent.
///
/// Early in the game coins and income dominate; the score weight grows
/// linearly with the phase. Within a phase the coin weight hands over from
/// current balances to next-phase balances (balance plus income) as the
/// phase's final round approaches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// The coefficients used
    pub weights: SnapshotWeights,
}

impl Snapshot {
    /// An evaluator with custom coefficients
    pub fn new(weights: SnapshotWeights) -> Self {
        Self { weights }
    }
}

fn log_ratio(mine: u32, theirs: u32) -> f64 {
    (f64::from(mine) + 1.0).ln() - (f64::from(theirs) + 1.0).ln()
}

fn coin_terms(mine: &Holdings, theirs: &Holdings) -> (f64, f64, f64) {
    let (mut now, mut next, mut income) = (0.0, 0.0, 0.0);
    for c in Currency::ALL {
        now += log_ratio(mine.balance[c], theirs.balance[c]);
        next += log_ratio(
            mine.balance[c] + mine.income[c],
            theirs.balance[c] + theirs.income[c],
        );
        income += f64::from(mine.income[c]) - f64::from(theirs.income[c]);
    }
    (now, next, income)
}

impl Evaluator for Snapshot {
    fn evaluate(&self, ledger: &Ledger, me: usize) -> f64 {
        let w = &self.weights;
        let phase_progress = f64::from(ledger.phase()) / f64::from(ledger.rules().phases.max(1));
        let handoff = (-(1.0 - ledger.round_progress()) * w.handoff_sharpness).exp();

        let w_score = w.score_base + w.score_slope * phase_progress;
        let w_coin = w.coin_scale * (w.coin_base - phase_progress);
        let w_now = w_coin * (1.0 - handoff);
        let w_next = w_coin * handoff;
        let w_income = w.income_scale * (1.0 - phase_progress);

        let mine = &ledger[me];
        let mut value = 0.0;
        for (opp, theirs) in ledger.players().iter().enumerate() {
            if opp == me {
                continue;
            }
            let (now, next, income) = coin_terms(mine, theirs);
            let score = f64::from(mine.score) - f64::from(theirs.score);
            value += w_score * score + w_now * now + w_next * next + w_income * income;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use jwl_core::{Coins, Rules};

    fn holdings(score: u32, income: Coins, balance: Coins) -> Holdings {
        Holdings {
            score,
            income,
            balance,
        }
    }

    #[test]
    fn mirror_positions_cancel() {
        let a = holdings(5, Coins::new(2, 0, 0), Coins::new(1, 8, 3));
        let b = holdings(1, Coins::new(0, 0, 4), Coins::new(9, 2, 0));
        let ledger = Ledger::from_parts(Rules::default(), 4, 2, vec![a, b]);
        let eval = Snapshot::default();
        assert_relative_eq!(
            eval.evaluate(&ledger, 0),
            -eval.evaluate(&ledger, 1),
            epsilon = 1e-12
        );
    }

    #[test]
    fn final_phase_ignores_the_income_rate() {
        // at the final phase income rate is worthless and coins keep a 0.4 share
        let a = holdings(3, Coins::new(5, 0, 0), Coins::ZERO);
        let b = holdings(0, Coins::ZERO, Coins::ZERO);
        // round 6 of 6: the handoff to next-phase coins is complete
        let ledger = Ledger::from_parts(Rules::default(), 10, 6, vec![a, b]);

        let expected = 1.6 * 3.0 + 7.0 * 0.4 * 6f64.ln();
        assert_relative_eq!(
            Snapshot::default().evaluate(&ledger, 0),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn early_coin_lead_outweighs_a_small_score_lead() {
        let rich = holdings(0, Coins::ZERO, Coins::splat(10));
        let scorer = holdings(2, Coins::ZERO, Coins::splat(4));
        let ledger = Ledger::from_parts(Rules::default(), 1, 1, vec![rich, scorer]);
        assert!(Snapshot::default().evaluate(&ledger, 0) > 0.0);
    }
}
