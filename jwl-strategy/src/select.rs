use crate::{
    Set,
    candidates::minimal_dominant_bids,
    evaluate::Evaluator,
    sampling::Sampling,
    simulate::simulate,
};
use jwl_core::{AuctionSession, Coins, Currency, Jewel, Ledger, is_valid_bid};
use rand::Rng;
use tracing::{Level, event};

/// Which one-currency "+1" raises enter the candidate pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlusOneScope {
    /// One raise per currency
    EveryCurrency,
    /// Only the raise in the item's income currency (red if it pays no income)
    IncomeCurrency,
}

/// A heuristic valuation of the item, offered as a single-currency bid in
/// its income currency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WillingnessToPay {
    /// Coins per point of score
    pub score_weight: f64,
    /// Coins per unit of income per remaining phase
    pub income_weight: f64,
}

impl Default for WillingnessToPay {
    fn default() -> Self {
        Self {
            score_weight: 1.2,
            income_weight: 0.8,
        }
    }
}

impl WillingnessToPay {
    /// `round(score_weight · points + income_weight · income · phases_left)`
    pub fn amount(&self, item: &Jewel, phases_left: u32) -> u32 {
        let income = item.income_currency().map_or(0, |c| item.income[c]);
        let value = self.score_weight * f64::from(item.points)
            + self.income_weight * f64::from(income) * f64::from(phases_left);
        value.round().max(0.0) as u32
    }
}

/// The opponents considered as possible winners when resolving a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassRivals {
    /// Only the current leader, who wins at the lead; with no leader the
    /// item is assumed to go unsold
    LeaderOnly,
    /// The leader, and every active opponent who can afford the lead and
    /// holds strictly more somewhere, so could validly raise it
    CanOutbid,
    /// Every active opponent who can afford the lead, ties included
    CanMatch,
}

impl PassRivals {
    /// Whether an opponent with `balance` is admitted as a rival at `lead`
    pub fn admits(&self, balance: &Coins, lead: &Coins, is_leader: bool) -> bool {
        match self {
            Self::LeaderOnly => is_leader,
            Self::CanOutbid => balance.covers(lead) && (is_leader || balance.exceeds_somewhere(lead)),
            Self::CanMatch => balance.covers(lead),
        }
    }
}

/// How the outcome of placing a bid is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidResolution {
    /// The bidder wins at their bid
    Optimistic,
    /// The minimum over the bidder winning and every active opponent able
    /// to outrank the bid winning at that price
    WorstCase,
}

/// Everything that distinguishes one best-response bidder from another,
/// apart from its evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    /// The "+1" raises offered
    pub plus_one: PlusOneScope,
    /// An optional valuation-based bid
    pub willingness_to_pay: Option<WillingnessToPay>,
    /// Random exploration of the bid space
    pub sampling: Sampling,
    /// Rivals considered when passing
    pub pass_rivals: PassRivals,
    /// Resolution of a bid's outcome
    pub bid_resolution: BidResolution,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            plus_one: PlusOneScope::EveryCurrency,
            willingness_to_pay: None,
            sampling: Sampling::default(),
            pass_rivals: PassRivals::CanOutbid,
            bid_resolution: BidResolution::Optimistic,
        }
    }
}

impl SelectorConfig {
    /// The default selector, but also pessimistic about its own bids
    pub fn montplusa() -> Self {
        Self {
            bid_resolution: BidResolution::WorstCase,
            ..Default::default()
        }
    }

    /// A lighter bidder: income-currency raises, a willingness-to-pay bid,
    /// uniform sampling and a pass resolved against the leader alone
    pub fn lv1() -> Self {
        Self {
            plus_one: PlusOneScope::IncomeCurrency,
            willingness_to_pay: Some(WillingnessToPay::default()),
            sampling: Sampling::uniform(),
            pass_rivals: PassRivals::LeaderOnly,
            bid_resolution: BidResolution::Optimistic,
        }
    }
}

/// The selector's decision and its evaluated worth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Choice {
    /// The bid to submit; zero means pass
    pub bid: Coins,
    /// The evaluator's score of the resolved outcome
    pub value: f64,
}

/// The de-duplicated candidate pool for the player to act, pass first.
///
/// Contains the pass sentinel, the configured "+1" raises and
/// willingness-to-pay bid when affordable, the affordable minimal dominant
/// bids, and random samples. Entries other than pass may still fail to be
/// valid raises; [`select`] skips those.
pub fn candidate_pool<R: Rng + ?Sized>(
    config: &SelectorConfig,
    rng: &mut R,
    ledger: &Ledger,
    session: &AuctionSession,
    item: &Jewel,
) -> Set<Coins> {
    let me = session.turn();
    let lead = session.lead();
    let balance = ledger[me].balance;
    let income_currency = item.income_currency().unwrap_or(Currency::Red);

    let mut pool = Set::default();
    pool.insert(Coins::ZERO);

    let plus_one = match config.plus_one {
        PlusOneScope::EveryCurrency => Currency::ALL.to_vec(),
        PlusOneScope::IncomeCurrency => vec![income_currency],
    };
    for c in plus_one {
        let raise = lead.with(c, lead[c] + 1);
        if balance.covers(&raise) {
            pool.insert(raise);
        }
    }

    if let Some(wtp) = &config.willingness_to_pay {
        let amount = wtp.amount(item, ledger.phases_left());
        let bid = Coins::single(income_currency, amount);
        if amount > lead[income_currency] && balance.covers(&bid) {
            pool.insert(bid);
        }
    }

    pool.extend(
        minimal_dominant_bids(ledger, session, me)
            .into_iter()
            .filter(|bid| balance.covers(bid)),
    );
    pool.extend(config.sampling.draw(rng, &lead, &balance));
    pool
}

/// The value of passing: the worst outcome among the admitted rivals
/// winning at the current lead.
///
/// With [`PassRivals::LeaderOnly`] the only outcome is the leader's win (or
/// no sale if there is no leader). Otherwise the item going unsold is
/// always one of the outcomes considered.
pub fn pass_value<E: Evaluator>(
    config: &SelectorConfig,
    evaluator: &E,
    ledger: &Ledger,
    session: &AuctionSession,
    item: &Jewel,
) -> f64 {
    let me = session.turn();
    let lead = session.lead();
    let baseline = || evaluator.evaluate(ledger, me);

    let rivals = session.opponents(me).filter(|&j| {
        config
            .pass_rivals
            .admits(&ledger[j].balance, &lead, session.leader() == Some(j))
    });
    let outcomes = rivals.filter_map(|j| {
        simulate(ledger, item, j, lead)
            .ok()
            .map(|next| evaluator.evaluate(&next, me))
    });

    match config.pass_rivals {
        PassRivals::LeaderOnly => outcomes.reduce(f64::min).unwrap_or_else(baseline),
        PassRivals::CanOutbid | PassRivals::CanMatch => outcomes.fold(baseline(), f64::min),
    }
}

/// The value of bidding `bid`, or `None` if the bidder could not pay it.
pub fn bid_value<E: Evaluator>(
    config: &SelectorConfig,
    evaluator: &E,
    ledger: &Ledger,
    session: &AuctionSession,
    item: &Jewel,
    bid: Coins,
) -> Option<f64> {
    let me = session.turn();
    let win = evaluator.evaluate(&simulate(ledger, item, me, bid).ok()?, me);

    match config.bid_resolution {
        BidResolution::Optimistic => Some(win),
        BidResolution::WorstCase => Some(
            session
                .opponents(me)
                .filter(|&j| ledger[j].balance.outranks(&bid))
                .filter_map(|j| simulate(ledger, item, j, bid).ok())
                .map(|next| evaluator.evaluate(&next, me))
                .fold(win, f64::min),
        ),
    }
}

/// One-ply best response for the player whose turn it is.
///
/// Every candidate that is an affordable valid raise is scored with
/// [`bid_value`], and pass with [`pass_value`]; the highest value wins.
/// Pass is scored first, so it wins ties and is the answer when no raise
/// is possible.
pub fn select<E: Evaluator, R: Rng + ?Sized>(
    config: &SelectorConfig,
    evaluator: &E,
    rng: &mut R,
    ledger: &Ledger,
    session: &AuctionSession,
    item: &Jewel,
) -> Choice {
    let me = session.turn();
    let lead = session.lead();
    let balance = ledger[me].balance;

    let pool = candidate_pool(config, rng, ledger, session, item);
    let mut best = Choice {
        bid: Coins::ZERO,
        value: pass_value(config, evaluator, ledger, session, item),
    };
    event!(Level::TRACE, player = me, value = best.value, "pass");

    for &bid in pool.iter().filter(|bid| !bid.is_zero()) {
        if !is_valid_bid(&bid, &lead) || !balance.covers(&bid) {
            continue;
        }
        let Some(value) = bid_value(config, evaluator, ledger, session, item, bid) else {
            continue;
        };
        event!(Level::TRACE, player = me, bid = %bid, value = value);
        if value > best.value {
            best = Choice { bid, value };
        }
    }

    event!(
        Level::DEBUG,
        player = me,
        candidates = pool.len(),
        bid = %best.bid,
        value = best.value,
        "selected"
    );
    best
}
