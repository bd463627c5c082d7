use jwl_core::{AuctionSession, Coins, Currency, Ledger};

/// The values in one currency at which a bid's standing against some active
/// opponent can flip: the current lead, one above it, and one above each
/// active opponent's balance. Values below the lead are clamped up to it.
///
/// Returned sorted and de-duplicated.
pub fn breakpoints(
    ledger: &Ledger,
    session: &AuctionSession,
    me: usize,
    currency: Currency,
) -> Vec<u32> {
    let lead = session.lead()[currency];

    let mut values = vec![lead, lead + 1];
    values.extend(
        session
            .opponents(me)
            .map(|j| (ledger[j].balance[currency] + 1).max(lead)),
    );

    values.sort_unstable();
    values.dedup();
    values
}

/// A bid is dominant iff it strictly exceeds every active opponent's balance
/// in at least one currency, so no opponent can match it everywhere.
pub fn is_dominant(bid: &Coins, ledger: &Ledger, session: &AuctionSession, me: usize) -> bool {
    session
        .opponents(me)
        .all(|j| bid.exceeds_somewhere(&ledger[j].balance))
}

/// Drop every candidate that outranks another candidate (≥ everywhere,
/// > somewhere). What remains is the Pareto-minimal subset.
pub fn pareto_minimal(candidates: Vec<Coins>) -> Vec<Coins> {
    candidates
        .iter()
        .filter(|a| !candidates.iter().any(|b| a.outranks(b)))
        .copied()
        .collect()
}

/// The minimal menu of raises guaranteed to price out every active opponent.
///
/// Candidates are drawn from the cross product of per-currency
/// [`breakpoints`]; those that are [dominant](is_dominant) are reduced to
/// their [Pareto-minimal](pareto_minimal) subset. Every result is a valid
/// raise over the current lead. Affordability is not considered here.
pub fn minimal_dominant_bids(ledger: &Ledger, session: &AuctionSession, me: usize) -> Vec<Coins> {
    let lead = session.lead();
    let [reds, greens, blues] = Currency::ALL.map(|c| breakpoints(ledger, session, me, c));

    let mut dominant = Vec::new();
    for &r in &reds {
        for &g in &greens {
            for &b in &blues {
                let bid = Coins::new(r, g, b);
                // every breakpoint is ≥ the lead, so anything else is a raise
                if bid == lead {
                    continue;
                }
                if is_dominant(&bid, ledger, session, me) {
                    dominant.push(bid);
                }
            }
        }
    }

    pareto_minimal(dominant)
}
