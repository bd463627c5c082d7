use jwl_core::{
    AuctionSession, Coins, GameError, Holdings, Jewel, Ledger, Policy, Rules, StepOutcome,
};
use rstest::*;
use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Replays a fixed list of bids, then passes forever.
struct Scripted(VecDeque<Coins>);

impl Scripted {
    fn boxed(bids: impl IntoIterator<Item = Coins>) -> Box<dyn Policy> {
        Box::new(Self(bids.into_iter().collect()))
    }
}

impl Policy for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _: &Ledger, _: &AuctionSession, _: &Jewel) -> Coins {
        self.0.pop_front().unwrap_or(Coins::ZERO)
    }
}

/// Counts how often the wrapped policy is asked for a bid.
struct Counted {
    inner: Box<dyn Policy>,
    asked: Arc<AtomicUsize>,
}

impl Counted {
    fn boxed(inner: Box<dyn Policy>) -> (Box<dyn Policy>, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        let policy = Box::new(Self {
            inner,
            asked: Arc::clone(&asked),
        });
        (policy, asked)
    }
}

impl Policy for Counted {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn decide(&mut self, ledger: &Ledger, session: &AuctionSession, jewel: &Jewel) -> Coins {
        self.asked.fetch_add(1, Ordering::Relaxed);
        self.inner.decide(ledger, session, jewel)
    }
}

/// Run a session to completion, recording the lead after every step.
fn run_session(
    ledger: &mut Ledger,
    session: &mut AuctionSession,
    jewel: &Jewel,
    policies: &mut [Box<dyn Policy>],
) -> (StepOutcome, Vec<Coins>) {
    let mut leads = Vec::new();
    for _ in 0..1000 {
        let outcome = ledger.step_auction(session, jewel, policies).unwrap();
        leads.push(session.lead());
        if outcome.is_finished() {
            return (outcome, leads);
        }
    }
    panic!("session did not terminate");
}

#[fixture]
fn green_jewel() -> Jewel {
    Jewel::new(5, Coins::new(0, 3, 0))
}

#[rstest]
fn first_bidder_wins_unopposed(green_jewel: Jewel) {
    let mut ledger = Ledger::new(2);
    let mut session = AuctionSession::new(0, 2);
    let mut policies = vec![Scripted::boxed([Coins::new(0, 3, 0)]), Scripted::boxed([])];

    assert_eq!(
        ledger
            .step_auction(&mut session, &green_jewel, &mut policies)
            .unwrap(),
        StepOutcome::Continue
    );
    assert_eq!(session.leader(), Some(0));

    assert_eq!(
        ledger
            .step_auction(&mut session, &green_jewel, &mut policies)
            .unwrap(),
        StepOutcome::Settled {
            winner: 0,
            price: Coins::new(0, 3, 0)
        }
    );

    assert_eq!(ledger[0].balance, Coins::new(10, 7, 10));
    assert_eq!(ledger[0].score, 5);
    assert_eq!(ledger[0].income, Coins::new(0, 3, 0));
    assert_eq!(ledger[1].balance, Coins::splat(10));
    assert_eq!(ledger[1].score, 0);
}

#[rstest]
fn stepping_a_closed_session_is_refused(green_jewel: Jewel) {
    let mut ledger = Ledger::new(2);
    let mut session = AuctionSession::new(0, 2);
    let mut policies = vec![Scripted::boxed([Coins::new(0, 3, 0)]), Scripted::boxed([])];
    run_session(&mut ledger, &mut session, &green_jewel, &mut policies);

    assert!(session.is_closed());
    assert_eq!(
        ledger.step_auction(&mut session, &green_jewel, &mut policies),
        Err(GameError::SessionClosed)
    );
    // no double settlement
    assert_eq!(ledger[0].balance, Coins::new(10, 7, 10));
}

#[rstest]
#[case::equal_to_lead(Coins::new(1, 0, 0))]
#[case::lower_somewhere(Coins::new(0, 5, 5))]
#[case::unaffordable(Coins::new(11, 0, 0))]
#[case::pass(Coins::ZERO)]
fn invalid_bids_fold(green_jewel: Jewel, #[case] bad: Coins) {
    let mut ledger = Ledger::new(3);
    let mut session = AuctionSession::new(0, 3);
    let mut policies = vec![
        Scripted::boxed([Coins::new(1, 0, 0)]),
        Scripted::boxed([bad]),
        Scripted::boxed([Coins::new(1, 1, 0)]),
    ];

    ledger
        .step_auction(&mut session, &green_jewel, &mut policies)
        .unwrap();
    ledger
        .step_auction(&mut session, &green_jewel, &mut policies)
        .unwrap();

    assert!(!session.is_active(1));
    assert_eq!(session.active_count(), 2);
    assert_eq!(session.consecutive_passes(), 1);
    assert_eq!(session.leader(), Some(0));
    assert_eq!(session.lead(), Coins::new(1, 0, 0));

    // the next valid raise resets the pass counter
    ledger
        .step_auction(&mut session, &green_jewel, &mut policies)
        .unwrap();
    assert_eq!(session.consecutive_passes(), 0);
    assert_eq!(session.leader(), Some(2));
}

#[rstest]
fn everybody_passing_discards_the_jewel(green_jewel: Jewel) {
    let mut ledger = Ledger::new(3);
    let before = ledger.clone();
    let mut session = AuctionSession::new(1, 3);
    let mut policies = (0..3).map(|_| Scripted::boxed([])).collect::<Vec<_>>();

    let (outcome, _) = run_session(&mut ledger, &mut session, &green_jewel, &mut policies);
    assert_eq!(outcome, StepOutcome::Discarded);
    assert_eq!(ledger, before);
}

#[rstest]
fn last_player_standing_still_gets_to_bid(green_jewel: Jewel) {
    let mut ledger = Ledger::new(3);
    let mut session = AuctionSession::new(0, 3);
    let mut policies = vec![
        Scripted::boxed([]),
        Scripted::boxed([]),
        Scripted::boxed([Coins::new(0, 0, 1)]),
    ];

    for _ in 0..2 {
        let outcome = ledger
            .step_auction(&mut session, &green_jewel, &mut policies)
            .unwrap();
        assert_eq!(outcome, StepOutcome::Continue);
    }
    assert_eq!(session.active_count(), 1);

    let outcome = ledger
        .step_auction(&mut session, &green_jewel, &mut policies)
        .unwrap();
    assert_eq!(
        outcome,
        StepOutcome::Settled {
            winner: 2,
            price: Coins::new(0, 0, 1)
        }
    );
}

#[rstest]
fn lead_is_monotone_and_winner_pays_exactly_the_lead(green_jewel: Jewel) {
    let mut ledger = Ledger::new(3);
    let mut session = AuctionSession::new(0, 3);
    let mut policies = vec![
        Scripted::boxed([Coins::new(1, 0, 0), Coins::new(3, 1, 0)]),
        Scripted::boxed([Coins::new(1, 1, 0), Coins::new(3, 2, 0)]),
        Scripted::boxed([Coins::new(2, 1, 0), Coins::new(3, 2, 0)]),
    ];
    let before = ledger.clone();

    let (outcome, leads) = run_session(&mut ledger, &mut session, &green_jewel, &mut policies);

    for pair in leads.windows(2) {
        assert!(pair[1].covers(&pair[0]), "{} then {}", pair[0], pair[1]);
    }

    let StepOutcome::Settled { winner, price } = outcome else {
        panic!("expected a settlement, got {outcome:?}");
    };
    assert_eq!(winner, 1);
    assert_eq!(price, Coins::new(3, 2, 0));
    assert_eq!(
        before[winner].balance.checked_sub(&ledger[winner].balance),
        Some(price)
    );
    for other in (0..3).filter(|&p| p != winner) {
        assert_eq!(ledger[other], before[other]);
    }
}

#[rstest]
fn session_never_closes_with_two_active(green_jewel: Jewel) {
    let mut ledger = Ledger::new(4);
    let mut session = AuctionSession::new(2, 4);
    let mut policies = (0..4)
        .map(|p| Scripted::boxed((1..=4).map(move |k| Coins::new(4 * (k - 1) + p + 1, 0, 0))))
        .collect::<Vec<_>>();

    loop {
        let outcome = ledger
            .step_auction(&mut session, &green_jewel, &mut policies)
            .unwrap();
        if outcome.is_finished() {
            assert!(session.active_count() <= 1);
            break;
        }
    }
    for holdings in ledger.players() {
        assert!(holdings.balance.total() <= 30);
    }
}

#[rstest]
fn termination_within_one_cycle_once_everyone_stops(green_jewel: Jewel) {
    let n = 4;
    let mut ledger = Ledger::new(n);
    let mut session = AuctionSession::new(0, n);
    let mut policies = vec![
        Scripted::boxed([Coins::new(1, 0, 0)]),
        Scripted::boxed([]),
        Scripted::boxed([]),
        Scripted::boxed([]),
    ];

    let (_, leads) = run_session(&mut ledger, &mut session, &green_jewel, &mut policies);
    assert!(leads.len() <= n);
}

#[rstest]
fn mismatched_tables_are_rejected(green_jewel: Jewel) {
    let mut ledger = Ledger::new(2);
    let mut policies = vec![Scripted::boxed([])];
    let mut session = AuctionSession::new(0, 2);
    assert_eq!(
        ledger.step_auction(&mut session, &green_jewel, &mut policies),
        Err(GameError::SeatMismatch {
            expected: 2,
            found: 1
        })
    );

    let mut policies = vec![Scripted::boxed([]), Scripted::boxed([])];
    let mut session = AuctionSession::new(0, 3);
    assert_eq!(
        ledger.step_auction(&mut session, &green_jewel, &mut policies),
        Err(GameError::SeatMismatch {
            expected: 2,
            found: 3
        })
    );
}

#[rstest]
fn affordability_is_judged_against_the_bidder_only(green_jewel: Jewel) {
    let poor = Holdings {
        score: 0,
        income: Coins::ZERO,
        balance: Coins::new(1, 0, 0),
    };
    let rich = Holdings {
        score: 0,
        income: Coins::ZERO,
        balance: Coins::splat(20),
    };
    let mut ledger = Ledger::from_parts(Rules::default(), 1, 1, vec![poor, rich]);
    let mut session = AuctionSession::new(0, 2);
    let mut policies = vec![
        Scripted::boxed([Coins::new(2, 0, 0)]),
        Scripted::boxed([Coins::new(15, 0, 0)]),
    ];

    let (outcome, _) = run_session(&mut ledger, &mut session, &green_jewel, &mut policies);
    assert_eq!(
        outcome,
        StepOutcome::Settled {
            winner: 1,
            price: Coins::new(15, 0, 0)
        }
    );
    assert_eq!(ledger[1].balance, Coins::new(5, 20, 20));
}

#[rstest]
fn folded_seats_are_never_asked_again(green_jewel: Jewel) {
    let mut ledger = Ledger::new(3);
    let mut session = AuctionSession::new(0, 3);
    // seat 1 folds at once; its later raise must never reach the table
    let (folder, asked) = Counted::boxed(Scripted::boxed([Coins::ZERO, Coins::new(5, 0, 0)]));
    let mut policies = vec![
        Scripted::boxed([Coins::new(1, 0, 0), Coins::new(3, 0, 0)]),
        folder,
        Scripted::boxed([Coins::new(2, 0, 0)]),
    ];

    let (outcome, leads) = run_session(&mut ledger, &mut session, &green_jewel, &mut policies);

    assert_eq!(
        outcome,
        StepOutcome::Settled {
            winner: 0,
            price: Coins::new(3, 0, 0)
        }
    );
    assert!(leads.iter().all(|lead| *lead != Coins::new(5, 0, 0)));
    assert_eq!(asked.load(Ordering::Relaxed), 1);
    assert_eq!(ledger[0].balance, Coins::new(7, 10, 10));
    assert_eq!(ledger[1].balance, Coins::splat(10));
}
