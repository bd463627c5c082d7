use crate::{
    GameError,
    models::{AuctionSession, Jewel, Ledger, RoundAdvance, Rules, Standing},
    ports::Policy,
    protocol::StepOutcome,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{Level, event, span};

/// What happened during one [`Game::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A seat acted (or was skipped) and bidding continues
    Acted {
        /// The seat whose turn it was
        player: usize,
    },
    /// The auction for `jewel` closed
    AuctionClosed {
        /// The jewel that was up for auction
        jewel: Jewel,
        /// Whether it was settled or discarded
        outcome: StepOutcome,
        /// How the round and phase counters moved afterwards
        advance: RoundAdvance,
    },
}

/// A complete game: the ledger, the running auction and the seated policies.
///
/// The game draws jewels from its own random source, so two games built from
/// the same seed and equally seeded policies play out identically.
pub struct Game<R = StdRng> {
    ledger: Ledger,
    session: AuctionSession,
    jewel: Jewel,
    seats: Vec<Box<dyn Policy>>,
    rng: R,
}

impl Game<StdRng> {
    /// A game under the default rules with jewels drawn from `seed`
    pub fn new(seats: Vec<Box<dyn Policy>>, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(seats, Rules::default(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Seat the policies, pay the phase-1 income and put the first jewel up for auction.
    pub fn with_rng(
        seats: Vec<Box<dyn Policy>>,
        rules: Rules,
        mut rng: R,
    ) -> Result<Self, GameError> {
        if seats.is_empty() {
            return Err(GameError::NoSeats);
        }

        let mut ledger = Ledger::with_rules(seats.len(), rules);
        ledger.apply_phase_income();

        let jewel = Jewel::random(&mut rng);
        let session = AuctionSession::new(0, seats.len());

        Ok(Self {
            ledger,
            session,
            jewel,
            seats,
            rng,
        })
    }

    /// The persistent game state
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The auction in progress
    pub fn session(&self) -> &AuctionSession {
        &self.session
    }

    /// The jewel currently up for auction
    pub fn jewel(&self) -> &Jewel {
        &self.jewel
    }

    /// The seated policies
    pub fn seats(&self) -> &[Box<dyn Policy>] {
        &self.seats
    }

    /// Whether the final phase has been played
    pub fn is_over(&self) -> bool {
        self.ledger.is_over()
    }

    /// Advance the game by one protocol action.
    ///
    /// When the action closes the auction, the round counter advances (paying
    /// income on a phase rollover) and, unless the game just ended, a fresh
    /// jewel goes up for auction with seat `(round - 1) mod N` to act first.
    pub fn step(&mut self) -> Result<GameEvent, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let span = span!(
            Level::INFO,
            "auction",
            phase = self.ledger.phase(),
            round = self.ledger.round()
        );
        let _guard = span.enter();

        let player = self.session.turn();
        let outcome = self
            .ledger
            .step_auction(&mut self.session, &self.jewel, &mut self.seats)?;

        if !outcome.is_finished() {
            return Ok(GameEvent::Acted { player });
        }

        let jewel = self.jewel;
        let advance = self.ledger.advance_round();
        match advance {
            RoundAdvance::Finished => {
                event!(Level::INFO, "final phase complete");
            }
            RoundAdvance::Phase | RoundAdvance::Round => {
                if advance == RoundAdvance::Phase {
                    event!(Level::INFO, phase = self.ledger.phase(), "phase started");
                }
                let n = self.seats.len();
                let start = (self.ledger.round() as usize - 1) % n;
                self.jewel = Jewel::random(&mut self.rng);
                self.session = AuctionSession::new(start, n);
            }
        }

        Ok(GameEvent::AuctionClosed {
            jewel,
            outcome,
            advance,
        })
    }

    /// Step until the game is over and return the final standings.
    pub fn run(&mut self) -> Result<Vec<Standing>, GameError> {
        while !self.is_over() {
            self.step()?;
        }
        Ok(self.ledger.standings())
    }
}
