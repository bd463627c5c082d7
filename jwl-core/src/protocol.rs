use crate::{
    GameError,
    models::{AuctionSession, Coins, Jewel, Ledger},
    ports::Policy,
};
use tracing::{Level, event};

/// What a single protocol step did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Bidding continues
    Continue,
    /// Bidding ended and the winner paid for the jewel
    Settled {
        /// The leading bidder at close
        winner: usize,
        /// The leading bid, now deducted from the winner's balance
        price: Coins,
    },
    /// Everybody folded before anyone bid; the jewel is discarded
    Discarded,
}

impl StepOutcome {
    /// Whether the session closed on this step
    pub fn is_finished(&self) -> bool {
        !matches!(self, StepOutcome::Continue)
    }
}

/// A bid is a valid raise iff it is at least the lead in every currency and
/// strictly more in at least one.
pub fn is_valid_bid(bid: &Coins, lead: &Coins) -> bool {
    bid.outranks(lead)
}

impl Ledger {
    /// Perform exactly one action of the auction in `session`.
    ///
    /// The seat at `session.turn()` acts if still active: its policy's bid is
    /// accepted as the new lead if it is a valid raise the player can afford;
    /// anything else folds the player for the rest of this session. Inactive
    /// seats are skipped. The turn then advances unconditionally.
    ///
    /// Once at most one player remains and a lead exists (or nobody remains),
    /// the session closes: the leader pays and is credited the jewel, or the
    /// jewel is discarded if nobody ever bid.
    pub fn step_auction(
        &mut self,
        session: &mut AuctionSession,
        item: &Jewel,
        policies: &mut [Box<dyn Policy>],
    ) -> Result<StepOutcome, GameError> {
        let n = self.num_players();
        if n == 0 {
            return Err(GameError::NoSeats);
        }
        for found in [policies.len(), session.num_players()] {
            if found != n {
                return Err(GameError::SeatMismatch { expected: n, found });
            }
        }
        if session.is_closed() {
            return Err(GameError::SessionClosed);
        }

        let player = session.turn();
        if session.is_active(player) {
            let bid = policies[player].decide(self, session, item);
            let lead = session.lead();

            if is_valid_bid(&bid, &lead) && self[player].balance.covers(&bid) {
                event!(Level::DEBUG, player, bid = %bid, "bid accepted");
                session.accept(player, bid);
            } else {
                event!(
                    Level::DEBUG,
                    player,
                    bid = %bid,
                    lead = %lead,
                    "player folds"
                );
                session.fold(player);
            }
        } else {
            event!(Level::TRACE, player, "inactive, turn skipped");
        }

        session.advance_turn();

        if !session.is_decided() {
            return Ok(StepOutcome::Continue);
        }
        session.close();

        match session.leader() {
            Some(winner) => {
                let price = session.lead();
                self.settle(winner, price, item)?;
                event!(
                    Level::INFO,
                    winner,
                    price = %price,
                    points = item.points,
                    income = %item.income,
                    "jewel settled"
                );
                Ok(StepOutcome::Settled { winner, price })
            }
            None => {
                event!(Level::INFO, "no bids, jewel discarded");
                Ok(StepOutcome::Discarded)
            }
        }
    }
}
