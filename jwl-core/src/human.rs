//! A policy driven by an external actor, such as a user interface.
//!
//! The policy and its producer share a mailbox with room for exactly one
//! pending bid. [`HumanPolicy::decide`] suspends the protocol until a bid
//! arrives; a producer trying to deposit a second bid before the first was
//! consumed waits for the slot to free up.

use crate::{
    error::MailboxClosed,
    models::{AuctionSession, Coins, Jewel, Ledger},
    ports::Policy,
};
use tokio::sync::mpsc;
use tracing::{Level, event};

/// Create a connected producer/policy pair with a single-slot mailbox.
///
/// The policy blocks its thread while waiting for a bid, so a game seating
/// it must be stepped outside any tokio runtime (for instance on a
/// dedicated thread or via `spawn_blocking`); otherwise
/// [`HumanPolicy::decide`] panics.
pub fn mailbox() -> (BidSender, HumanPolicy) {
    let (tx, rx) = mpsc::channel(1);
    (
        BidSender(tx),
        HumanPolicy {
            rx,
            name: "Human".to_owned(),
        },
    )
}

/// The producing half of the mailbox, held by whatever collects the human's input.
#[derive(Clone, Debug)]
pub struct BidSender(mpsc::Sender<Coins>);

impl BidSender {
    /// Deposit a bid, blocking the current thread while the slot is full.
    ///
    /// Must not be called from within an async runtime; use [`BidSender::send`] there.
    pub fn submit(&self, bid: Coins) -> Result<(), MailboxClosed> {
        self.0.blocking_send(bid).map_err(|_| MailboxClosed)
    }

    /// Deposit a bid, waiting asynchronously while the slot is full.
    pub async fn send(&self, bid: Coins) -> Result<(), MailboxClosed> {
        self.0.send(bid).await.map_err(|_| MailboxClosed)
    }
}

/// A seat whose decisions come from the mailbox.
#[derive(Debug)]
pub struct HumanPolicy {
    rx: mpsc::Receiver<Coins>,
    name: String,
}

impl HumanPolicy {
    /// Override the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Policy for HumanPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    /// Block until the producer deposits a bid.
    ///
    /// If every producer has been dropped no bid can ever arrive, so the
    /// seat passes.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context, as
    /// `tokio`'s `blocking_recv` does.
    fn decide(&mut self, _ledger: &Ledger, session: &AuctionSession, _item: &Jewel) -> Coins {
        match self.rx.blocking_recv() {
            Some(bid) => bid,
            None => {
                event!(
                    Level::WARN,
                    player = session.turn(),
                    "human mailbox closed, passing"
                );
                Coins::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn decide_waits_for_the_producer() {
        let (tx, mut human) = mailbox();
        let ledger = Ledger::new(2);
        let session = AuctionSession::new(0, 2);
        let jewel = Jewel::new(1, Coins::ZERO);

        let producer = thread::spawn(move || {
            tx.submit(Coins::new(1, 0, 0)).unwrap();
            tx.submit(Coins::new(0, 2, 0)).unwrap();
        });

        assert_eq!(
            human.decide(&ledger, &session, &jewel),
            Coins::new(1, 0, 0)
        );
        assert_eq!(
            human.decide(&ledger, &session, &jewel),
            Coins::new(0, 2, 0)
        );
        producer.join().unwrap();

        // producer gone: the seat passes instead of blocking forever
        assert_eq!(human.decide(&ledger, &session, &jewel), Coins::ZERO);
    }

    #[test]
    fn submit_fails_once_the_seat_is_gone() {
        let (tx, human) = mailbox();
        drop(human);
        assert_eq!(tx.submit(Coins::new(1, 0, 0)), Err(MailboxClosed));
    }

    #[test]
    fn mailbox_holds_exactly_one_bid() {
        let (tx, human) = mailbox();
        tx.submit(Coins::new(1, 0, 0)).unwrap();
        // the slot is full, so a non-blocking deposit is refused
        assert!(tx.0.try_send(Coins::new(2, 0, 0)).is_err());
        assert_eq!(human.named("Alice").name(), "Alice");
    }
}
