use jwl_core::{
    AuctionSession, Coins, Jewel, Ledger, Policy,
    human::{BidSender, HumanPolicy, mailbox},
};
use std::{
    io::{BufRead, stdin},
    thread,
};
use tracing::{Level, event};

/// A human seat at the terminal.
///
/// Before every decision the position is printed to standard error; the
/// bid itself arrives through the mailbox from a reader thread.
pub struct Console {
    inner: HumanPolicy,
}

/// Seat a human reading from standard input.
///
/// Spawns the reader thread that feeds the seat's mailbox. The seed is
/// unused: the human is their own source of randomness.
pub fn human_seat(_seed: u64) -> Box<dyn Policy> {
    let (tx, inner) = mailbox();
    thread::spawn(move || read_bids(stdin().lock(), &tx));
    Box::new(Console { inner })
}

/// Parse one line of input: blank or "pass" passes, otherwise `r,g,b`.
pub fn parse_bid(line: &str) -> Result<Coins, jwl_core::ParseCoinsError> {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("pass") {
        Ok(Coins::ZERO)
    } else {
        line.parse()
    }
}

/// Forward bids read from `input` until it ends or the seat is gone.
///
/// Lines that do not parse are reported and skipped. Dropping the sender at
/// the end closes the mailbox, so the seat passes from then on.
pub fn read_bids(input: impl BufRead, tx: &BidSender) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        match parse_bid(&line) {
            Ok(bid) => {
                if tx.submit(bid).is_err() {
                    break;
                }
            }
            Err(err) => {
                eprintln!("could not read {line:?} as a bid ({err}); try e.g. 3,0,1");
            }
        }
    }
    event!(Level::DEBUG, "human input closed");
}

impl Policy for Console {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn decide(&mut self, ledger: &Ledger, session: &AuctionSession, item: &Jewel) -> Coins {
        let me = session.turn();
        eprintln!(
            "phase {}/{} round {}/{}: jewel worth {} points, income {}",
            ledger.phase(),
            ledger.rules().phases,
            ledger.round(),
            ledger.rounds_per_phase(),
            item.points,
            item.income
        );
        for (seat, holdings) in ledger.players().iter().enumerate() {
            let marker = if seat == me { "*" } else { " " };
            let status = if session.is_active(seat) { "" } else { " (out)" };
            eprintln!(
                "{marker} seat {seat}: score {} income {} balance {}{status}",
                holdings.score, holdings.income, holdings.balance
            );
        }
        match session.leader() {
            Some(leader) => eprintln!("lead {} by seat {leader}", session.lead()),
            None => eprintln!("no bids yet"),
        }
        eprintln!("your bid (r,g,b, blank to pass):");

        self.inner.decide(ledger, session, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::blank("", Coins::ZERO)]
    #[case::pass(" Pass ", Coins::ZERO)]
    #[case::commas("3,0,1", Coins::new(3, 0, 1))]
    #[case::spaces("0 2 0\n", Coins::new(0, 2, 0))]
    fn bids_parse(#[case] line: &str, #[case] expected: Coins) {
        assert_eq!(parse_bid(line).unwrap(), expected);
    }

    #[test]
    fn garbage_is_skipped() {
        let (tx, mut seat) = mailbox();
        let input = Cursor::new("three\n1,1\n0,0,4\n");
        let reader = thread::spawn(move || read_bids(input, &tx));

        let ledger = Ledger::new(2);
        let session = AuctionSession::new(0, 2);
        let jewel = Jewel::new(1, Coins::ZERO);
        assert_eq!(seat.decide(&ledger, &session, &jewel), Coins::new(0, 0, 4));

        reader.join().unwrap();
        // the reader is gone, so the seat passes
        assert_eq!(seat.decide(&ledger, &session, &jewel), Coins::ZERO);
    }
}
