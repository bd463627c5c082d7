use jwl_core::{Coins, Jewel, Ledger, StepOutcome};
use serde::{Deserialize, Serialize};

/// The summary of one finished game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameReport {
    /// The master seed; replaying with it reproduces the game
    pub seed: u64,
    /// Auctions held
    pub auctions: usize,
    /// Auctions that ended in a sale
    pub settled: usize,
    /// Auctions that ended with every seat passing
    pub discarded: usize,
    /// Every seat's final position, in seating order
    pub players: Vec<PlayerReport>,
    /// Every auction, in order, if requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<AuctionRecord>,
}

/// One seat's final position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerReport {
    /// The seat index
    pub seat: usize,
    /// The policy's display name
    pub policy: String,
    /// 1-based rank; equal score and coin total share a rank
    pub rank: usize,
    /// Final score
    pub score: u32,
    /// Final balance
    pub coins: Coins,
    /// Final per-phase income
    pub income: Coins,
}

/// The result of a single auction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuctionRecord {
    /// The phase the auction was held in
    pub phase: u32,
    /// The round within that phase
    pub round: u32,
    /// The item on offer
    pub jewel: Jewel,
    /// The buyer, if the item sold
    pub winner: Option<usize>,
    /// The price paid, if the item sold
    pub price: Option<Coins>,
}

impl AuctionRecord {
    /// Record a closed auction
    pub fn new(phase: u32, round: u32, jewel: Jewel, outcome: &StepOutcome) -> Self {
        let (winner, price) = match *outcome {
            StepOutcome::Settled { winner, price } => (Some(winner), Some(price)),
            _ => (None, None),
        };
        Self {
            phase,
            round,
            jewel,
            winner,
            price,
        }
    }
}

impl PlayerReport {
    /// Every seat's final position, ranked by the ledger's standings
    pub fn from_ledger<'a>(ledger: &Ledger, names: impl IntoIterator<Item = &'a str>) -> Vec<Self> {
        let standings = ledger.standings();
        names
            .into_iter()
            .zip(ledger.players())
            .enumerate()
            .map(|(seat, (name, holdings))| PlayerReport {
                seat,
                policy: name.to_owned(),
                rank: standings
                    .iter()
                    .find(|s| s.player == seat)
                    .map_or(0, |s| s.rank),
                score: holdings.score,
                coins: holdings.balance,
                income: holdings.income,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwl_core::{Holdings, Rules};

    #[test]
    fn players_keep_seating_order_and_share_ranks() {
        let players = vec![
            Holdings {
                score: 3,
                income: Coins::ZERO,
                balance: Coins::new(1, 2, 3),
            },
            Holdings {
                score: 9,
                income: Coins::new(0, 2, 0),
                balance: Coins::ZERO,
            },
            Holdings {
                score: 3,
                income: Coins::ZERO,
                balance: Coins::new(3, 2, 1),
            },
        ];
        let ledger = Ledger::from_parts(Rules::default(), 11, 1, players);
        let report = PlayerReport::from_ledger(&ledger, ["a", "b", "c"]);

        let ranks: Vec<usize> = report.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, [2, 1, 2]);
        assert_eq!(report[1].policy, "b");
        assert_eq!(report[1].income, Coins::new(0, 2, 0));
    }

    #[test]
    fn empty_history_is_omitted() {
        let report = GameReport {
            seed: 1,
            auctions: 0,
            settled: 0,
            discarded: 0,
            players: Vec::new(),
            history: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("history").is_none());
        assert_eq!(json["seed"], 1);
    }

    #[test]
    fn records_capture_the_sale() {
        let jewel = Jewel::new(4, Coins::new(0, 0, 1));
        let sold = AuctionRecord::new(2, 5, jewel, &StepOutcome::Settled {
            winner: 1,
            price: Coins::new(0, 3, 0),
        });
        assert_eq!(sold.winner, Some(1));
        assert_eq!(sold.price, Some(Coins::new(0, 3, 0)));

        let unsold = AuctionRecord::new(2, 6, jewel, &StepOutcome::Discarded);
        assert_eq!((unsold.winner, unsold.price), (None, None));
    }
}
