use super::Coins;

/// The transient state of bidding for a single jewel.
///
/// A session is created fresh before each auction and discarded once it
/// closes. Only the bidding protocol mutates it; the lead it records is
/// monotone non-decreasing in every currency.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionSession {
    turn: usize,
    leader: Option<usize>,
    lead: Coins,
    active: Vec<bool>,
    active_count: usize,
    consecutive_passes: usize,
    closed: bool,
}

impl AuctionSession {
    /// A session where every player is active and `start_turn` acts first
    pub fn new(start_turn: usize, num_players: usize) -> Self {
        Self {
            turn: start_turn,
            leader: None,
            lead: Coins::ZERO,
            active: vec![true; num_players],
            active_count: num_players,
            consecutive_passes: 0,
            closed: false,
        }
    }

    /// Rebuild a session mid-auction, e.g. to reason about a hypothetical position.
    ///
    /// `leader` pairs the leading bidder with the leading bid. The counters are
    /// derived from `active`; the consecutive-pass count starts at zero.
    pub fn resume(turn: usize, leader: Option<(usize, Coins)>, active: Vec<bool>) -> Self {
        let active_count = active.iter().filter(|&&a| a).count();
        let (leader, lead) = match leader {
            Some((player, bid)) => (Some(player), bid),
            None => (None, Coins::ZERO),
        };
        Self {
            turn,
            leader,
            lead,
            active,
            active_count,
            consecutive_passes: 0,
            closed: false,
        }
    }

    /// The player to act next
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The current leading bidder, if anyone has bid
    pub fn leader(&self) -> Option<usize> {
        self.leader
    }

    /// The current leading bid; zero until someone bids
    pub fn lead(&self) -> Coins {
        self.lead
    }

    /// Number of players in the session
    pub fn num_players(&self) -> usize {
        self.active.len()
    }

    /// Whether `player` is still contesting this jewel
    pub fn is_active(&self, player: usize) -> bool {
        self.active.get(player).copied().unwrap_or(false)
    }

    /// Active flags by seat
    pub fn active(&self) -> &[bool] {
        &self.active
    }

    /// Number of players still contesting
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Folds since the last accepted bid
    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    /// Whether the session has been settled or discarded
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Active players other than `me`, in seat order
    pub fn opponents(&self, me: usize) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(move |&(player, &active)| active && player != me)
            .map(|(player, _)| player)
    }

    /// Whether bidding is over: at most one player remains and someone has
    /// bid, or nobody remains at all.
    pub fn is_decided(&self) -> bool {
        match self.active_count {
            0 => true,
            1 => self.leader.is_some(),
            _ => false,
        }
    }

    pub(crate) fn accept(&mut self, player: usize, bid: Coins) {
        self.lead = bid;
        self.leader = Some(player);
        self.consecutive_passes = 0;
    }

    pub(crate) fn fold(&mut self, player: usize) {
        if let Some(active) = self.active.get_mut(player) {
            if *active {
                *active = false;
                self.active_count -= 1;
            }
        }
        self.consecutive_passes += 1;
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn = (self.turn + 1) % self.active.len();
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}
