/// The fixed parameters of a game.
///
/// A game runs for `phases` phases; each phase holds `rounds_per_player · N`
/// auctions; every player starts with `starting_coins` of each currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Rules {
    /// Number of phases before the game ends
    pub phases: u32,
    /// Auctions per phase, per seated player
    pub rounds_per_player: u32,
    /// Initial balance in every currency
    pub starting_coins: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            phases: 10,
            rounds_per_player: 3,
            starting_coins: 10,
        }
    }
}
