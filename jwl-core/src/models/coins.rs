use std::{
    fmt,
    num::ParseIntError,
    ops::{Add, Index, IndexMut},
    str::FromStr,
};
use thiserror::Error;

/// The three coin colours a player can hold, earn and bid with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Currency {
    /// The first colour
    Red = 0,
    /// The second colour
    Green = 1,
    /// The third colour
    Blue = 2,
}

impl Currency {
    /// Every currency, in canonical (index) order
    pub const ALL: [Currency; 3] = [Currency::Red, Currency::Green, Currency::Blue];

    /// The position of this currency within a [`Coins`] vector
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An amount of each currency.
///
/// The same type is used for balances, income rates, jewel income and bids.
/// As a bid, the all-zero vector is the reserved "pass" signal; it can never
/// be a legitimate price because it does not outrank any lead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Coins(pub [u32; 3]);

impl Coins {
    /// No coins at all; as a bid, a pass
    pub const ZERO: Coins = Coins([0, 0, 0]);

    /// Construct from (red, green, blue)
    pub const fn new(red: u32, green: u32, blue: u32) -> Self {
        Self([red, green, blue])
    }

    /// The same amount in every currency
    pub const fn splat(amount: u32) -> Self {
        Self([amount; 3])
    }

    /// An amount in a single currency, zero elsewhere
    pub fn single(currency: Currency, amount: u32) -> Self {
        Self::ZERO.with(currency, amount)
    }

    /// A copy with one component replaced
    pub fn with(mut self, currency: Currency, amount: u32) -> Self {
        self[currency] = amount;
        self
    }

    /// Whether this is the all-zero vector (the pass sentinel)
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 3]
    }

    /// Sum over all currencies
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Iterate over (currency, amount) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Currency, u32)> + '_ {
        Currency::ALL.into_iter().map(|c| (c, self[c]))
    }

    /// `self ≥ other` in every currency and `self > other` in at least one.
    ///
    /// This is both the raise rule of the bidding protocol and the strict
    /// component-wise order used for Pareto filtering.
    pub fn outranks(&self, other: &Coins) -> bool {
        let mut greater = false;
        for c in Currency::ALL {
            if self[c] < other[c] {
                return false;
            }
            if self[c] > other[c] {
                greater = true;
            }
        }
        greater
    }

    /// `self ≥ other` in every currency, i.e. a holder of `self` can pay `other`
    pub fn covers(&self, other: &Coins) -> bool {
        Currency::ALL.into_iter().all(|c| self[c] >= other[c])
    }

    /// `self > other` in at least one currency
    pub fn exceeds_somewhere(&self, other: &Coins) -> bool {
        Currency::ALL.into_iter().any(|c| self[c] > other[c])
    }

    /// Component-wise subtraction, or `None` if any component would go negative
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = Coins::ZERO;
        for c in Currency::ALL {
            out[c] = self[c].checked_sub(other[c])?;
        }
        Some(out)
    }
}

impl Index<Currency> for Coins {
    type Output = u32;

    fn index(&self, currency: Currency) -> &Self::Output {
        &self.0[currency.index()]
    }
}

impl IndexMut<Currency> for Coins {
    fn index_mut(&mut self, currency: Currency) -> &mut Self::Output {
        &mut self.0[currency.index()]
    }
}

impl Add for Coins {
    type Output = Coins;

    fn add(self, rhs: Coins) -> Self::Output {
        let [r0, g0, b0] = self.0;
        let [r1, g1, b1] = rhs.0;
        Coins([r0 + r1, g0 + g1, b0 + b1])
    }
}

impl From<[u32; 3]> for Coins {
    fn from(value: [u32; 3]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r},{g},{b}")
    }
}

/// The ways a textual bid can fail to parse
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCoinsError {
    /// Error when the text does not contain exactly three amounts
    #[error("expected 3 amounts (red, green, blue), found {0}")]
    Arity(usize),
    /// Error when an amount is not a non-negative integer
    #[error("invalid amount: {0}")]
    Amount(#[from] ParseIntError),
}

impl FromStr for Coins {
    type Err = ParseCoinsError;

    /// Accepts `"3,0,1"`, `"3 0 1"` or any mix of commas and whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();

        let [r, g, b] = parts.as_slice() else {
            return Err(ParseCoinsError::Arity(parts.len()));
        };

        Ok(Coins([r.parse()?, g.parse()?, b.parse()?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_requires_one_strict_increase() {
        let lead = Coins::new(2, 0, 0);
        assert!(!Coins::new(2, 0, 0).outranks(&lead));
        assert!(Coins::new(3, 0, 0).outranks(&lead));
        assert!(Coins::new(2, 0, 1).outranks(&lead));
        // a decrease anywhere disqualifies the bid
        assert!(!Coins::new(1, 5, 5).outranks(&lead));
        // the pass sentinel never outranks anything
        assert!(!Coins::ZERO.outranks(&Coins::ZERO));
    }

    #[test]
    fn covers_and_exceeds() {
        let wallet = Coins::new(3, 5, 5);
        assert!(wallet.covers(&Coins::new(3, 5, 5)));
        assert!(!wallet.covers(&Coins::new(4, 0, 0)));
        assert!(Coins::new(4, 0, 0).exceeds_somewhere(&wallet));
        assert!(!Coins::new(3, 0, 0).exceeds_somewhere(&wallet));
    }

    #[test]
    fn checked_sub_refuses_overdraft() {
        let wallet = Coins::splat(10);
        assert_eq!(
            wallet.checked_sub(&Coins::new(0, 3, 0)),
            Some(Coins::new(10, 7, 10))
        );
        assert_eq!(wallet.checked_sub(&Coins::new(0, 11, 0)), None);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("3,0,1".parse::<Coins>(), Ok(Coins::new(3, 0, 1)));
        assert_eq!(" 3 0  1 ".parse::<Coins>(), Ok(Coins::new(3, 0, 1)));
        assert_eq!("3, 0, 1".parse::<Coins>(), Ok(Coins::new(3, 0, 1)));
        assert_eq!("3,0".parse::<Coins>(), Err(ParseCoinsError::Arity(2)));
        assert!(matches!(
            "3,-1,0".parse::<Coins>(),
            Err(ParseCoinsError::Amount(_))
        ));
        assert_eq!(Coins::new(3, 0, 1).to_string(), "3,0,1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_a_plain_array() {
        let json = serde_json::to_string(&Coins::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Coins = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Coins::new(1, 2, 3));
    }
}
