mod coins;
mod jewel;
mod ledger;
mod rules;
mod session;

pub use coins::{Coins, Currency, ParseCoinsError};
pub use jewel::Jewel;
pub use ledger::{Holdings, Ledger, RoundAdvance, Standing};
pub use rules::Rules;
pub use session::AuctionSession;
