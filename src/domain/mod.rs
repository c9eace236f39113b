//! Core domain model: the wager record and monetary arithmetic.

pub mod bet;
pub mod money;

pub use bet::{Bet, BetStatus, Category, Sport};
pub use money::{parse_decimal_or, ratio, round2};
