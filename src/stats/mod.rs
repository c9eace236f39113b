//! Aggregation engine: independent pure reducers over a record slice.
//!
//! Every reducer consumes a read-only view (full or filtered), mutates
//! nothing, and is recomputed from scratch on each call. No reducer depends
//! on another's output.

pub mod breakdown;
pub mod cumulative;
pub mod goal;
pub mod monthly;
pub mod odds_bands;
pub mod totals;
pub mod weekday;

pub use breakdown::{by_category, by_sport, GroupRow, UNCATEGORISED};
pub use cumulative::{cumulative_profit, SeriesPoint};
pub use goal::{current_bankroll, goal_progress, settled_profit};
pub use monthly::{monthly_pnl, MonthlyRow};
pub use odds_bands::{odds_bands, OddsBandRow, BAND_LABELS};
pub use totals::{totals, LedgerTotals};
pub use weekday::{by_weekday, WeekdayRow, WEEKDAYS};
