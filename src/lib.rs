pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod ledger;
pub mod persistence;
pub mod stats;

pub use config::AppConfig;
pub use domain::{Bet, BetStatus, Category, Sport};
pub use error::{LedgerError, Result};
pub use ledger::{BetDraft, BetFilter, BetPatch, DeletedBet, Session, UNDO_WINDOW_SECS};
pub use persistence::{
    load_session, save_session, AppState, JsonFileStore, KvStore, LedgerDocument, MemoryStore,
    Theme,
};
pub use stats::{
    by_category, by_sport, by_weekday, cumulative_profit, goal_progress, monthly_pnl, odds_bands,
    settled_profit, totals, GroupRow, LedgerTotals, MonthlyRow, OddsBandRow, SeriesPoint,
    WeekdayRow,
};
