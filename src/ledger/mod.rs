//! Ledger state: the owned record collection, its mutations, and the
//! filter engine that narrows it for the views.

pub mod filter;
pub mod session;

pub use filter::BetFilter;
pub use session::{BetDraft, BetPatch, DeletedBet, Session, UNDO_WINDOW_SECS};
