//! Persistence: two JSON blobs under fixed logical keys, with a silent
//! fall-back-to-defaults policy on load failure.

pub mod state;
pub mod store;

pub use state::{
    load_ledger, load_session, load_state, save_ledger, save_session, save_state, AppState,
    LedgerDocument, Theme,
};
pub use store::{JsonFileStore, KvStore, MemoryStore, BETS_KEY, STATE_KEY};
