//! The two persisted blobs and the load/save policy around them.
//!
//! Loads are explicit Results internally; the public `load_*` functions
//! apply the caller policy "on absence or malformed JSON, substitute
//! defaults and log a warning". Nothing here is ever fatal.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Bet;
use crate::error::Result;
use crate::ledger::{DeletedBet, Session};

use super::store::{KvStore, BETS_KEY, STATE_KEY};

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Application settings blob, stored under the `state` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub target_profit: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_bankroll: Option<Decimal>,
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            target_profit: Decimal::ZERO,
            starting_bankroll: None,
            theme: Theme::default(),
        }
    }
}

/// Record-collection blob, stored under the `bets` key. The soft-delete
/// slot rides along so the undo window survives process restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerDocument {
    pub bets: Vec<Bet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash: Option<DeletedBet>,
}

fn try_load<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match store.load(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, %err, "persisted blob unreadable, using defaults");
            T::default()
        }
    }
}

pub fn load_state(store: &dyn KvStore) -> AppState {
    load_or_default(store, STATE_KEY)
}

pub fn load_ledger(store: &dyn KvStore) -> LedgerDocument {
    load_or_default(store, BETS_KEY)
}

pub fn save_state(store: &dyn KvStore, state: &AppState) -> Result<()> {
    store.save(STATE_KEY, &serde_json::to_string_pretty(state)?)
}

pub fn save_ledger(store: &dyn KvStore, doc: &LedgerDocument) -> Result<()> {
    store.save(BETS_KEY, &serde_json::to_string_pretty(doc)?)
}

/// Assemble a session from both blobs, falling back to defaults per blob.
pub fn load_session(store: &dyn KvStore) -> Session {
    let state = load_state(store);
    let doc = load_ledger(store);
    Session::from_parts(state, doc.bets, doc.trash)
}

/// Persist both blobs. Lapsed tombstones are dropped before writing.
pub fn save_session(store: &dyn KvStore, session: &mut Session) -> Result<()> {
    session.expire_trash();
    let state = session.settings().clone();
    save_state(store, &state)?;
    let doc = LedgerDocument {
        bets: session.bets().to_vec(),
        trash: session.trash().cloned(),
    };
    save_ledger(store, &doc)
}
