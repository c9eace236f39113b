//! The in-memory ledger session: owns the record collection and app
//! settings, applies all mutations, and holds the single soft-delete slot.
//!
//! All access is single-threaded; reducers receive a read-only slice and
//! never mutate records.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Bet, BetStatus, Category, Sport};
use crate::error::{LedgerError, Result};
use crate::persistence::AppState;

/// Seconds a deleted bet stays restorable before it is discarded for good.
pub const UNDO_WINDOW_SECS: i64 = 10;

/// A bet held in the soft-delete slot, restorable within the undo window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBet {
    pub bet: Bet,
    pub deleted_at: DateTime<Utc>,
}

impl DeletedBet {
    pub fn is_restorable(&self, now: DateTime<Utc>) -> bool {
        now - self.deleted_at <= Duration::seconds(UNDO_WINDOW_SECS)
    }
}

/// Fields supplied when logging a new wager.
#[derive(Debug, Clone)]
pub struct BetDraft {
    pub date: NaiveDate,
    pub description: String,
    pub sport: Sport,
    pub category: Option<Category>,
    pub stake: Decimal,
    pub odds: Decimal,
    /// Defaults to Pending; a settled status at creation stamps settled_at
    pub status: BetStatus,
    pub return_override: Option<Decimal>,
}

/// Partial update for an existing wager. `None` leaves a field untouched;
/// the nested options distinguish "leave" from "clear".
#[derive(Debug, Clone, Default)]
pub struct BetPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub sport: Option<Sport>,
    pub category: Option<Option<Category>>,
    pub stake: Option<Decimal>,
    pub odds: Option<Decimal>,
    pub status: Option<BetStatus>,
    pub return_override: Option<Option<Decimal>>,
}

/// Session state container: bet collection, settings and the one-slot trash.
#[derive(Debug, Clone, Default)]
pub struct Session {
    settings: AppState,
    bets: Vec<Bet>,
    trash: Option<DeletedBet>,
}

impl Session {
    pub fn new(settings: AppState) -> Self {
        Self {
            settings,
            bets: Vec::new(),
            trash: None,
        }
    }

    pub fn from_parts(settings: AppState, bets: Vec<Bet>, trash: Option<DeletedBet>) -> Self {
        Self {
            settings,
            bets,
            trash,
        }
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn settings(&self) -> &AppState {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut AppState {
        &mut self.settings
    }

    pub fn trash(&self) -> Option<&DeletedBet> {
        self.trash.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Bet> {
        self.bets.iter().find(|bet| bet.id == id)
    }

    /// Log a new wager. Validates the draft, assigns an identifier and
    /// timestamps, and appends it to the collection.
    pub fn add(&mut self, draft: BetDraft) -> Result<&Bet> {
        validate(&draft.description, draft.stake, draft.odds, draft.return_override)?;

        let now = Utc::now();
        let bet = Bet {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            description: draft.description,
            sport: draft.sport,
            category: if draft.sport == Sport::Football {
                draft.category
            } else {
                None
            },
            stake: draft.stake,
            odds: draft.odds,
            status: draft.status,
            return_override: draft.return_override,
            settled_at: draft.status.is_settled().then_some(now),
            created_at: now,
            updated_at: now,
        };
        info!(id = %bet.id, sport = %bet.sport, stake = %bet.stake, "bet added");
        self.bets.push(bet);
        Ok(&self.bets[self.bets.len() - 1])
    }

    /// Apply a partial update. Any field except id/created_at may change;
    /// updated_at is refreshed. A Pending -> settled transition stamps
    /// settled_at; moving back to Pending clears settled_at and the
    /// return override.
    pub fn edit(&mut self, id: &str, patch: BetPatch) -> Result<&Bet> {
        let idx = self.position(id)?;
        let now = Utc::now();
        // Mutate a copy so a failed validation leaves the record untouched
        let mut bet = self.bets[idx].clone();
        let was_settled = bet.is_settled();

        if let Some(date) = patch.date {
            bet.date = date;
        }
        if let Some(description) = patch.description {
            bet.description = description;
        }
        if let Some(sport) = patch.sport {
            bet.sport = sport;
        }
        if let Some(category) = patch.category {
            bet.category = category;
        }
        if let Some(stake) = patch.stake {
            bet.stake = stake;
        }
        if let Some(odds) = patch.odds {
            bet.odds = odds;
        }
        if let Some(return_override) = patch.return_override {
            bet.return_override = return_override;
        }
        if let Some(status) = patch.status {
            bet.status = status;
        }

        if bet.sport != Sport::Football {
            bet.category = None;
        }
        match (was_settled, bet.is_settled()) {
            (false, true) => bet.settled_at = Some(now),
            (true, false) => {
                bet.settled_at = None;
                bet.return_override = None;
            }
            _ => {}
        }
        bet.updated_at = now;

        validate(&bet.description, bet.stake, bet.odds, bet.return_override)?;
        self.bets[idx] = bet;
        debug!(id = %id, "bet edited");
        Ok(&self.bets[idx])
    }

    /// Mark a pending (or re-grade a settled) wager Won or Lost, optionally
    /// recording a payout override for cash-outs.
    pub fn settle(
        &mut self,
        id: &str,
        outcome: BetStatus,
        return_override: Option<Decimal>,
    ) -> Result<&Bet> {
        if !outcome.is_settled() {
            return Err(LedgerError::Validation(
                "settle outcome must be won or lost".to_string(),
            ));
        }
        if let Some(value) = return_override {
            if value < Decimal::ZERO {
                return Err(LedgerError::Validation(
                    "return override must be >= 0".to_string(),
                ));
            }
        }

        let idx = self.position(id)?;
        let now = Utc::now();
        let bet = &mut self.bets[idx];
        if bet.is_pending() {
            bet.settled_at = Some(now);
        }
        bet.status = outcome;
        bet.return_override = return_override;
        bet.updated_at = now;
        info!(id = %id, outcome = %outcome, "bet settled");
        Ok(&self.bets[idx])
    }

    /// Remove a wager into the soft-delete slot. A second delete during the
    /// undo window replaces the slot and forfeits the first undo; the slot
    /// is deliberately not a queue.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let idx = self.position(id)?;
        let bet = self.bets.remove(idx);
        info!(id = %bet.id, "bet deleted (undo window open)");
        self.trash = Some(DeletedBet {
            bet,
            deleted_at: Utc::now(),
        });
        Ok(())
    }

    /// Restore the last deleted bet if still within the undo window.
    /// Expired slots are discarded either way.
    pub fn undo_delete(&mut self) -> Option<&Bet> {
        let slot = self.trash.take()?;
        if !slot.is_restorable(Utc::now()) {
            debug!(id = %slot.bet.id, "undo window expired");
            return None;
        }
        info!(id = %slot.bet.id, "bet restored");
        self.bets.push(slot.bet);
        Some(&self.bets[self.bets.len() - 1])
    }

    /// Drop the trash slot if its undo window has lapsed. Called before
    /// persisting so expired tombstones never outlive their window.
    pub fn expire_trash(&mut self) {
        if let Some(slot) = &self.trash {
            if !slot.is_restorable(Utc::now()) {
                self.trash = None;
            }
        }
    }

    pub fn into_parts(self) -> (AppState, Vec<Bet>, Option<DeletedBet>) {
        (self.settings, self.bets, self.trash)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.bets
            .iter()
            .position(|bet| bet.id == id)
            .ok_or_else(|| LedgerError::BetNotFound(id.to_string()))
    }
}

fn validate(
    description: &str,
    stake: Decimal,
    odds: Decimal,
    return_override: Option<Decimal>,
) -> Result<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if stake <= Decimal::ZERO {
        return Err(LedgerError::Validation("stake must be > 0".to_string()));
    }
    if odds <= Decimal::ONE {
        return Err(LedgerError::Validation(
            "odds must be > 1.0 (decimal odds)".to_string(),
        ));
    }
    if let Some(value) = return_override {
        if value < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "return override must be >= 0".to_string(),
            ));
        }
    }
    Ok(())
}
