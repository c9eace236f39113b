use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Bet;
use crate::error::Result;
use crate::persistence::AppState;

/// Structured snapshot of current state and records for offline analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub exported_at: DateTime<Utc>,
    pub state: &'a AppState,
    pub bets: Vec<&'a Bet>,
}

/// Pretty-printed JSON snapshot of the (optionally filtered) record set.
pub fn to_json_string<'a, I>(state: &AppState, bets: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let snapshot = Snapshot {
        exported_at: Utc::now(),
        state,
        bets: bets.into_iter().collect(),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BetStatus, Sport};
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_carries_state_and_records() {
        let now = Utc::now();
        let bet = Bet {
            id: "abc".to_string(),
            date: "2024-05-05".parse().unwrap(),
            description: "Late corners".to_string(),
            sport: Sport::Football,
            category: None,
            stake: dec!(5),
            odds: dec!(3.1),
            status: BetStatus::Pending,
            return_override: None,
            settled_at: None,
            created_at: now,
            updated_at: now,
        };
        let state = AppState {
            target_profit: dec!(100),
            ..Default::default()
        };

        let json = to_json_string(&state, std::iter::once(&bet)).unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"targetProfit\""));
        assert!(json.contains("\"Late corners\""));
        assert!(json.contains("\"2024-05-05\""));
    }
}
