use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::round2;

/// Sport a wager was placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Football,
    Cricket,
    Tennis,
    Other,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Cricket => "Cricket",
            Sport::Tennis => "Tennis",
            Sport::Other => "Other",
        }
    }

    pub const ALL: [Sport; 4] = [Sport::Football, Sport::Cricket, Sport::Tennis, Sport::Other];
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "football" => Ok(Sport::Football),
            "cricket" => Ok(Sport::Cricket),
            "tennis" => Ok(Sport::Tennis),
            "other" => Ok(Sport::Other),
            other => Err(format!("unknown sport '{other}'")),
        }
    }
}

/// Market category, meaningful only for Football wagers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Goals,
    Corners,
    Result,
    DoubleChance,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Goals => "Goals",
            Category::Corners => "Corners",
            Category::Result => "Result",
            Category::DoubleChance => "Double Chance",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goals" => Ok(Category::Goals),
            "corners" => Ok(Category::Corners),
            "result" => Ok(Category::Result),
            "double chance" | "double-chance" | "doublechance" => Ok(Category::DoubleChance),
            "other" => Ok(Category::Other),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Settlement status. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BetStatus {
    #[default]
    Pending,
    Won,
    Lost,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "Pending",
            BetStatus::Won => "Won",
            BetStatus::Lost => "Lost",
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, BetStatus::Pending)
    }
}

impl std::fmt::Display for BetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BetStatus::Pending),
            "won" => Ok(BetStatus::Won),
            "lost" => Ok(BetStatus::Lost),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// A single wager record, the sole persisted entity.
///
/// Field names serialize as camelCase for compatibility with the stored
/// JSON blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    /// Opaque unique identifier, immutable once created
    pub id: String,
    /// Event date, drives all temporal grouping
    pub date: NaiveDate,
    pub description: String,
    pub sport: Sport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Amount wagered, 2-dp money
    pub stake: Decimal,
    /// Decimal (European) odds; payout = stake * odds
    pub odds: Decimal,
    pub status: BetStatus,
    /// When present, replaces the computed return for a settled bet
    /// (models cash-outs and partial settlements)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_override: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bet {
    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    pub fn is_pending(&self) -> bool {
        self.status == BetStatus::Pending
    }

    /// Realized payout of the wager. `None` while pending; the rounded
    /// override when one is set; otherwise stake * odds for a win and
    /// zero for a loss.
    pub fn effective_return(&self) -> Option<Decimal> {
        match self.status {
            BetStatus::Pending => None,
            BetStatus::Won => Some(
                self.return_override
                    .map(round2)
                    .unwrap_or_else(|| self.potential_return()),
            ),
            BetStatus::Lost => Some(self.return_override.map(round2).unwrap_or(Decimal::ZERO)),
        }
    }

    /// Effective return minus stake; `None` while pending.
    pub fn profit(&self) -> Option<Decimal> {
        self.effective_return().map(|r| r - self.stake)
    }

    /// Unrealized payout if the wager were to win.
    pub fn potential_return(&self) -> Decimal {
        round2(self.stake * self.odds)
    }

    /// Year-month grouping key (yyyy-mm), lexicographic = chronological.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_bet(status: BetStatus, stake: Decimal, odds: Decimal) -> Bet {
        let now = Utc::now();
        Bet {
            id: "test-id".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            description: "Test wager".to_string(),
            sport: Sport::Football,
            category: Some(Category::Goals),
            stake,
            odds,
            status,
            return_override: None,
            settled_at: status.is_settled().then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_has_no_return() {
        let bet = sample_bet(BetStatus::Pending, dec!(10), dec!(2.5));
        assert_eq!(bet.effective_return(), None);
        assert_eq!(bet.profit(), None);
    }

    #[test]
    fn won_returns_stake_times_odds_rounded() {
        let bet = sample_bet(BetStatus::Won, dec!(10.00), dec!(2.375));
        // 10.00 * 2.375 = 23.75
        assert_eq!(bet.effective_return(), Some(dec!(23.75)));
        assert_eq!(bet.profit(), Some(dec!(13.75)));

        let bet = sample_bet(BetStatus::Won, dec!(3.33), dec!(1.805));
        // 3.33 * 1.805 = 6.01065 -> 6.01
        assert_eq!(bet.effective_return(), Some(dec!(6.01)));
    }

    #[test]
    fn lost_returns_zero() {
        let bet = sample_bet(BetStatus::Lost, dec!(10), dec!(3.0));
        assert_eq!(bet.effective_return(), Some(Decimal::ZERO));
        assert_eq!(bet.profit(), Some(dec!(-10)));
    }

    #[test]
    fn override_takes_precedence_when_settled() {
        let mut won = sample_bet(BetStatus::Won, dec!(10), dec!(4.0));
        won.return_override = Some(dec!(25.505));
        assert_eq!(bet_return(&won), dec!(25.51));

        let mut lost = sample_bet(BetStatus::Lost, dec!(10), dec!(4.0));
        lost.return_override = Some(dec!(4.20));
        assert_eq!(bet_return(&lost), dec!(4.20));

        // Pending ignores the override entirely
        let mut pending = sample_bet(BetStatus::Pending, dec!(10), dec!(4.0));
        pending.return_override = Some(dec!(99));
        assert_eq!(pending.effective_return(), None);
    }

    fn bet_return(bet: &Bet) -> Decimal {
        bet.effective_return().unwrap()
    }

    #[test]
    fn month_key_is_year_month() {
        let bet = sample_bet(BetStatus::Pending, dec!(1), dec!(2));
        assert_eq!(bet.month_key(), "2024-03");
    }

    #[test]
    fn enum_labels_round_trip_from_str() {
        assert_eq!("football".parse::<Sport>().unwrap(), Sport::Football);
        assert_eq!("Tennis".parse::<Sport>().unwrap(), Sport::Tennis);
        assert!("rugby".parse::<Sport>().is_err());
        assert_eq!(
            "double chance".parse::<Category>().unwrap(),
            Category::DoubleChance
        );
        assert_eq!("WON".parse::<BetStatus>().unwrap(), BetStatus::Won);
    }
}
