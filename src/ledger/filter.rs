use chrono::NaiveDate;

use crate::domain::{Bet, BetStatus, Sport};

/// Criteria for narrowing the record set. Absent criteria bind nothing
/// ("All"); a record passes iff it matches every present criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BetFilter {
    pub sport: Option<Sport>,
    pub status: Option<BetStatus>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring over description, sport and status labels
    pub search: Option<String>,
}

impl BetFilter {
    /// True when no criterion is set, i.e. the filter passes everything.
    pub fn is_empty(&self) -> bool {
        self.sport.is_none()
            && self.status.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.search.is_none()
    }

    pub fn matches(&self, bet: &Bet) -> bool {
        if let Some(sport) = self.sport {
            if bet.sport != sport {
                return false;
            }
        }
        if let Some(status) = self.status {
            if bet.status != status {
                return false;
            }
        }
        if let Some(from) = self.from {
            if bet.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if bet.date > to {
                return false;
            }
        }
        if let Some(query) = &self.search {
            let needle = query.to_lowercase();
            let haystack = format!(
                "{} {} {}",
                bet.description,
                bet.sport.as_str(),
                bet.status.as_str()
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Select the matching subset. Result order follows input order; callers
    /// re-sort as needed.
    pub fn apply<'a>(&self, bets: &'a [Bet]) -> Vec<&'a Bet> {
        bets.iter().filter(|bet| self.matches(bet)).collect()
    }
}
