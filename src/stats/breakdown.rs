use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{ratio, round2, Bet, BetStatus, Sport};

/// Aggregate row for one sport or category group.
///
/// `bet_count` spans every record in the group; the monetary fields and
/// `wins` cover the settled subset only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    pub key: String,
    pub bet_count: usize,
    pub settled_count: usize,
    pub wins: usize,
    pub staked: Decimal,
    pub returned: Decimal,
    pub profit: Decimal,
    /// wins / settled_count, zero when nothing in the group is settled
    pub win_rate: Decimal,
}

/// Literal key used for Football bets with no category.
pub const UNCATEGORISED: &str = "Uncategorised";

#[derive(Default)]
struct Acc {
    bet_count: usize,
    settled_count: usize,
    wins: usize,
    staked: Decimal,
    returned: Decimal,
}

impl Acc {
    fn fold(&mut self, bet: &Bet) {
        self.bet_count += 1;
        if let Some(returned) = bet.effective_return() {
            self.settled_count += 1;
            self.staked += bet.stake;
            self.returned += returned;
            if bet.status == BetStatus::Won {
                self.wins += 1;
            }
        }
    }

    fn emit(self, key: String) -> GroupRow {
        GroupRow {
            key,
            bet_count: self.bet_count,
            settled_count: self.settled_count,
            wins: self.wins,
            staked: round2(self.staked),
            returned: round2(self.returned),
            profit: round2(self.returned - self.staked),
            win_rate: ratio(
                Decimal::from(self.wins as u64),
                Decimal::from(self.settled_count as u64),
            ),
        }
    }
}

/// Group all records by sport, accumulating money over the settled subset.
/// Rows sorted descending by profit.
pub fn by_sport<'a, I>(bets: I) -> Vec<GroupRow>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut groups: HashMap<Sport, Acc> = HashMap::new();
    for bet in bets {
        groups.entry(bet.sport).or_default().fold(bet);
    }

    sorted_rows(
        groups
            .into_iter()
            .map(|(sport, acc)| acc.emit(sport.as_str().to_string())),
    )
}

/// Group Football records by category, substituting "Uncategorised" when
/// absent. Rows sorted descending by profit.
pub fn by_category<'a, I>(bets: I) -> Vec<GroupRow>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut groups: HashMap<&'static str, Acc> = HashMap::new();
    for bet in bets {
        if bet.sport != Sport::Football {
            continue;
        }
        let key = bet.category.map(|c| c.as_str()).unwrap_or(UNCATEGORISED);
        groups.entry(key).or_default().fold(bet);
    }

    sorted_rows(
        groups
            .into_iter()
            .map(|(key, acc)| acc.emit(key.to_string())),
    )
}

fn sorted_rows(rows: impl Iterator<Item = GroupRow>) -> Vec<GroupRow> {
    let mut rows: Vec<GroupRow> = rows.collect();
    // Key as tiebreak keeps equal-profit ordering deterministic
    rows.sort_by(|a, b| b.profit.cmp(&a.profit).then_with(|| a.key.cmp(&b.key)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn bet(sport: Sport, category: Option<Category>, stake: Decimal, odds: Decimal, status: BetStatus) -> Bet {
        let now = Utc::now();
        Bet {
            id: format!("{sport:?}-{category:?}-{stake}"),
            date: "2024-04-01".parse().unwrap(),
            description: "fixture".to_string(),
            sport,
            category,
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
    fn sports_sorted_descending_by_profit() {
        let bets = vec![
            bet(Sport::Football, None, dec!(10), dec!(2.0), BetStatus::Lost), // -10
            bet(Sport::Tennis, None, dec!(10), dec!(3.0), BetStatus::Won),    // +20
            bet(Sport::Cricket, None, dec!(10), dec!(1.5), BetStatus::Won),   // +5
            bet(Sport::Tennis, None, dec!(10), dec!(2.0), BetStatus::Pending),
        ];
        let rows = by_sport(&bets);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key, "Tennis");
        assert_eq!(rows[0].profit, dec!(20.00));
        assert_eq!(rows[0].bet_count, 2); // pending counted in bet_count
        assert_eq!(rows[0].settled_count, 1);
        assert_eq!(rows[1].key, "Cricket");
        assert_eq!(rows[2].key, "Football");
        assert_eq!(rows[2].win_rate, Decimal::ZERO);
    }

    #[test]
    fn grouped_profits_sum_to_ungrouped_total() {
        let bets = vec![
            bet(Sport::Football, Some(Category::Goals), dec!(10), dec!(2.0), BetStatus::Won),
            bet(Sport::Tennis, None, dec!(7), dec!(1.8), BetStatus::Lost),
            bet(Sport::Cricket, None, dec!(4), dec!(4.0), BetStatus::Won),
        ];
        let total: Decimal = bets.iter().filter_map(|b| b.profit()).sum();
        let grouped: Decimal = by_sport(&bets).iter().map(|r| r.profit).sum();
        assert_eq!(grouped, total);
    }

    #[test]
    fn categories_scope_to_football_with_uncategorised_key() {
        let bets = vec![
            bet(Sport::Football, Some(Category::Corners), dec!(10), dec!(2.0), BetStatus::Won),
            bet(Sport::Football, None, dec!(10), dec!(2.0), BetStatus::Lost),
            bet(Sport::Tennis, None, dec!(10), dec!(2.0), BetStatus::Won),
        ];
        let rows = by_category(&bets);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Corners");
        assert_eq!(rows[1].key, UNCATEGORISED);
        assert!(rows.iter().all(|r| r.key != "Tennis"));
    }

    #[test]
    fn equal_profit_breaks_ties_by_key() {
        let bets = vec![
            bet(Sport::Tennis, None, dec!(10), dec!(2.0), BetStatus::Pending),
            bet(Sport::Cricket, None, dec!(10), dec!(2.0), BetStatus::Pending),
        ];
        let rows = by_sport(&bets);
        assert_eq!(rows[0].key, "Cricket");
        assert_eq!(rows[1].key, "Tennis");
    }
}
