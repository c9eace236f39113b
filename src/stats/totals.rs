use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{ratio, round2, Bet, BetStatus};

/// Headline figures for a (possibly filtered) record set.
///
/// Monetary fields are rounded at emission; rates are exact Decimal ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub bet_count: usize,
    pub settled_count: usize,
    pub wins: usize,
    /// Sum of stakes over all records, settled or not
    pub total_staked: Decimal,
    /// Sum of stakes over settled records only
    pub settled_staked: Decimal,
    /// Sum of effective returns over settled records
    pub total_returned: Decimal,
    /// total_returned - settled_staked
    pub profit: Decimal,
    /// wins / settled_count, zero when nothing is settled
    pub hit_rate: Decimal,
    /// profit / settled_staked, zero when nothing was staked
    pub roi: Decimal,
    /// Average odds over settled records
    pub average_odds: Decimal,
    /// Average stake over all records in the set
    pub average_stake: Decimal,
    /// Median stake over all records (midpoint average for even counts)
    pub median_stake: Decimal,
    /// profit / settled_count
    pub profit_per_bet: Decimal,
    /// Sum of stakes still pending
    pub pending_stake: Decimal,
    /// Forward-looking: sum of stake * odds over pending records
    pub pending_potential_return: Decimal,
}

/// Reduce a record set to its headline totals. Pure; recomputed from
/// scratch on each call.
pub fn totals<'a, I>(bets: I) -> LedgerTotals
where
    I: IntoIterator<Item = &'a Bet>,
{
    let bets: Vec<&Bet> = bets.into_iter().collect();

    let mut settled_count = 0usize;
    let mut wins = 0usize;
    let mut total_staked = Decimal::ZERO;
    let mut settled_staked = Decimal::ZERO;
    let mut total_returned = Decimal::ZERO;
    let mut odds_sum = Decimal::ZERO;
    let mut pending_stake = Decimal::ZERO;
    let mut pending_potential = Decimal::ZERO;

    for bet in &bets {
        total_staked += bet.stake;
        match bet.effective_return() {
            Some(returned) => {
                settled_count += 1;
                settled_staked += bet.stake;
                total_returned += returned;
                odds_sum += bet.odds;
                if bet.status == BetStatus::Won {
                    wins += 1;
                }
            }
            None => {
                pending_stake += bet.stake;
                pending_potential += bet.potential_return();
            }
        }
    }

    let profit = total_returned - settled_staked;
    let settled = Decimal::from(settled_count as u64);

    LedgerTotals {
        bet_count: bets.len(),
        settled_count,
        wins,
        total_staked: round2(total_staked),
        settled_staked: round2(settled_staked),
        total_returned: round2(total_returned),
        profit: round2(profit),
        hit_rate: ratio(Decimal::from(wins as u64), settled),
        roi: ratio(profit, settled_staked),
        average_odds: ratio(odds_sum, settled),
        average_stake: ratio(total_staked, Decimal::from(bets.len() as u64)),
        median_stake: median_stake(&bets),
        profit_per_bet: ratio(profit, settled),
        pending_stake: round2(pending_stake),
        pending_potential_return: round2(pending_potential),
    }
}

fn median_stake(bets: &[&Bet]) -> Decimal {
    if bets.is_empty() {
        return Decimal::ZERO;
    }
    let mut stakes: Vec<Decimal> = bets.iter().map(|bet| bet.stake).collect();
    stakes.sort();
    let mid = stakes.len() / 2;
    if stakes.len() % 2 == 1 {
        stakes[mid]
    } else {
        (stakes[mid - 1] + stakes[mid]) / Decimal::from(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BetStatus, Sport};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn bet(stake: Decimal, odds: Decimal, status: BetStatus) -> Bet {
        let now = Utc::now();
        Bet {
            id: Uuid::new_v4().to_string(),
            date: "2024-06-01".parse().unwrap(),
            description: "fixture".to_string(),
            sport: Sport::Other,
            category: None,
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
    fn empty_set_is_all_zero() {
        let bets: Vec<Bet> = Vec::new();
        let t = totals(&bets);
        assert_eq!(t.bet_count, 0);
        assert_eq!(t.profit, Decimal::ZERO);
        assert_eq!(t.hit_rate, Decimal::ZERO);
        assert_eq!(t.roi, Decimal::ZERO);
        assert_eq!(t.median_stake, Decimal::ZERO);
    }

    #[test]
    fn totals_over_mixed_statuses() {
        let bets = vec![
            bet(dec!(10), dec!(2.0), BetStatus::Won),  // returns 20, +10
            bet(dec!(10), dec!(3.0), BetStatus::Lost), // returns 0, -10
            bet(dec!(5), dec!(1.5), BetStatus::Won),   // returns 7.50, +2.50
            bet(dec!(20), dec!(2.5), BetStatus::Pending),
        ];
        let t = totals(&bets);

        assert_eq!(t.bet_count, 4);
        assert_eq!(t.settled_count, 3);
        assert_eq!(t.wins, 2);
        assert_eq!(t.total_staked, dec!(45.00));
        assert_eq!(t.settled_staked, dec!(25.00));
        assert_eq!(t.total_returned, dec!(27.50));
        assert_eq!(t.profit, dec!(2.50));
        // 2 wins of 3 settled
        assert!((t.hit_rate - dec!(0.6667)).abs() < dec!(0.001));
        assert_eq!(t.roi, dec!(0.1));
        assert_eq!(t.pending_stake, dec!(20.00));
        assert_eq!(t.pending_potential_return, dec!(50.00));
    }

    #[test]
    fn median_stake_averages_middle_pair() {
        // [5, 10, 5, 20] -> sorted 5,5,10,20 -> (5+10)/2
        let bets = vec![
            bet(dec!(5), dec!(2), BetStatus::Pending),
            bet(dec!(10), dec!(2), BetStatus::Pending),
            bet(dec!(5), dec!(2), BetStatus::Pending),
            bet(dec!(20), dec!(2), BetStatus::Pending),
        ];
        assert_eq!(totals(&bets).median_stake, dec!(7.5));
    }

    #[test]
    fn median_stake_odd_count_takes_midpoint() {
        let bets = vec![
            bet(dec!(1), dec!(2), BetStatus::Pending),
            bet(dec!(9), dec!(2), BetStatus::Pending),
            bet(dec!(4), dec!(2), BetStatus::Pending),
        ];
        assert_eq!(totals(&bets).median_stake, dec!(4));
    }

    #[test]
    fn override_feeds_into_returned() {
        let mut cashed_out = bet(dec!(10), dec!(5.0), BetStatus::Won);
        cashed_out.return_override = Some(dec!(30));
        let t = totals(std::iter::once(&cashed_out));
        assert_eq!(t.total_returned, dec!(30.00));
        assert_eq!(t.profit, dec!(20.00));
    }
}
