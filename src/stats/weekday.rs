use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{ratio, round2, Bet, BetStatus};

/// Fixed Sunday-first calendar, independent of locale.
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Settled performance for one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayRow {
    pub weekday: &'static str,
    pub settled_count: usize,
    pub wins: usize,
    pub staked: Decimal,
    pub returned: Decimal,
    pub profit: Decimal,
    pub win_rate: Decimal,
    pub roi: Decimal,
}

/// Group settled records by day of week. All 7 rows are always present
/// (zero-filled when empty), sorted descending by profit; equal-profit rows
/// keep Sunday-first order.
pub fn by_weekday<'a, I>(bets: I) -> Vec<WeekdayRow>
where
    I: IntoIterator<Item = &'a Bet>,
{
    #[derive(Default, Clone, Copy)]
    struct Acc {
        count: usize,
        wins: usize,
        staked: Decimal,
        returned: Decimal,
    }

    let mut accs = [Acc::default(); 7];
    for bet in bets {
        let Some(returned) = bet.effective_return() else {
            continue;
        };
        let acc = &mut accs[bet.date.weekday().num_days_from_sunday() as usize];
        acc.count += 1;
        acc.staked += bet.stake;
        acc.returned += returned;
        if bet.status == BetStatus::Won {
            acc.wins += 1;
        }
    }

    let mut rows: Vec<WeekdayRow> = accs
        .iter()
        .zip(WEEKDAYS)
        .map(|(acc, weekday)| {
            let profit = acc.returned - acc.staked;
            WeekdayRow {
                weekday,
                settled_count: acc.count,
                wins: acc.wins,
                staked: round2(acc.staked),
                returned: round2(acc.returned),
                profit: round2(profit),
                win_rate: ratio(
                    Decimal::from(acc.wins as u64),
                    Decimal::from(acc.count as u64),
                ),
                roi: ratio(profit, acc.staked),
            }
        })
        .collect();

    // Stable sort keeps calendar order among equal profits
    rows.sort_by(|a, b| b.profit.cmp(&a.profit));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sport;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn bet(date: &str, stake: Decimal, odds: Decimal, status: BetStatus) -> Bet {
        let now = Utc::now();
        Bet {
            id: format!("{date}-{stake}"),
            date: date.parse().unwrap(),
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
    fn emits_all_seven_rows_zero_filled() {
        let bets: Vec<Bet> = Vec::new();
        let rows = by_weekday(&bets);
        assert_eq!(rows.len(), 7);
        // With no data every profit ties at zero, so Sunday-first order holds
        let names: Vec<&str> = rows.iter().map(|r| r.weekday).collect();
        assert_eq!(names, WEEKDAYS.to_vec());
    }

    #[test]
    fn winning_weekday_sorts_first() {
        // 2024-06-02 is a Sunday, 2024-06-03 a Monday
        let bets = vec![
            bet("2024-06-02", dec!(10), dec!(2.0), BetStatus::Lost),
            bet("2024-06-03", dec!(10), dec!(3.0), BetStatus::Won),
            bet("2024-06-10", dec!(10), dec!(2.0), BetStatus::Won), // next Monday
        ];
        let rows = by_weekday(&bets);

        assert_eq!(rows[0].weekday, "Monday");
        assert_eq!(rows[0].settled_count, 2);
        assert_eq!(rows[0].wins, 2);
        assert_eq!(rows[0].profit, dec!(30.00));
        assert_eq!(rows[0].win_rate, Decimal::ONE);
        assert_eq!(rows[0].roi, dec!(1.5));
        // Sunday lost money, so it sinks below the zero-filled days
        assert_eq!(rows[6].weekday, "Sunday");
        assert_eq!(rows[6].profit, dec!(-10.00));
    }

    #[test]
    fn pending_bets_do_not_count() {
        let bets = vec![bet("2024-06-02", dec!(10), dec!(2.0), BetStatus::Pending)];
        let rows = by_weekday(&bets);
        assert!(rows.iter().all(|r| r.settled_count == 0));
    }

    #[test]
    fn weekday_profits_sum_to_total() {
        let bets = vec![
            bet("2024-06-02", dec!(10), dec!(2.0), BetStatus::Won),
            bet("2024-06-05", dec!(7), dec!(1.4), BetStatus::Lost),
            bet("2024-06-08", dec!(3), dec!(6.0), BetStatus::Won),
        ];
        let total: Decimal = bets.iter().filter_map(|b| b.profit()).sum();
        let grouped: Decimal = by_weekday(&bets).iter().map(|r| r.profit).sum();
        assert_eq!(grouped, total);
    }
}
