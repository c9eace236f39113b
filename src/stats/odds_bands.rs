//! Odds-band calibration: how observed win rates compare to the
//! probabilities implied by the odds taken.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::domain::{ratio, round2, Bet, BetStatus};

/// Fixed, non-overlapping decimal-odds bands, always emitted in this order.
pub const BAND_LABELS: [&str; 5] = [
    "1.01-1.49",
    "1.50-1.99",
    "2.00-2.99",
    "3.00-4.99",
    "5.00+",
];

const BAND_UPPER: [Decimal; 4] = [dec!(1.50), dec!(2.00), dec!(3.00), dec!(5.00)];

/// Calibration statistics for one odds band, over settled records only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsBandRow {
    pub band: &'static str,
    pub bet_count: usize,
    pub wins: usize,
    pub average_odds: Decimal,
    /// 1 / average odds, the break-even win probability for the band
    pub implied_probability: Decimal,
    pub win_rate: Decimal,
    /// win_rate - implied_probability; positive means the odds were beaten
    pub edge: Decimal,
    pub roi: Decimal,
    pub profit: Decimal,
}

#[derive(Default)]
struct Acc {
    count: usize,
    wins: usize,
    odds_sum: Decimal,
    staked: Decimal,
    returned: Decimal,
}

/// Bucket settled bets into the five fixed bands. Empty bands report
/// all-zero statistics rather than being omitted.
pub fn odds_bands<'a, I>(bets: I) -> Vec<OddsBandRow>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut accs: [Acc; 5] = Default::default();

    for bet in bets {
        let Some(returned) = bet.effective_return() else {
            continue;
        };
        let acc = &mut accs[band_index(bet.odds)];
        acc.count += 1;
        acc.odds_sum += bet.odds;
        acc.staked += bet.stake;
        acc.returned += returned;
        if bet.status == BetStatus::Won {
            acc.wins += 1;
        }
    }

    accs.into_iter()
        .zip(BAND_LABELS)
        .map(|(acc, band)| {
            let count = Decimal::from(acc.count as u64);
            let average_odds = ratio(acc.odds_sum, count);
            let implied_probability = ratio(Decimal::ONE, average_odds);
            let win_rate = ratio(Decimal::from(acc.wins as u64), count);
            let profit = acc.returned - acc.staked;
            OddsBandRow {
                band,
                bet_count: acc.count,
                wins: acc.wins,
                average_odds,
                implied_probability,
                win_rate,
                edge: win_rate - implied_probability,
                roi: ratio(profit, acc.staked),
                profit: round2(profit),
            }
        })
        .collect()
}

fn band_index(odds: Decimal) -> usize {
    BAND_UPPER
        .iter()
        .position(|upper| odds < *upper)
        .unwrap_or(BAND_UPPER.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sport;
    use chrono::Utc;

    fn bet(odds: Decimal, status: BetStatus) -> Bet {
        let now = Utc::now();
        Bet {
            id: format!("{odds}-{status:?}-{}", now.timestamp_nanos_opt().unwrap_or(0)),
            date: "2024-04-01".parse().unwrap(),
            description: "fixture".to_string(),
            sport: Sport::Other,
            category: None,
            stake: dec!(10),
            odds,
            status,
            return_override: None,
            settled_at: status.is_settled().then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn always_five_rows_in_fixed_order() {
        let bets: Vec<Bet> = Vec::new();
        let rows = odds_bands(&bets);
        assert_eq!(rows.len(), 5);
        for (row, label) in rows.iter().zip(BAND_LABELS) {
            assert_eq!(row.band, label);
            assert_eq!(row.bet_count, 0);
            assert_eq!(row.profit, Decimal::ZERO);
            assert_eq!(row.edge, Decimal::ZERO);
        }
    }

    #[test]
    fn band_boundaries_bucket_correctly() {
        assert_eq!(band_index(dec!(1.01)), 0);
        assert_eq!(band_index(dec!(1.49)), 0);
        assert_eq!(band_index(dec!(1.50)), 1);
        assert_eq!(band_index(dec!(1.99)), 1);
        assert_eq!(band_index(dec!(2.00)), 2);
        assert_eq!(band_index(dec!(2.99)), 2);
        assert_eq!(band_index(dec!(3.00)), 3);
        assert_eq!(band_index(dec!(4.99)), 3);
        assert_eq!(band_index(dec!(5.00)), 4);
        assert_eq!(band_index(dec!(21.0)), 4);
    }

    #[test]
    fn edge_is_exact_for_even_money_band() {
        // 20 settled bets at odds 2.0, 11 won: win rate 0.55, implied 0.5
        let mut bets = Vec::new();
        for i in 0..20 {
            let status = if i < 11 { BetStatus::Won } else { BetStatus::Lost };
            let mut b = bet(dec!(2.0), status);
            b.id = format!("bet-{i}");
            bets.push(b);
        }
        let rows = odds_bands(&bets);
        let band = &rows[2];
        assert_eq!(band.bet_count, 20);
        assert_eq!(band.average_odds, dec!(2.0));
        assert_eq!(band.implied_probability, dec!(0.5));
        assert_eq!(band.win_rate, dec!(0.55));
        assert_eq!(band.edge, dec!(0.05));
        // 11 * 20 returned vs 200 staked
        assert_eq!(band.profit, dec!(20.00));
        assert_eq!(band.roi, dec!(0.1));
    }

    #[test]
    fn pending_bets_are_ignored() {
        let bets = vec![bet(dec!(2.0), BetStatus::Pending)];
        let rows = odds_bands(&bets);
        assert_eq!(rows[2].bet_count, 0);
    }
}
