use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::Bet;

/// One point of the running-profit series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub profit: Decimal,
}

/// Running sum of settled profit in date order, with a synthetic leading
/// zero point at the first settled date so the series always starts at
/// zero. Settled bets sharing a date keep their input order (stable sort).
/// Empty when nothing is settled.
pub fn cumulative_profit<'a, I>(bets: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut settled: Vec<&Bet> = bets.into_iter().filter(|bet| bet.is_settled()).collect();
    settled.sort_by_key(|bet| bet.date);

    let Some(first) = settled.first() else {
        return Vec::new();
    };

    let mut series = Vec::with_capacity(settled.len() + 1);
    series.push(SeriesPoint {
        date: first.date,
        profit: Decimal::ZERO,
    });

    let mut running = Decimal::ZERO;
    for bet in &settled {
        // profit() is Some for every settled bet
        running += bet.profit().unwrap_or(Decimal::ZERO);
        series.push(SeriesPoint {
            date: bet.date,
            profit: running,
        });
    }
    series
}
