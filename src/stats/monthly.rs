use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{round2, Bet};

/// One month of settled P&L, keyed yyyy-mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub month: String,
    pub staked: Decimal,
    pub returned: Decimal,
    pub profit: Decimal,
}

/// Group settled records by year-month and accumulate staked/returned/profit.
/// Rows come out ascending by month key (lexicographic = chronological).
pub fn monthly_pnl<'a, I>(bets: I) -> Vec<MonthlyRow>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for bet in bets {
        let Some(returned) = bet.effective_return() else {
            continue;
        };
        let entry = months
            .entry(bet.month_key())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += bet.stake;
        entry.1 += returned;
    }

    months
        .into_iter()
        .map(|(month, (staked, returned))| MonthlyRow {
            month,
            staked: round2(staked),
            returned: round2(returned),
            profit: round2(returned - staked),
        })
        .collect()
}
