use std::io::Write;

use crate::domain::{Bet, Sport};
use crate::error::{LedgerError, Result};

const HEADER: [&str; 9] = [
    "date",
    "description",
    "sport",
    "category",
    "stake",
    "odds",
    "status",
    "return",
    "profit",
];

/// Write the (optionally filtered) record set as CSV. Column order and
/// presence are fixed; the csv writer quotes any field containing
/// delimiter characters. Return and profit are blank for pending bets;
/// category is blank outside Football.
pub fn write_csv<'a, I, W>(writer: W, bets: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Bet>,
    W: Write,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    for bet in bets {
        let category = match (bet.sport, bet.category) {
            (Sport::Football, Some(category)) => category.as_str().to_string(),
            _ => String::new(),
        };
        let effective_return = bet
            .effective_return()
            .map(|r| format!("{r:.2}"))
            .unwrap_or_default();
        let profit = bet
            .profit()
            .map(|p| format!("{p:.2}"))
            .unwrap_or_default();

        out.write_record([
            bet.date.to_string(),
            bet.description.clone(),
            bet.sport.as_str().to_string(),
            category,
            format!("{:.2}", bet.stake),
            format!("{:.2}", bet.odds),
            bet.status.as_str().to_string(),
            effective_return,
            profit,
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// CSV snapshot as a string, for stdout or clipboard-style consumers.
pub fn to_csv_string<'a, I>(bets: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Bet>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, bets)?;
    String::from_utf8(buf).map_err(|err| LedgerError::Internal(err.to_string()))
}
