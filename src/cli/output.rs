//! Output formatting for stakebook commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// Print a view: the raw Serialize value in JSON mode, the display rows as
/// a table otherwise.
pub fn print_view<R, T>(raw: &R, rows: &[T], mode: OutputMode) -> anyhow::Result<()>
where
    R: Serialize + ?Sized,
    T: Tabled,
{
    match mode {
        OutputMode::Table => {
            if rows.is_empty() {
                println!("(no results)");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputMode::Json => print_json(raw)?,
    }
    Ok(())
}

/// Print a Serialize value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a simple key-value pair.
pub fn print_kv(key: &str, value: &str) {
    println!("{key:<26} {value}");
}

/// Format a monetary amount with the configured currency symbol.
pub fn money(currency: &str, value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-{currency}{:.2}", -value)
    } else {
        format!("{currency}{:.2}", value)
    }
}

/// Format a ratio as a percentage with one decimal place.
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_places_sign_before_symbol() {
        assert_eq!(money("£", dec!(12.5)), "£12.50");
        assert_eq!(money("£", dec!(-3.2)), "-£3.20");
        assert_eq!(money("$", Decimal::ZERO), "$0.00");
    }

    #[test]
    fn percent_scales_and_rounds_for_display() {
        assert_eq!(percent(dec!(0.55)), "55.0%");
        assert_eq!(percent(dec!(0.125)), "12.5%");
        assert_eq!(percent(Decimal::ONE), "100.0%");
    }
}
