//! Command handlers: wire the store, session and reducers together.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tabled::Tabled;
use tracing::warn;

use crate::domain::{parse_decimal_or, Bet, BetStatus, Category, Sport};
use crate::export;
use crate::ledger::{BetDraft, BetFilter, BetPatch};
use crate::persistence::{load_session, save_session, KvStore};
use crate::stats;

use super::output::{money, percent, print_json, print_kv, print_view, OutputMode};
use super::{FilterArgs, GoalCommands};

// ---------------------------------------------------------------------------
// parsing helpers

fn parse_enum<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    value.parse().map_err(|err: String| anyhow!(err))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse()
        .with_context(|| format!("invalid date '{value}', expected yyyy-mm-dd"))
}

fn parse_amount(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid amount '{value}'"))
}

/// "none" clears an optional field; anything else must parse.
fn parse_clearable<T>(value: &str, parse: impl Fn(&str) -> Result<T>) -> Result<Option<T>> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

fn parse_filter(args: &FilterArgs) -> Result<BetFilter> {
    Ok(BetFilter {
        sport: args.sport.as_deref().map(parse_enum::<Sport>).transpose()?,
        status: args
            .status
            .as_deref()
            .map(parse_enum::<BetStatus>)
            .transpose()?,
        from: args.from.as_deref().map(parse_date).transpose()?,
        to: args.to.as_deref().map(parse_date).transpose()?,
        search: args.search.clone(),
    })
}

// ---------------------------------------------------------------------------
// display rows

#[derive(Tabled)]
struct BetRow {
    id: String,
    date: String,
    description: String,
    sport: String,
    category: String,
    stake: String,
    odds: String,
    status: String,
    #[tabled(rename = "return")]
    effective_return: String,
    profit: String,
}

impl BetRow {
    fn from_bet(bet: &Bet, currency: &str) -> Self {
        Self {
            id: bet.id.chars().take(8).collect(),
            date: bet.date.to_string(),
            description: bet.description.clone(),
            sport: bet.sport.as_str().to_string(),
            category: bet
                .category
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            stake: money(currency, bet.stake),
            odds: format!("{:.2}", bet.odds),
            status: bet.status.as_str().to_string(),
            effective_return: bet
                .effective_return()
                .map(|r| money(currency, r))
                .unwrap_or_default(),
            profit: bet
                .profit()
                .map(|p| money(currency, p))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct MonthlyDisplay {
    month: String,
    staked: String,
    returned: String,
    profit: String,
}

#[derive(Tabled)]
struct GroupDisplay {
    group: String,
    bets: usize,
    settled: usize,
    wins: usize,
    staked: String,
    returned: String,
    profit: String,
    #[tabled(rename = "win %")]
    win_rate: String,
}

#[derive(Tabled)]
struct BandDisplay {
    band: String,
    bets: usize,
    wins: usize,
    #[tabled(rename = "avg odds")]
    average_odds: String,
    #[tabled(rename = "implied %")]
    implied: String,
    #[tabled(rename = "win %")]
    win_rate: String,
    edge: String,
    roi: String,
    profit: String,
}

#[derive(Tabled)]
struct WeekdayDisplay {
    weekday: String,
    settled: usize,
    wins: usize,
    staked: String,
    profit: String,
    #[tabled(rename = "win %")]
    win_rate: String,
    roi: String,
}

#[derive(Tabled)]
struct SeriesDisplay {
    date: String,
    #[tabled(rename = "cumulative profit")]
    profit: String,
}

// ---------------------------------------------------------------------------
// handlers

#[allow(clippy::too_many_arguments)]
pub fn add(
    store: &dyn KvStore,
    mode: OutputMode,
    description: String,
    sport: String,
    stake: String,
    odds: String,
    date: Option<String>,
    category: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let draft = BetDraft {
        date: match date {
            Some(value) => parse_date(&value)?,
            None => Utc::now().date_naive(),
        },
        description,
        sport: parse_enum(&sport)?,
        category: category.as_deref().map(parse_enum::<Category>).transpose()?,
        stake: parse_amount(&stake)?,
        odds: parse_amount(&odds)?,
        status: status
            .as_deref()
            .map(parse_enum::<BetStatus>)
            .transpose()?
            .unwrap_or_default(),
        return_override: None,
    };

    let mut session = load_session(store);
    let bet = session.add(draft)?.clone();
    save_session(store, &mut session)?;

    match mode {
        OutputMode::Json => print_json(&bet)?,
        OutputMode::Table => println!("Added {} ({})", bet.id, bet.description),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    store: &dyn KvStore,
    mode: OutputMode,
    id: String,
    date: Option<String>,
    description: Option<String>,
    sport: Option<String>,
    category: Option<String>,
    stake: Option<String>,
    odds: Option<String>,
    status: Option<String>,
    payout: Option<String>,
) -> Result<()> {
    let patch = BetPatch {
        date: date.as_deref().map(parse_date).transpose()?,
        description,
        sport: sport.as_deref().map(parse_enum::<Sport>).transpose()?,
        category: category
            .as_deref()
            .map(|value| parse_clearable(value, |v| parse_enum::<Category>(v)))
            .transpose()?,
        stake: stake.as_deref().map(parse_amount).transpose()?,
        odds: odds.as_deref().map(parse_amount).transpose()?,
        status: status.as_deref().map(parse_enum::<BetStatus>).transpose()?,
        return_override: payout
            .as_deref()
            .map(|value| parse_clearable(value, parse_amount))
            .transpose()?,
    };

    let mut session = load_session(store);
    let bet = session.edit(&id, patch)?.clone();
    save_session(store, &mut session)?;

    match mode {
        OutputMode::Json => print_json(&bet)?,
        OutputMode::Table => println!("Updated {}", bet.id),
    }
    Ok(())
}

pub fn settle(
    store: &dyn KvStore,
    mode: OutputMode,
    id: String,
    outcome: String,
    payout: Option<String>,
) -> Result<()> {
    let outcome: BetStatus = parse_enum(&outcome)?;
    let payout = payout.as_deref().map(parse_amount).transpose()?;

    let mut session = load_session(store);
    let bet = session.settle(&id, outcome, payout)?.clone();
    save_session(store, &mut session)?;

    match mode {
        OutputMode::Json => print_json(&bet)?,
        OutputMode::Table => println!(
            "Settled {} as {} (return {})",
            bet.id,
            bet.status,
            bet.effective_return().unwrap_or_default()
        ),
    }
    Ok(())
}

pub fn delete(store: &dyn KvStore, id: String) -> Result<()> {
    let mut session = load_session(store);
    session.delete(&id)?;
    save_session(store, &mut session)?;
    println!("Deleted {id} (restore with `stakebook undo` within 10 seconds)");
    Ok(())
}

pub fn undo(store: &dyn KvStore) -> Result<()> {
    let mut session = load_session(store);
    match session.undo_delete().map(|bet| bet.id.clone()) {
        Some(id) => {
            save_session(store, &mut session)?;
            println!("Restored {id}");
        }
        None => {
            save_session(store, &mut session)?;
            println!("Nothing to undo (the 10 second window may have lapsed)");
        }
    }
    Ok(())
}

pub fn list(
    store: &dyn KvStore,
    mode: OutputMode,
    currency: &str,
    filter: &FilterArgs,
) -> Result<()> {
    let filter = parse_filter(filter)?;
    let session = load_session(store);

    let mut selected = filter.apply(session.bets());
    // Ledger view: newest first, creation order breaking date ties
    selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

    let rows: Vec<BetRow> = selected
        .iter()
        .map(|bet| BetRow::from_bet(bet, currency))
        .collect();
    print_view(&selected, &rows, mode)
}

pub fn stats(
    store: &dyn KvStore,
    mode: OutputMode,
    currency: &str,
    view: &str,
    filter: &FilterArgs,
) -> Result<()> {
    let filter = parse_filter(filter)?;
    let session = load_session(store);
    let selected = filter.apply(session.bets());
    let bets = selected.iter().copied();

    match view {
        "summary" => {
            let totals = stats::totals(bets);
            if mode == OutputMode::Json {
                return print_json(&totals);
            }
            print_kv("Bets", &totals.bet_count.to_string());
            print_kv(
                "Settled",
                &format!("{} ({} won)", totals.settled_count, totals.wins),
            );
            print_kv("Total staked", &money(currency, totals.total_staked));
            print_kv("Total returned", &money(currency, totals.total_returned));
            print_kv("Profit", &money(currency, totals.profit));
            print_kv("Hit rate", &percent(totals.hit_rate));
            print_kv("ROI", &percent(totals.roi));
            print_kv("Average odds", &format!("{:.2}", totals.average_odds));
            print_kv("Average stake", &money(currency, totals.average_stake));
            print_kv("Median stake", &money(currency, totals.median_stake));
            print_kv("Profit / settled bet", &money(currency, totals.profit_per_bet));
            print_kv("Pending stake", &money(currency, totals.pending_stake));
            print_kv(
                "Pending potential return",
                &money(currency, totals.pending_potential_return),
            );
        }
        "monthly" => {
            let rows = stats::monthly_pnl(bets);
            let display: Vec<MonthlyDisplay> = rows
                .iter()
                .map(|r| MonthlyDisplay {
                    month: r.month.clone(),
                    staked: money(currency, r.staked),
                    returned: money(currency, r.returned),
                    profit: money(currency, r.profit),
                })
                .collect();
            print_view(&rows, &display, mode)?;
        }
        "sports" => {
            let rows = stats::by_sport(bets);
            print_view(&rows, &group_display(&rows, currency), mode)?;
        }
        "categories" => {
            let rows = stats::by_category(bets);
            print_view(&rows, &group_display(&rows, currency), mode)?;
        }
        "bands" => {
            let rows = stats::odds_bands(bets);
            let display: Vec<BandDisplay> = rows
                .iter()
                .map(|r| BandDisplay {
                    band: r.band.to_string(),
                    bets: r.bet_count,
                    wins: r.wins,
                    average_odds: format!("{:.2}", r.average_odds),
                    implied: percent(r.implied_probability),
                    win_rate: percent(r.win_rate),
                    edge: percent(r.edge),
                    roi: percent(r.roi),
                    profit: money(currency, r.profit),
                })
                .collect();
            print_view(&rows, &display, mode)?;
        }
        "weekdays" => {
            let rows = stats::by_weekday(bets);
            let display: Vec<WeekdayDisplay> = rows
                .iter()
                .map(|r| WeekdayDisplay {
                    weekday: r.weekday.to_string(),
                    settled: r.settled_count,
                    wins: r.wins,
                    staked: money(currency, r.staked),
                    profit: money(currency, r.profit),
                    win_rate: percent(r.win_rate),
                    roi: percent(r.roi),
                })
                .collect();
            print_view(&rows, &display, mode)?;
        }
        "series" => {
            let rows = stats::cumulative_profit(bets);
            let display: Vec<SeriesDisplay> = rows
                .iter()
                .map(|p| SeriesDisplay {
                    date: p.date.to_string(),
                    profit: money(currency, p.profit),
                })
                .collect();
            print_view(&rows, &display, mode)?;
        }
        other => bail!(
            "unknown stats view '{other}' (expected summary, monthly, sports, categories, bands, weekdays or series)"
        ),
    }
    Ok(())
}

fn group_display(rows: &[stats::GroupRow], currency: &str) -> Vec<GroupDisplay> {
    rows.iter()
        .map(|r| GroupDisplay {
            group: r.key.clone(),
            bets: r.bet_count,
            settled: r.settled_count,
            wins: r.wins,
            staked: money(currency, r.staked),
            returned: money(currency, r.returned),
            profit: money(currency, r.profit),
            win_rate: percent(r.win_rate),
        })
        .collect()
}

pub fn goal(
    store: &dyn KvStore,
    mode: OutputMode,
    currency: &str,
    command: GoalCommands,
) -> Result<()> {
    match command {
        GoalCommands::Show => {
            let session = load_session(store);
            // Goal progress is session-wide: always the full, unfiltered set
            let target = session.settings().target_profit;
            let profit = stats::settled_profit(session.bets());
            let progress = stats::goal_progress(session.bets(), target);

            if mode == OutputMode::Json {
                return print_json(&serde_json::json!({
                    "targetProfit": target,
                    "settledProfit": profit,
                    "progress": progress,
                }));
            }
            print_kv("Target profit", &money(currency, target));
            print_kv("Settled profit", &money(currency, profit));
            print_kv("Progress", &percent(progress));
            if let Some(bankroll) =
                stats::current_bankroll(session.bets(), session.settings().starting_bankroll)
            {
                print_kv("Bankroll", &money(currency, bankroll));
            }
        }
        GoalCommands::Set { target } => {
            if target.trim().parse::<Decimal>().is_err() {
                warn!(input = %target, "invalid target, falling back to 0");
            }
            let value = parse_decimal_or(&target, Decimal::ZERO);
            let mut session = load_session(store);
            session.settings_mut().target_profit = value;
            save_session(store, &mut session)?;
            println!("Target profit set to {}", money(currency, value));
        }
        GoalCommands::Bankroll { amount } => {
            let value = parse_amount(&amount)?;
            let mut session = load_session(store);
            session.settings_mut().starting_bankroll = Some(value);
            save_session(store, &mut session)?;
            println!("Starting bankroll set to {}", money(currency, value));
        }
    }
    Ok(())
}

pub fn export(
    store: &dyn KvStore,
    format: &str,
    output: Option<&Path>,
    filter: &FilterArgs,
) -> Result<()> {
    let filter = parse_filter(filter)?;
    let session = load_session(store);

    let mut selected = filter.apply(session.bets());
    selected.sort_by_key(|bet| bet.date);

    let rendered = match format {
        "csv" => export::to_csv_string(selected.iter().copied())?,
        "json" => export::to_json_string(session.settings(), selected.iter().copied())?,
        other => bail!("unknown export format '{other}' (expected csv or json)"),
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported {} bets to {}", selected.len(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
