use rust_decimal::Decimal;

use crate::domain::Bet;

/// Total settled profit over the full, unfiltered record set.
pub fn settled_profit<'a, I>(bets: I) -> Decimal
where
    I: IntoIterator<Item = &'a Bet>,
{
    bets.into_iter().filter_map(|bet| bet.profit()).sum()
}

/// Fraction of the profit target reached, clamped to [0, 1]. Zero when the
/// target is unset or non-positive. Always computed over ALL settled
/// records, independent of any view filter.
pub fn goal_progress<'a, I>(bets: I, target_profit: Decimal) -> Decimal
where
    I: IntoIterator<Item = &'a Bet>,
{
    if target_profit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (settled_profit(bets) / target_profit).clamp(Decimal::ZERO, Decimal::ONE)
}

/// Starting bankroll adjusted by settled profit, when a bankroll is set.
pub fn current_bankroll<'a, I>(bets: I, starting_bankroll: Option<Decimal>) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Bet>,
{
    starting_bankroll.map(|start| start + settled_profit(bets))
}
