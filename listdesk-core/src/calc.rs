//! Derived-value calculation engine.
//!
//! Pure, total functions over the two bidirectional pairs:
//! the tick triangle (tickValue = tickSize × contractMultiplier) and the
//! deposit pair (initialMarginAmount = lotSize × percentageMargin).
//! Which side of each pair is recomputed is selected by a mode tag, not by
//! mutually-observing state, so the arithmetic stays independently testable.

use serde::{Deserialize, Serialize};

use crate::record::{DEPOSIT_AMOUNT, DEPOSIT_RATE};

/// Which side of the tick pair the user drives directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    TickValue,
    ContractMultiplier,
}

impl Default for EditMode {
    fn default() -> Self {
        EditMode::TickValue
    }
}

/// Both sides of the tick pair after a recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPair {
    pub tick_value: f64,
    pub contract_multiplier: f64,
}

/// The single derived write produced by a deposit-pair recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepositUpdate {
    InitialMarginAmount(f64),
    PercentageMargin(f64),
}

/// tickValue from tickSize and contractMultiplier. Zero if either side
/// is not yet a usable positive number.
pub fn tick_value(tick_size: f64, contract_multiplier: f64) -> f64 {
    if tick_size <= 0.0 || contract_multiplier <= 0.0 {
        return 0.0;
    }
    tick_size * contract_multiplier
}

/// contractMultiplier from tickSize and tickValue.
pub fn contract_multiplier(tick_size: f64, tick_value: f64) -> f64 {
    if tick_size <= 0.0 {
        return 0.0;
    }
    tick_value / tick_size
}

/// initialMarginAmount from lotSize and percentageMargin.
pub fn initial_margin_amount(lot_size: f64, percentage_margin: f64) -> f64 {
    if lot_size <= 0.0 || percentage_margin <= 0.0 {
        return 0.0;
    }
    lot_size * percentage_margin
}

/// percentageMargin from lotSize and initialMarginAmount.
pub fn percentage_margin(lot_size: f64, initial_margin_amount: f64) -> f64 {
    if lot_size <= 0.0 {
        return 0.0;
    }
    initial_margin_amount / lot_size
}

/// Parse raw input text to an amount. Empty or unparseable text is 0.0;
/// this never fails, the "must be positive" feedback comes from validation.
pub fn parse_amount(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Recompute the non-authoritative side of the tick pair.
///
/// Single source of truth for the tickSize/tickValue/contractMultiplier
/// triangle; every edit to any of the three goes through here so the pair
/// cannot drift out of the product invariant.
pub fn recompute_tick_pair(
    tick_size: f64,
    edit_mode: EditMode,
    tick_value_input: f64,
    contract_multiplier_input: f64,
) -> TickPair {
    match edit_mode {
        EditMode::TickValue => TickPair {
            tick_value: tick_value_input,
            contract_multiplier: contract_multiplier(tick_size, tick_value_input),
        },
        EditMode::ContractMultiplier => TickPair {
            tick_value: tick_value(tick_size, contract_multiplier_input),
            contract_multiplier: contract_multiplier_input,
        },
    }
}

/// Recompute the derived side of the deposit pair for the given tag.
/// Tags other than RATE/AMOUNT derive nothing.
pub fn recompute_deposit_pair(
    deposit_type: &str,
    lot_size: f64,
    percentage_margin_input: f64,
    initial_margin_amount_input: f64,
) -> Option<DepositUpdate> {
    match deposit_type {
        DEPOSIT_RATE => Some(DepositUpdate::InitialMarginAmount(initial_margin_amount(
            lot_size,
            percentage_margin_input,
        ))),
        DEPOSIT_AMOUNT => Some(DepositUpdate::PercentageMargin(percentage_margin(
            lot_size,
            initial_margin_amount_input,
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tick_value_guards_non_positive_operands() {
        assert_eq!(tick_value(0.0, 4.0), 0.0);
        assert_eq!(tick_value(0.5, 0.0), 0.0);
        assert_eq!(tick_value(-1.0, 4.0), 0.0);
        assert_eq!(tick_value(0.5, 4.0), 2.0);
    }

    #[test]
    fn contract_multiplier_guards_tick_size() {
        assert_eq!(contract_multiplier(0.0, 10.0), 0.0);
        assert_eq!(contract_multiplier(0.5, 10.0), 20.0);
    }

    #[test]
    fn deposit_pair_basics() {
        assert_eq!(initial_margin_amount(10.0, 5.0), 50.0);
        assert_eq!(initial_margin_amount(0.0, 5.0), 0.0);
        assert_eq!(percentage_margin(10.0, 50.0), 5.0);
        assert_eq!(percentage_margin(0.0, 50.0), 0.0);
    }

    #[test]
    fn parse_amount_never_fails() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12."), 12.0);
        assert_eq!(parse_amount(" 0.25 "), 0.25);
    }

    #[test]
    fn tick_pair_recomputes_the_other_side() {
        // Editing the multiplier drives tickValue.
        let pair = recompute_tick_pair(0.5, EditMode::ContractMultiplier, 0.0, 4.0);
        assert_eq!(pair.tick_value, 2.0);
        assert_eq!(pair.contract_multiplier, 4.0);

        // Editing tickValue drives the multiplier.
        let pair = recompute_tick_pair(0.5, EditMode::TickValue, 10.0, 4.0);
        assert_eq!(pair.tick_value, 10.0);
        assert_eq!(pair.contract_multiplier, 20.0);
    }

    #[test]
    fn deposit_recompute_follows_the_tag() {
        assert_eq!(
            recompute_deposit_pair(DEPOSIT_RATE, 10.0, 5.0, 0.0),
            Some(DepositUpdate::InitialMarginAmount(50.0))
        );
        assert_eq!(
            recompute_deposit_pair(DEPOSIT_AMOUNT, 10.0, 0.0, 50.0),
            Some(DepositUpdate::PercentageMargin(5.0))
        );
        assert_eq!(recompute_deposit_pair("", 10.0, 5.0, 50.0), None);
        assert_eq!(recompute_deposit_pair("PLEDGE", 10.0, 5.0, 50.0), None);
    }

    proptest! {
        #[test]
        fn tick_round_trip(ts in 0.0001f64..1_000.0, cm in 0.0001f64..100_000.0) {
            let tv = tick_value(ts, cm);
            let back = contract_multiplier(ts, tv);
            prop_assert!((back - cm).abs() <= cm * 1e-12);
        }

        #[test]
        fn margin_round_trip(lot in 0.0001f64..1_000_000.0, pct in 0.0001f64..1_000.0) {
            let amount = initial_margin_amount(lot, pct);
            let back = percentage_margin(lot, amount);
            prop_assert!((back - pct).abs() <= pct * 1e-12);
        }
    }
}
