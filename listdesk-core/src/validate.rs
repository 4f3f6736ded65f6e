//! Field validator — per-field constraints and the whole-record pass.
//!
//! Constraints are declared once in a static table keyed by [`Field`];
//! the single-field and whole-record validators both read that table, so
//! the whole-record pass is exactly every per-field check plus the
//! trading-date ordering rule, never less strict.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::record::{Field, FieldValue, FutureRecord};

/// Declared constraint for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Non-empty text.
    RequiredText,
    /// Free text, always valid.
    OptionalText,
    /// Number strictly greater than zero.
    Positive,
    /// Number greater than or equal to zero.
    NonNegative,
    /// Positive integer identifier (a concrete selection).
    RequiredId,
    /// Boolean toggle, always valid.
    Flag,
}

/// Message shown when a trading-date pair is out of order.
pub const DATE_ORDER_MESSAGE: &str = "first trading date must be before last trading date";

/// Constraint table, one entry per field.
pub fn constraint(field: Field) -> Constraint {
    match field {
        Field::Symbol
        | Field::Isin
        | Field::FullName
        | Field::DepositType
        | Field::UnderlyingType
        | Field::FirstTradingDate
        | Field::LastTradingDate
        | Field::TradingCurrency
        | Field::SettlementMethod => Constraint::RequiredText,
        Field::Description
        | Field::ExpirationCode
        | Field::ParentTicker
        | Field::Segment
        | Field::MaturityDate => Constraint::OptionalText,
        Field::LotSize | Field::TickSize => Constraint::Positive,
        Field::InitialMarginAmount
        | Field::PercentageMargin
        | Field::TickValue
        | Field::ContractMultiplier => Constraint::NonNegative,
        Field::UnderlyingId => Constraint::RequiredId,
        Field::InstrumentStatus => Constraint::Flag,
    }
}

/// Message attached when a field fails its constraint.
fn constraint_message(field: Field) -> &'static str {
    match field {
        Field::Symbol => "symbol is required",
        Field::Isin => "ISIN code is required",
        Field::FullName => "full name is required",
        Field::DepositType => "deposit type is required",
        Field::UnderlyingType => "underlying type is required",
        Field::UnderlyingId => "an underlying asset must be selected",
        Field::FirstTradingDate => "first trading date is required",
        Field::LastTradingDate => "last trading date is required",
        Field::TradingCurrency => "trading currency is required",
        Field::SettlementMethod => "settlement method is required",
        Field::LotSize => "lot size must be greater than 0",
        Field::TickSize => "tick size must be greater than 0",
        Field::InitialMarginAmount => "initial margin amount must not be negative",
        Field::PercentageMargin => "percentage margin must not be negative",
        Field::TickValue => "tick value must not be negative",
        Field::ContractMultiplier => "contract multiplier must not be negative",
        // Always-valid fields never surface a message.
        Field::Description
        | Field::ExpirationCode
        | Field::ParentTicker
        | Field::Segment
        | Field::MaturityDate
        | Field::InstrumentStatus => "",
    }
}

/// Validate one field in isolation against its declared constraint.
pub fn validate_field(field: Field, record: &FutureRecord) -> Option<String> {
    let failed = match (constraint(field), record.value(field)) {
        (Constraint::RequiredText, FieldValue::Text(s)) => s.is_empty(),
        (Constraint::OptionalText, _) => false,
        (Constraint::Positive, FieldValue::Number(n)) => n <= 0.0,
        (Constraint::NonNegative, FieldValue::Number(n)) => n < 0.0,
        (Constraint::RequiredId, FieldValue::Id(id)) => id <= 0,
        (Constraint::Flag, _) => false,
        // Constraint table and value table disagree — treat as invalid
        // so the mismatch cannot pass silently.
        _ => true,
    };
    if failed {
        Some(constraint_message(field).to_string())
    } else {
        None
    }
}

/// Ordering rule over the trading-date pair. Fires only when both dates
/// are present and parse; text that does not parse produces no ordering
/// error (required-ness is enforced per field instead).
pub fn validate_trading_dates(first: &str, last: &str) -> Option<String> {
    if first.is_empty() || last.is_empty() {
        return None;
    }
    let first = NaiveDate::parse_from_str(first, "%Y-%m-%d").ok()?;
    let last = NaiveDate::parse_from_str(last, "%Y-%m-%d").ok()?;
    if first >= last {
        Some(DATE_ORDER_MESSAGE.to_string())
    } else {
        None
    }
}

/// Whole-record pass: every declared constraint plus the ordering rule.
/// An empty result map means the record is fully valid.
pub fn validate_record(record: &FutureRecord) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();
    for field in Field::ALL {
        if let Some(message) = validate_field(field, record) {
            errors.insert(field, message);
        }
    }
    if let Some(message) =
        validate_trading_dates(&record.first_trading_date, &record.last_trading_date)
    {
        // The ordering error always lands on the last trading date.
        errors.insert(Field::LastTradingDate, message);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> FutureRecord {
        FutureRecord {
            symbol: "FESX".into(),
            isin: "FR0000000000".into(),
            full_name: "Euro Stoxx 50 Future".into(),
            deposit_type: "RATE".into(),
            lot_size: 10.0,
            underlying_type: "INDEX".into(),
            underlying_id: 7,
            first_trading_date: "2024-01-02".into(),
            last_trading_date: "2024-12-20".into(),
            trading_currency: "EUR".into(),
            settlement_method: "CASH".into(),
            tick_size: 0.5,
            ..FutureRecord::default()
        }
    }

    #[test]
    fn valid_record_has_no_errors() {
        assert!(validate_record(&valid_record()).is_empty());
    }

    #[test]
    fn missing_isin_is_reported_and_clears() {
        let mut record = valid_record();
        record.isin.clear();
        let errors = validate_record(&record);
        assert_eq!(errors.get(&Field::Isin).map(String::as_str), Some("ISIN code is required"));

        record.isin = "FR0000000000".into();
        assert!(!validate_record(&record).contains_key(&Field::Isin));
    }

    #[test]
    fn reversed_dates_attach_to_last_trading_date() {
        let mut record = valid_record();
        record.first_trading_date = "2024-06-01".into();
        record.last_trading_date = "2024-01-01".into();
        let errors = validate_record(&record);
        assert_eq!(
            errors.get(&Field::LastTradingDate).map(String::as_str),
            Some(DATE_ORDER_MESSAGE)
        );
        assert!(!errors.contains_key(&Field::FirstTradingDate));

        record.first_trading_date = "2024-01-01".into();
        record.last_trading_date = "2024-06-01".into();
        assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn equal_dates_are_out_of_order() {
        assert!(validate_trading_dates("2024-05-01", "2024-05-01").is_some());
        assert!(validate_trading_dates("2024-05-01", "2024-05-02").is_none());
    }

    #[test]
    fn unparseable_dates_produce_no_ordering_error() {
        assert!(validate_trading_dates("soon", "2024-05-01").is_none());
        assert!(validate_trading_dates("2024-05-01", "later").is_none());
        assert!(validate_trading_dates("", "2024-05-01").is_none());
    }

    #[test]
    fn ordering_rule_runs_even_when_other_fields_fail() {
        let mut record = valid_record();
        record.symbol.clear();
        record.first_trading_date = "2024-06-01".into();
        record.last_trading_date = "2024-01-01".into();
        let errors = validate_record(&record);
        assert!(errors.contains_key(&Field::Symbol));
        assert!(errors.contains_key(&Field::LastTradingDate));
    }

    #[test]
    fn numeric_constraints() {
        let mut record = valid_record();
        record.tick_size = 0.0;
        let errors = validate_record(&record);
        assert_eq!(
            errors.get(&Field::TickSize).map(String::as_str),
            Some("tick size must be greater than 0")
        );

        // Zero is fine for the derived amounts.
        record.tick_size = 0.5;
        record.tick_value = 0.0;
        record.contract_multiplier = 0.0;
        assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn whitespace_only_text_passes_the_field_constraint() {
        // The field constraint is non-empty; trimming is the step gate's
        // stricter rule, not this one.
        let mut record = valid_record();
        record.symbol = " ".into();
        assert!(validate_field(Field::Symbol, &record).is_none());
    }

    #[test]
    fn unselected_underlying_fails() {
        let mut record = valid_record();
        record.underlying_id = 0;
        assert!(validate_field(Field::UnderlyingId, &record).is_some());
    }
}
