//! The instrument record under construction, plus the static field table.
//!
//! The record is a fixed, statically-typed struct; every field the wizard
//! touches is listed once in [`Field`], and all reads/writes from generic
//! code go through the typed [`FieldValue`]/[`FieldWrite`] views instead of
//! runtime reflection.

use serde::{Deserialize, Serialize};

/// Deposit tag for rate-driven margin derivation.
pub const DEPOSIT_RATE: &str = "RATE";
/// Deposit tag for amount-driven margin derivation.
pub const DEPOSIT_AMOUNT: &str = "AMOUNT";

/// The future being drafted. Dates are kept as `YYYY-MM-DD` text the way
/// the entry surface produces them; amounts are plain `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FutureRecord {
    // Identification
    pub symbol: String,
    pub description: String,
    pub isin: String,
    pub expiration_code: String,
    pub parent_ticker: String,
    pub full_name: String,
    pub segment: String,
    pub maturity_date: String,

    // Deposit / underlying
    pub deposit_type: String,
    pub lot_size: f64,
    pub initial_margin_amount: f64,
    pub percentage_margin: f64,
    pub underlying_type: String,
    pub underlying_id: i64,

    // Trading
    pub first_trading_date: String,
    /// The backend spells this field with the double "a"; the rename keeps
    /// drafts and create payloads wire-compatible.
    #[serde(rename = "lastTraadingDate")]
    pub last_trading_date: String,
    pub trading_currency: String,
    pub settlement_method: String,
    pub instrument_status: bool,
    pub tick_size: f64,
    pub tick_value: f64,
    pub contract_multiplier: f64,
}

/// Every record attribute, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Symbol,
    Description,
    Isin,
    ExpirationCode,
    ParentTicker,
    FullName,
    Segment,
    MaturityDate,
    DepositType,
    LotSize,
    InitialMarginAmount,
    PercentageMargin,
    UnderlyingType,
    UnderlyingId,
    FirstTradingDate,
    LastTradingDate,
    TradingCurrency,
    SettlementMethod,
    InstrumentStatus,
    TickSize,
    TickValue,
    ContractMultiplier,
}

/// Borrowed view of one field's current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Id(i64),
    Flag(bool),
}

/// Owned value for a single field write.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    Text(String),
    Number(f64),
    Id(i64),
    Flag(bool),
}

impl Field {
    pub const ALL: [Field; 22] = [
        Field::Symbol,
        Field::Description,
        Field::Isin,
        Field::ExpirationCode,
        Field::ParentTicker,
        Field::FullName,
        Field::Segment,
        Field::MaturityDate,
        Field::DepositType,
        Field::LotSize,
        Field::InitialMarginAmount,
        Field::PercentageMargin,
        Field::UnderlyingType,
        Field::UnderlyingId,
        Field::FirstTradingDate,
        Field::LastTradingDate,
        Field::TradingCurrency,
        Field::SettlementMethod,
        Field::InstrumentStatus,
        Field::TickSize,
        Field::TickValue,
        Field::ContractMultiplier,
    ];

    /// Wire name, also the key presentation layers use for error lookups.
    pub fn name(self) -> &'static str {
        match self {
            Field::Symbol => "symbol",
            Field::Description => "description",
            Field::Isin => "isin",
            Field::ExpirationCode => "expirationCode",
            Field::ParentTicker => "parentTicker",
            Field::FullName => "fullName",
            Field::Segment => "segment",
            Field::MaturityDate => "maturityDate",
            Field::DepositType => "depositType",
            Field::LotSize => "lotSize",
            Field::InitialMarginAmount => "initialMarginAmount",
            Field::PercentageMargin => "percentageMargin",
            Field::UnderlyingType => "underlyingType",
            Field::UnderlyingId => "underlyingId",
            Field::FirstTradingDate => "firstTradingDate",
            // Backend spelling, see `FutureRecord::last_trading_date`.
            Field::LastTradingDate => "lastTraadingDate",
            Field::TradingCurrency => "tradingCurrency",
            Field::SettlementMethod => "settlementMethod",
            Field::InstrumentStatus => "instrumentStatus",
            Field::TickSize => "tickSize",
            Field::TickValue => "tickValue",
            Field::ContractMultiplier => "contractMultiplier",
        }
    }

    /// Short human label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Field::Symbol => "Symbol",
            Field::Description => "Description",
            Field::Isin => "ISIN",
            Field::ExpirationCode => "Expiration code",
            Field::ParentTicker => "Parent ticker",
            Field::FullName => "Full name",
            Field::Segment => "Segment",
            Field::MaturityDate => "Maturity date",
            Field::DepositType => "Deposit type",
            Field::LotSize => "Lot size",
            Field::InitialMarginAmount => "Initial margin amount",
            Field::PercentageMargin => "Percentage margin",
            Field::UnderlyingType => "Underlying type",
            Field::UnderlyingId => "Underlying asset",
            Field::FirstTradingDate => "First trading date",
            Field::LastTradingDate => "Last trading date",
            Field::TradingCurrency => "Trading currency",
            Field::SettlementMethod => "Settlement method",
            Field::InstrumentStatus => "Status",
            Field::TickSize => "Tick size",
            Field::TickValue => "Tick value",
            Field::ContractMultiplier => "Contract multiplier",
        }
    }
}

impl FutureRecord {
    /// Typed view of one field.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Symbol => FieldValue::Text(&self.symbol),
            Field::Description => FieldValue::Text(&self.description),
            Field::Isin => FieldValue::Text(&self.isin),
            Field::ExpirationCode => FieldValue::Text(&self.expiration_code),
            Field::ParentTicker => FieldValue::Text(&self.parent_ticker),
            Field::FullName => FieldValue::Text(&self.full_name),
            Field::Segment => FieldValue::Text(&self.segment),
            Field::MaturityDate => FieldValue::Text(&self.maturity_date),
            Field::DepositType => FieldValue::Text(&self.deposit_type),
            Field::LotSize => FieldValue::Number(self.lot_size),
            Field::InitialMarginAmount => FieldValue::Number(self.initial_margin_amount),
            Field::PercentageMargin => FieldValue::Number(self.percentage_margin),
            Field::UnderlyingType => FieldValue::Text(&self.underlying_type),
            Field::UnderlyingId => FieldValue::Id(self.underlying_id),
            Field::FirstTradingDate => FieldValue::Text(&self.first_trading_date),
            Field::LastTradingDate => FieldValue::Text(&self.last_trading_date),
            Field::TradingCurrency => FieldValue::Text(&self.trading_currency),
            Field::SettlementMethod => FieldValue::Text(&self.settlement_method),
            Field::InstrumentStatus => FieldValue::Flag(self.instrument_status),
            Field::TickSize => FieldValue::Number(self.tick_size),
            Field::TickValue => FieldValue::Number(self.tick_value),
            Field::ContractMultiplier => FieldValue::Number(self.contract_multiplier),
        }
    }

    /// Write one field. Returns false when the write kind does not match
    /// the field (the record is left untouched).
    pub fn apply(&mut self, field: Field, write: &FieldWrite) -> bool {
        match (field, write) {
            (Field::Symbol, FieldWrite::Text(v)) => self.symbol = v.clone(),
            (Field::Description, FieldWrite::Text(v)) => self.description = v.clone(),
            (Field::Isin, FieldWrite::Text(v)) => self.isin = v.clone(),
            (Field::ExpirationCode, FieldWrite::Text(v)) => self.expiration_code = v.clone(),
            (Field::ParentTicker, FieldWrite::Text(v)) => self.parent_ticker = v.clone(),
            (Field::FullName, FieldWrite::Text(v)) => self.full_name = v.clone(),
            (Field::Segment, FieldWrite::Text(v)) => self.segment = v.clone(),
            (Field::MaturityDate, FieldWrite::Text(v)) => self.maturity_date = v.clone(),
            (Field::DepositType, FieldWrite::Text(v)) => self.deposit_type = v.clone(),
            (Field::LotSize, FieldWrite::Number(v)) => self.lot_size = *v,
            (Field::InitialMarginAmount, FieldWrite::Number(v)) => {
                self.initial_margin_amount = *v
            }
            (Field::PercentageMargin, FieldWrite::Number(v)) => self.percentage_margin = *v,
            (Field::UnderlyingType, FieldWrite::Text(v)) => self.underlying_type = v.clone(),
            (Field::UnderlyingId, FieldWrite::Id(v)) => self.underlying_id = *v,
            (Field::FirstTradingDate, FieldWrite::Text(v)) => self.first_trading_date = v.clone(),
            (Field::LastTradingDate, FieldWrite::Text(v)) => self.last_trading_date = v.clone(),
            (Field::TradingCurrency, FieldWrite::Text(v)) => self.trading_currency = v.clone(),
            (Field::SettlementMethod, FieldWrite::Text(v)) => self.settlement_method = v.clone(),
            (Field::InstrumentStatus, FieldWrite::Flag(v)) => self.instrument_status = *v,
            (Field::TickSize, FieldWrite::Number(v)) => self.tick_size = *v,
            (Field::TickValue, FieldWrite::Number(v)) => self.tick_value = *v,
            (Field::ContractMultiplier, FieldWrite::Number(v)) => self.contract_multiplier = *v,
            _ => return false,
        }
        true
    }
}
