//! Static step descriptors — the three ordered field groups of the wizard.

use crate::record::Field;

/// Which step is which, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Identification,
    Deposit,
    Trading,
}

pub const STEP_COUNT: usize = 3;
pub const LAST_STEP: usize = STEP_COUNT - 1;

impl StepId {
    pub fn index(self) -> usize {
        match self {
            StepId::Identification => 0,
            StepId::Deposit => 1,
            StepId::Trading => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(StepId::Identification),
            1 => Some(StepId::Deposit),
            2 => Some(StepId::Trading),
            _ => None,
        }
    }
}

/// One wizard step: its field list, the required subset, and the message
/// template used when a required field is missing.
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [Field],
    pub required: &'static [Field],
    messages: &'static [(Field, &'static str)],
}

impl StepSpec {
    /// Missing-field message: the step's template, or the generic fallback.
    pub fn required_message(&self, field: Field) -> String {
        self.messages
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| (*m).to_string())
            .unwrap_or_else(|| format!("{} is required", field.name()))
    }
}

/// The fixed, ordered step set. Never mutated at runtime.
pub static STEPS: [StepSpec; STEP_COUNT] = [
    StepSpec {
        id: StepId::Identification,
        title: "Instrument identification",
        description: "Basic information",
        fields: &[
            Field::Symbol,
            Field::Description,
            Field::Isin,
            Field::ExpirationCode,
            Field::ParentTicker,
            Field::FullName,
            Field::Segment,
            Field::MaturityDate,
        ],
        required: &[Field::Symbol, Field::Isin, Field::FullName],
        messages: &[
            (Field::Symbol, "a symbol is required to identify the instrument"),
            (Field::Isin, "the ISIN code is mandatory"),
            (Field::FullName, "the instrument's full name is required"),
        ],
    },
    StepSpec {
        id: StepId::Deposit,
        title: "Deposit & underlyings",
        description: "Margin configuration",
        fields: &[
            Field::DepositType,
            Field::LotSize,
            Field::InitialMarginAmount,
            Field::PercentageMargin,
            Field::UnderlyingType,
            Field::UnderlyingId,
        ],
        required: &[
            Field::DepositType,
            Field::LotSize,
            Field::UnderlyingType,
            Field::UnderlyingId,
        ],
        messages: &[
            (Field::DepositType, "please select the deposit type"),
            (Field::LotSize, "lot size must be greater than 0"),
            (Field::UnderlyingType, "please select the underlying type"),
            (Field::UnderlyingId, "please select an underlying asset"),
        ],
    },
    StepSpec {
        id: StepId::Trading,
        title: "Trading",
        description: "Trading parameters",
        fields: &[
            Field::FirstTradingDate,
            Field::LastTradingDate,
            Field::TradingCurrency,
            Field::TickSize,
            Field::TickValue,
            Field::ContractMultiplier,
            Field::SettlementMethod,
            Field::InstrumentStatus,
        ],
        required: &[
            Field::FirstTradingDate,
            Field::LastTradingDate,
            Field::TradingCurrency,
            Field::TickSize,
            Field::SettlementMethod,
        ],
        messages: &[
            (Field::FirstTradingDate, "the first trading date is required"),
            (Field::LastTradingDate, "the last trading date is required"),
            (Field::TradingCurrency, "the trading currency is mandatory"),
            (Field::TickSize, "tick size must be greater than 0"),
            (Field::SettlementMethod, "please select the settlement method"),
        ],
    },
];
