//! Form state store — single owner of the record, the error map, and the
//! text-entry shadows.
//!
//! Every mutation goes through an explicit update operation that re-runs
//! the affected validation and derived-value recomputation before it
//! returns, so "state changed ⇒ error map reflects it" holds without any
//! reactive machinery. Presentation layers read through the accessors and
//! never touch the record directly.

use std::collections::BTreeMap;

use crate::calc::{self, DepositUpdate, EditMode};
use crate::record::{Field, FieldWrite, FutureRecord};
use crate::validate;

/// Raw text shadows for the numeric fields that accept free typing.
/// Partial input like `"12."` stays visible here until the parsed value
/// actually moves the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffers {
    pub tick_size: String,
    pub percentage_margin: String,
    pub initial_margin_amount: String,
}

/// The wizard's mutable form state.
#[derive(Debug, Default)]
pub struct FormState {
    record: FutureRecord,
    errors: BTreeMap<Field, String>,
    is_submitting: bool,
    edit_mode: EditMode,
    buffers: TextBuffers,
    local_tick_value: f64,
    local_contract_multiplier: f64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &FutureRecord {
        &self.record
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn buffers(&self) -> &TextBuffers {
        &self.buffers
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn local_tick_value(&self) -> f64 {
        self.local_tick_value
    }

    pub fn local_contract_multiplier(&self) -> f64 {
        self.local_contract_multiplier
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    /// Discard everything and return to the pristine wizard.
    pub fn reset(&mut self) {
        *self = FormState::default();
    }

    /// Rebuild form state around a previously saved record, re-rendering
    /// the text buffers and local inputs from its values. Used for draft
    /// restore; the error map starts clean and fills in as the user edits.
    pub fn restore(record: FutureRecord, edit_mode: EditMode) -> Self {
        let buffers = TextBuffers {
            tick_size: render_amount(record.tick_size),
            percentage_margin: render_amount(record.percentage_margin),
            initial_margin_amount: render_amount(record.initial_margin_amount),
        };
        Self {
            local_tick_value: record.tick_value,
            local_contract_multiplier: record.contract_multiplier,
            record,
            errors: BTreeMap::new(),
            is_submitting: false,
            edit_mode,
            buffers,
        }
    }

    /// Write one field, refresh its error entry, and re-run the
    /// date-ordering rule when a trading date was edited and the other
    /// date is already populated. Exactly one record field changes.
    pub fn update_field(&mut self, field: Field, write: FieldWrite) {
        let prev = self.numeric_snapshot();
        if !self.record.apply(field, &write) {
            return;
        }
        self.refresh_field_error(field);
        if matches!(field, Field::FirstTradingDate | Field::LastTradingDate) {
            self.refresh_date_ordering();
        }
        self.sync_buffers(prev);
    }

    /// Apply a batch of writes as one state transition: stale error
    /// entries for every written field are cleared, then the ordering
    /// rule is re-evaluated if a trading date was in the batch. Derived
    /// calculations use this so an edit and its computed sibling land
    /// together, never as two observable half-states.
    pub fn update_fields(&mut self, writes: &[(Field, FieldWrite)]) {
        let prev = self.numeric_snapshot();
        let mut touched_dates = false;
        for (field, write) in writes {
            if self.record.apply(*field, write) {
                self.errors.remove(field);
                touched_dates |=
                    matches!(*field, Field::FirstTradingDate | Field::LastTradingDate);
            }
        }
        if touched_dates {
            self.refresh_date_ordering();
        }
        self.sync_buffers(prev);
    }

    /// Raw tick-size text changed. A positive parse recomputes the tick
    /// pair for the current edit mode; anything else zeroes the triangle.
    pub fn handle_tick_size_change(&mut self, text: &str) {
        self.buffers.tick_size = text.to_string();
        let tick_size = calc::parse_amount(text);

        if tick_size > 0.0 {
            let pair = calc::recompute_tick_pair(
                tick_size,
                self.edit_mode,
                self.local_tick_value,
                self.local_contract_multiplier,
            );
            self.update_fields(&[
                (Field::TickSize, FieldWrite::Number(tick_size)),
                (Field::TickValue, FieldWrite::Number(pair.tick_value)),
                (
                    Field::ContractMultiplier,
                    FieldWrite::Number(pair.contract_multiplier),
                ),
            ]);
        } else {
            self.update_fields(&[
                (Field::TickSize, FieldWrite::Number(0.0)),
                (Field::TickValue, FieldWrite::Number(0.0)),
                (Field::ContractMultiplier, FieldWrite::Number(0.0)),
            ]);
        }
    }

    /// User-driven tick value. Applies once tick size is usable.
    pub fn handle_tick_value_change(&mut self, value: f64) {
        self.local_tick_value = value;
        if self.record.tick_size > 0.0 {
            let pair = calc::recompute_tick_pair(
                self.record.tick_size,
                EditMode::TickValue,
                value,
                self.local_contract_multiplier,
            );
            self.update_fields(&[
                (Field::TickValue, FieldWrite::Number(pair.tick_value)),
                (
                    Field::ContractMultiplier,
                    FieldWrite::Number(pair.contract_multiplier),
                ),
            ]);
        }
    }

    /// User-driven contract multiplier. Applies once tick size is usable.
    pub fn handle_contract_multiplier_change(&mut self, value: f64) {
        self.local_contract_multiplier = value;
        if self.record.tick_size > 0.0 {
            let pair = calc::recompute_tick_pair(
                self.record.tick_size,
                EditMode::ContractMultiplier,
                self.local_tick_value,
                value,
            );
            self.update_fields(&[
                (Field::TickValue, FieldWrite::Number(pair.tick_value)),
                (
                    Field::ContractMultiplier,
                    FieldWrite::Number(pair.contract_multiplier),
                ),
            ]);
        }
    }

    /// Raw percentage-margin text changed; derives the margin amount when
    /// both the parsed value and the lot size are usable.
    pub fn handle_percentage_margin_change(&mut self, text: &str) {
        self.buffers.percentage_margin = text.to_string();
        let pct = calc::parse_amount(text);

        if pct > 0.0 && self.record.lot_size > 0.0 {
            let amount = calc::initial_margin_amount(self.record.lot_size, pct);
            self.update_fields(&[
                (Field::PercentageMargin, FieldWrite::Number(pct)),
                (Field::InitialMarginAmount, FieldWrite::Number(amount)),
            ]);
        }
    }

    /// Raw margin-amount text changed; derives the percentage when both
    /// the parsed value and the lot size are usable.
    pub fn handle_initial_margin_amount_change(&mut self, text: &str) {
        self.buffers.initial_margin_amount = text.to_string();
        let amount = calc::parse_amount(text);

        if amount > 0.0 && self.record.lot_size > 0.0 {
            let pct = calc::percentage_margin(self.record.lot_size, amount);
            self.update_fields(&[
                (Field::InitialMarginAmount, FieldWrite::Number(amount)),
                (Field::PercentageMargin, FieldWrite::Number(pct)),
            ]);
        }
    }

    /// Lot size changed; re-derives the deposit pair when a deposit type
    /// is selected.
    pub fn handle_lot_size_change(&mut self, value: f64) {
        self.update_field(Field::LotSize, FieldWrite::Number(value));

        if value > 0.0 && !self.record.deposit_type.is_empty() {
            let update = calc::recompute_deposit_pair(
                &self.record.deposit_type,
                value,
                self.record.percentage_margin,
                self.record.initial_margin_amount,
            );
            self.apply_deposit_update(update);
        }
    }

    /// Deposit type changed; re-derives the deposit pair when lot size is
    /// usable.
    pub fn handle_deposit_type_change(&mut self, value: &str) {
        self.update_field(Field::DepositType, FieldWrite::Text(value.to_string()));

        if !value.is_empty() && self.record.lot_size > 0.0 {
            let update = calc::recompute_deposit_pair(
                value,
                self.record.lot_size,
                self.record.percentage_margin,
                self.record.initial_margin_amount,
            );
            self.apply_deposit_update(update);
        }
    }

    /// Underlying type changed. Asset lists are keyed by type, so the
    /// previous selection is invalid: underlyingId resets to 0 in the
    /// same transition, and both fields re-validate.
    pub fn handle_underlying_type_change(&mut self, value: &str) {
        self.record.underlying_type = value.to_string();
        self.record.underlying_id = 0;
        self.refresh_field_error(Field::UnderlyingType);
        self.refresh_field_error(Field::UnderlyingId);
    }

    /// Switch which side of the tick pair the user drives. Does not
    /// recompute anything by itself.
    pub fn change_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    /// Whole-record validation; replaces the error map. True when clean.
    pub fn validate_entire_form(&mut self) -> bool {
        self.errors = validate::validate_record(&self.record);
        self.errors.is_empty()
    }

    fn apply_deposit_update(&mut self, update: Option<DepositUpdate>) {
        match update {
            Some(DepositUpdate::InitialMarginAmount(v)) => {
                self.update_fields(&[(Field::InitialMarginAmount, FieldWrite::Number(v))]);
            }
            Some(DepositUpdate::PercentageMargin(v)) => {
                self.update_fields(&[(Field::PercentageMargin, FieldWrite::Number(v))]);
            }
            None => {}
        }
    }

    fn refresh_field_error(&mut self, field: Field) {
        match validate::validate_field(field, &self.record) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Attach or clear the ordering error on the last trading date.
    /// Only runs once both dates are populated.
    fn refresh_date_ordering(&mut self) {
        if self.record.first_trading_date.is_empty() || self.record.last_trading_date.is_empty() {
            return;
        }
        match validate::validate_trading_dates(
            &self.record.first_trading_date,
            &self.record.last_trading_date,
        ) {
            Some(message) => {
                self.errors.insert(Field::LastTradingDate, message);
            }
            None => {
                self.errors.remove(&Field::LastTradingDate);
            }
        }
    }

    fn numeric_snapshot(&self) -> [f64; 3] {
        [
            self.record.tick_size,
            self.record.percentage_margin,
            self.record.initial_margin_amount,
        ]
    }

    /// Re-render a buffer only when its backing value moved; a keystroke
    /// that parses to the already-stored value keeps its raw text.
    fn sync_buffers(&mut self, prev: [f64; 3]) {
        let now = self.numeric_snapshot();
        if now[0] != prev[0] {
            self.buffers.tick_size = render_amount(now[0]);
        }
        if now[1] != prev[1] {
            self.buffers.percentage_margin = render_amount(now[1]);
        }
        if now[2] != prev[2] {
            self.buffers.initial_margin_amount = render_amount(now[2]);
        }
    }
}

/// Zero or unset renders empty; positive renders as canonical text.
fn render_amount(value: f64) -> String {
    if value > 0.0 {
        value.to_string()
    } else {
        String::new()
    }
}
