//! Step navigation — current index, completed set, and the gating rules.
//!
//! The navigator owns no form data; it reads the store to decide what is
//! allowed. Completed steps only ever grow; going back never un-completes.

use std::collections::BTreeSet;

use crate::form::FormState;
use crate::record::{Field, FieldValue};
use crate::steps::{StepSpec, LAST_STEP, STEPS, STEP_COUNT};

/// Structured validity report for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepValidation {
    pub is_valid: bool,
    pub missing_fields: Vec<Field>,
    pub error_messages: Vec<String>,
    pub can_proceed: bool,
}

/// Wizard position state machine over steps 0..=2.
#[derive(Debug, Default)]
pub struct Navigator {
    current: usize,
    completed: BTreeSet<usize>,
    just_arrived_on_last_step: bool,
}

/// A required field is satisfied by non-blank text, a positive number,
/// or any flag value.
fn required_field_satisfied(form: &FormState, field: Field) -> bool {
    match form.record().value(field) {
        FieldValue::Text(s) => !s.trim().is_empty(),
        FieldValue::Number(n) => n > 0.0,
        FieldValue::Id(id) => id > 0,
        FieldValue::Flag(_) => true,
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn just_arrived_on_last_step(&self) -> bool {
        self.just_arrived_on_last_step
    }

    pub fn current_spec(&self) -> &'static StepSpec {
        &STEPS[self.current]
    }

    /// True iff every required field of the step is satisfied.
    pub fn is_step_complete(&self, index: usize, form: &FormState) -> bool {
        let Some(step) = STEPS.get(index) else {
            return false;
        };
        step.required
            .iter()
            .all(|&field| required_field_satisfied(form, field))
    }

    /// Requirements-only report for a step: missing required fields and
    /// their templated messages. Used by step indicators.
    pub fn step_validation(&self, index: usize, form: &FormState) -> StepValidation {
        let Some(step) = STEPS.get(index) else {
            return StepValidation {
                is_valid: false,
                missing_fields: Vec::new(),
                error_messages: vec!["invalid step".to_string()],
                can_proceed: false,
            };
        };

        let mut missing_fields = Vec::new();
        let mut error_messages = Vec::new();
        for &field in step.required {
            if !required_field_satisfied(form, field) {
                missing_fields.push(field);
                error_messages.push(step.required_message(field));
            }
        }

        let is_valid = missing_fields.is_empty();
        StepValidation {
            is_valid,
            missing_fields,
            error_messages,
            can_proceed: is_valid,
        }
    }

    /// Report for the step the user is on. On top of the requirements
    /// check, stored error-map entries for the step's fields count
    /// against validity, so a flagged field blocks forward movement.
    pub fn current_step_validation(&self, form: &FormState) -> StepValidation {
        let step = &STEPS[self.current];
        let mut report = self.step_validation(self.current, form);

        for &field in step.fields {
            if let Some(message) = form.error(field) {
                report.error_messages.push(message.to_string());
            }
        }

        report.is_valid = report.missing_fields.is_empty() && report.error_messages.is_empty();
        report.can_proceed = report.is_valid;
        report
    }

    /// True iff any of the step's fields carries a stored error.
    pub fn has_step_errors(&self, form: &FormState) -> bool {
        STEPS[self.current]
            .fields
            .iter()
            .any(|&field| form.error(field).is_some())
    }

    /// Advance one step. Marks the current step completed. Fails without
    /// state change on the last step or when the current step is invalid.
    pub fn next_step(&mut self, form: &FormState) -> bool {
        if self.current >= LAST_STEP {
            return false;
        }
        if !self.current_step_validation(form).can_proceed {
            return false;
        }

        self.completed.insert(self.current);
        self.current += 1;
        self.just_arrived_on_last_step = self.current == LAST_STEP;
        true
    }

    /// Go back one step. Never un-marks completed steps.
    pub fn prev_step(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.just_arrived_on_last_step = false;
        true
    }

    /// Jump to a step. Backward jumps are always allowed; forward jumps
    /// require the step right before the target to be completed, so
    /// steps cannot be skipped.
    pub fn go_to_step(&mut self, target: usize) -> bool {
        if target >= STEP_COUNT {
            return false;
        }
        if target > self.current && !self.completed.contains(&(target - 1)) {
            return false;
        }
        self.current = target;
        self.just_arrived_on_last_step = target == LAST_STEP;
        true
    }

    /// Submission gate: on the last step, every earlier step completed,
    /// and the last step itself validates.
    pub fn is_ready_for_submission(&self, form: &FormState) -> bool {
        if self.current != LAST_STEP {
            return false;
        }
        if !(0..LAST_STEP).all(|i| self.completed.contains(&i)) {
            return false;
        }
        self.current_step_validation(form).can_proceed
    }

    /// Restore a persisted position. Out-of-range indices are clamped to
    /// the valid range.
    pub fn restore(current: usize, completed: impl IntoIterator<Item = usize>) -> Self {
        Self {
            current: current.min(LAST_STEP),
            completed: completed.into_iter().filter(|&i| i < STEP_COUNT).collect(),
            just_arrived_on_last_step: false,
        }
    }
}
