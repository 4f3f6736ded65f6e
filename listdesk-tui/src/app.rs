//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The wizard session is the source of truth
//! for form and navigation; everything else is presentation bookkeeping.
//! Network calls run on the worker thread and come back via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use listdesk_core::record::{Field, DEPOSIT_AMOUNT, DEPOSIT_RATE};
use listdesk_core::{EditMode, WizardSession};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// How a field is operated from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    /// Free text (or numeric text) entered through the editing prompt.
    TextEntry,
    /// Cycles through a server-provided list with h/l.
    Choice,
    /// Flips with Enter/Space.
    Toggle,
    /// Derived by the calculation engine; display only.
    Derived,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Welcome,
    /// Text entry prompt for one field; the buffer lives in `edit_input`.
    Editing(Field),
    ErrorHistory,
    SubmitResult { success: bool, detail: String },
}

/// Top-level application state.
pub struct AppState {
    pub session: WizardSession,
    pub running: bool,

    /// Cursor into the current step's field list.
    pub field_cursor: usize,
    /// Buffer behind the editing prompt overlay.
    pub edit_input: String,
    pub overlay: Overlay,

    // Reference-data loading flags
    pub enums_loading: bool,
    pub assets_loading: bool,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    /// Where the draft is persisted across restarts.
    pub draft_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        draft_path: PathBuf,
    ) -> Self {
        Self {
            session: WizardSession::new(),
            running: true,
            field_cursor: 0,
            edit_input: String::new(),
            overlay: Overlay::Welcome,
            enums_loading: false,
            assets_loading: false,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            draft_path,
        }
    }

    /// Field list of the step the user is on.
    pub fn visible_fields(&self) -> &'static [Field] {
        self.session.nav.current_spec().fields
    }

    /// The field under the cursor.
    pub fn selected_field(&self) -> Field {
        let fields = self.visible_fields();
        fields[self.field_cursor.min(fields.len() - 1)]
    }

    /// Keep the cursor inside the current step after navigation.
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_fields().len();
        if self.field_cursor >= count {
            self.field_cursor = count - 1;
        }
    }

    /// How the given field is operated right now. The derived half of
    /// each bidirectional pair is display-only.
    pub fn control_for(&self, field: Field) -> FieldControl {
        let record = self.session.form.record();
        match field {
            Field::DepositType
            | Field::UnderlyingType
            | Field::UnderlyingId
            | Field::SettlementMethod => FieldControl::Choice,
            Field::InstrumentStatus => FieldControl::Toggle,
            Field::PercentageMargin if record.deposit_type == DEPOSIT_AMOUNT => {
                FieldControl::Derived
            }
            Field::InitialMarginAmount if record.deposit_type == DEPOSIT_RATE => {
                FieldControl::Derived
            }
            Field::TickValue
                if self.session.form.edit_mode() == EditMode::ContractMultiplier =>
            {
                FieldControl::Derived
            }
            Field::ContractMultiplier
                if self.session.form.edit_mode() == EditMode::TickValue =>
            {
                FieldControl::Derived
            }
            _ => FieldControl::TextEntry,
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::new_test_app;

    #[test]
    fn cursor_clamps_when_the_step_shrinks() {
        let mut app = new_test_app();
        app.field_cursor = 7; // last row of step 0 (8 fields)
        app.clamp_cursor();
        assert_eq!(app.field_cursor, 7);

        app.field_cursor = 99;
        app.clamp_cursor();
        assert_eq!(app.field_cursor, 7);
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = new_test_app();
        for i in 0..60 {
            app.push_error(format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn derived_side_follows_the_deposit_tag() {
        let mut app = new_test_app();
        app.session.form.handle_deposit_type_change("RATE");
        assert_eq!(
            app.control_for(Field::InitialMarginAmount),
            FieldControl::Derived
        );
        assert_eq!(
            app.control_for(Field::PercentageMargin),
            FieldControl::TextEntry
        );

        app.session.form.handle_deposit_type_change("AMOUNT");
        assert_eq!(
            app.control_for(Field::PercentageMargin),
            FieldControl::Derived
        );
        assert_eq!(
            app.control_for(Field::InitialMarginAmount),
            FieldControl::TextEntry
        );
    }

    #[test]
    fn derived_side_follows_the_edit_mode() {
        let mut app = new_test_app();
        // Default edit mode drives the tick value.
        assert_eq!(app.control_for(Field::TickValue), FieldControl::TextEntry);
        assert_eq!(
            app.control_for(Field::ContractMultiplier),
            FieldControl::Derived
        );

        app.session.form.change_edit_mode(EditMode::ContractMultiplier);
        assert_eq!(app.control_for(Field::TickValue), FieldControl::Derived);
        assert_eq!(
            app.control_for(Field::ContractMultiplier),
            FieldControl::TextEntry
        );
    }

    #[test]
    fn selected_field_tracks_the_cursor() {
        let mut app = new_test_app();
        assert_eq!(app.selected_field(), Field::Symbol);
        app.field_cursor = 2;
        assert_eq!(app.selected_field(), Field::Isin);
    }
}
