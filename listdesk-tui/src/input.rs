//! Keyboard input dispatch — overlays first, then global keys, then the
//! field cursor of the step the user is on.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use listdesk_core::calc::{self, EditMode};
use listdesk_core::record::{Field, FieldValue, FieldWrite};
use listdesk_core::steps::LAST_STEP;
use listdesk_core::AssetDirective;

use crate::app::{AppState, FieldControl, Overlay};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay.clone() {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Editing(field) => {
            handle_editing_overlay(app, field, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::SubmitResult { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('1') => {
            jump_to_step(app, 0);
            return;
        }
        KeyCode::Char('2') => {
            jump_to_step(app, 1);
            return;
        }
        KeyCode::Char('3') => {
            jump_to_step(app, 2);
            return;
        }
        KeyCode::Char('n') | KeyCode::Char(']') => {
            try_next_step(app);
            return;
        }
        KeyCode::Char('p') | KeyCode::Char('[') => {
            if app.session.nav.prev_step() {
                app.field_cursor = 0;
            }
            return;
        }
        KeyCode::Char('D') => {
            app.session.discard();
            app.field_cursor = 0;
            app.set_warning("Draft discarded");
            return;
        }
        _ => {}
    }

    // 3. Step-local keys.
    handle_step_key(app, key);
}

fn handle_editing_overlay(app: &mut AppState, field: Field, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.edit_input.clear();
        }
        KeyCode::Enter => {
            commit_edit(app, field);
            app.overlay = Overlay::None;
            app.edit_input.clear();
        }
        KeyCode::Backspace => {
            app.edit_input.pop();
        }
        KeyCode::Char(c) => {
            app.edit_input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_step_key(app: &mut AppState, key: KeyEvent) {
    let field_count = app.visible_fields().len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.field_cursor + 1 < field_count {
                app.field_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.field_cursor = app.field_cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            cycle_choice(app, -1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            cycle_choice(app, 1);
        }
        KeyCode::Char('m') => {
            let mode = match app.session.form.edit_mode() {
                EditMode::TickValue => EditMode::ContractMultiplier,
                EditMode::ContractMultiplier => EditMode::TickValue,
            };
            app.session.form.change_edit_mode(mode);
            app.set_status(match mode {
                EditMode::TickValue => "Editing tick value, multiplier is derived",
                EditMode::ContractMultiplier => "Editing multiplier, tick value is derived",
            });
        }
        KeyCode::Char('s') => {
            if app.session.nav.current_step() == LAST_STEP {
                try_submit(app);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let field = app.selected_field();
            match app.control_for(field) {
                FieldControl::TextEntry => {
                    if key.code == KeyCode::Enter {
                        app.edit_input = edit_seed(app, field);
                        app.overlay = Overlay::Editing(field);
                    }
                }
                FieldControl::Toggle => {
                    let listed = app.session.form.record().instrument_status;
                    app.session
                        .form
                        .update_field(field, FieldWrite::Flag(!listed));
                }
                FieldControl::Choice => cycle_choice(app, 1),
                FieldControl::Derived => {
                    app.set_warning("This value is derived; edit its counterpart");
                }
            }
        }
        _ => {}
    }
}

/// Navigate forward with the same feedback the step gate produces.
fn try_next_step(app: &mut AppState) {
    let validation = app.session.nav.current_step_validation(&app.session.form);
    if !validation.can_proceed {
        if !validation.missing_fields.is_empty() {
            app.set_warning(format!(
                "Step incomplete: {} required field(s) missing",
                validation.missing_fields.len()
            ));
        } else if let Some(first) = validation.error_messages.first() {
            app.set_warning(format!("Validation error: {first}"));
        } else {
            app.set_warning("Complete this step before continuing");
        }
        return;
    }

    if app.session.nav.next_step(&app.session.form) {
        app.field_cursor = 0;
        let spec = app.session.nav.current_spec();
        app.set_status(format!(
            "Step {}: {}",
            app.session.nav.current_step() + 1,
            spec.title
        ));
    }
}

fn jump_to_step(app: &mut AppState, target: usize) {
    if app.session.nav.go_to_step(target) {
        app.field_cursor = 0;
    } else {
        app.set_warning("Cannot jump to that step yet");
    }
}

fn try_submit(app: &mut AppState) {
    match app.session.begin_submission() {
        Ok(record) => {
            let _ = app.worker_tx.send(WorkerCommand::CreateFuture {
                record: Box::new(record),
            });
            app.set_status("Submitting listing...");
        }
        Err(blocked) => {
            app.set_warning(blocked.to_string());
        }
    }
}

/// Cycle a choice field through its server-provided options.
fn cycle_choice(app: &mut AppState, direction: i32) {
    let field = app.selected_field();
    if app.control_for(field) != FieldControl::Choice {
        return;
    }

    match field {
        Field::DepositType => {
            let options = app.session.enumerations().deposit_types.clone();
            if options.is_empty() {
                app.set_warning("Reference data not loaded yet");
                return;
            }
            let current = app.session.form.record().deposit_type.clone();
            let next = next_option(&options, &current, direction).to_string();
            app.session.form.handle_deposit_type_change(&next);
        }
        Field::SettlementMethod => {
            let options = app.session.enumerations().settlement_methods.clone();
            if options.is_empty() {
                app.set_warning("Reference data not loaded yet");
                return;
            }
            let current = app.session.form.record().settlement_method.clone();
            let next = next_option(&options, &current, direction).to_string();
            app.session
                .form
                .update_field(field, FieldWrite::Text(next));
        }
        Field::UnderlyingType => {
            let options = app.session.enumerations().underlying_types.clone();
            if options.is_empty() {
                app.set_warning("Reference data not loaded yet");
                return;
            }
            let current = app.session.form.record().underlying_type.clone();
            let next = next_option(&options, &current, direction).to_string();
            match app.session.set_underlying_type(&next) {
                AssetDirective::Fetch {
                    underlying_type,
                    token,
                } => {
                    app.assets_loading = true;
                    let _ = app.worker_tx.send(WorkerCommand::FetchAssets {
                        underlying_type,
                        token,
                    });
                    app.set_status("Loading underlying assets...");
                }
                AssetDirective::Clear => {
                    app.assets_loading = false;
                }
            }
        }
        Field::UnderlyingId => {
            if app.session.assets().is_empty() {
                app.set_warning(if app.assets_loading {
                    "Assets are still loading"
                } else {
                    "Select an underlying type first"
                });
                return;
            }
            let current = app.session.form.record().underlying_id;
            let next = {
                let assets = app.session.assets();
                match assets.iter().position(|a| a.id == current) {
                    Some(i) => {
                        let len = assets.len() as i64;
                        assets[(i as i64 + direction as i64).rem_euclid(len) as usize].id
                    }
                    None if direction >= 0 => assets[0].id,
                    None => assets[assets.len() - 1].id,
                }
            };
            app.session
                .form
                .update_field(field, FieldWrite::Id(next));
        }
        _ => {}
    }
}

fn next_option<'a>(options: &'a [String], current: &str, direction: i32) -> &'a str {
    match options.iter().position(|o| o == current) {
        Some(i) => {
            let len = options.len() as i64;
            &options[(i as i64 + direction as i64).rem_euclid(len) as usize]
        }
        None if direction >= 0 => &options[0],
        None => &options[options.len() - 1],
    }
}

/// Text the editing prompt opens with: raw buffers where they exist,
/// current values elsewhere.
fn edit_seed(app: &AppState, field: Field) -> String {
    let form = &app.session.form;
    match field {
        Field::TickSize => form.buffers().tick_size.clone(),
        Field::PercentageMargin => form.buffers().percentage_margin.clone(),
        Field::InitialMarginAmount => form.buffers().initial_margin_amount.clone(),
        Field::TickValue => positive_text(form.record().tick_value),
        Field::ContractMultiplier => positive_text(form.record().contract_multiplier),
        Field::LotSize => positive_text(form.record().lot_size),
        _ => match form.record().value(field) {
            FieldValue::Text(s) => s.to_string(),
            _ => String::new(),
        },
    }
}

fn positive_text(value: f64) -> String {
    if value > 0.0 {
        value.to_string()
    } else {
        String::new()
    }
}

/// Route a committed edit to the matching store operation.
fn commit_edit(app: &mut AppState, field: Field) {
    let text = app.edit_input.clone();
    let form = &mut app.session.form;
    match field {
        Field::TickSize => form.handle_tick_size_change(&text),
        Field::PercentageMargin => form.handle_percentage_margin_change(&text),
        Field::InitialMarginAmount => form.handle_initial_margin_amount_change(&text),
        Field::TickValue => form.handle_tick_value_change(calc::parse_amount(&text)),
        Field::ContractMultiplier => {
            form.handle_contract_multiplier_change(calc::parse_amount(&text))
        }
        Field::LotSize => form.handle_lot_size_change(calc::parse_amount(&text)),
        _ => form.update_field(field, FieldWrite::Text(text)),
    }
}

/// Key bindings shown on the welcome overlay.
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q", "Quit (draft is saved)"),
        ("j/k", "Move between fields"),
        ("Enter", "Edit field / toggle status"),
        ("h/l", "Cycle choice fields"),
        ("m", "Swap tick value / multiplier editing"),
        ("n or ]", "Next step"),
        ("p or [", "Previous step"),
        ("1-3", "Jump to step"),
        ("s", "Submit (last step)"),
        ("e", "Error history"),
        ("D", "Discard draft"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{loaded_test_app, new_test_app};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn quit_on_q() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn welcome_overlay_swallows_the_first_key() {
        let mut app = new_test_app();
        assert_eq!(app.overlay, Overlay::Welcome);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn cursor_moves_within_the_step() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.field_cursor, 2);
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.field_cursor, 1);
    }

    #[test]
    fn editing_a_text_field_commits_through_the_store() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;

        // Cursor starts on Symbol; Enter opens the prompt.
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.overlay, Overlay::Editing(Field::Symbol));

        for c in "FESX".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.session.form.record().symbol, "FESX");
    }

    #[test]
    fn escape_cancels_an_edit() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Enter));
        handle_key(&mut app, press(KeyCode::Char('X')));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.session.form.record().symbol.is_empty());
    }

    #[test]
    fn choice_fields_cycle_server_options() {
        let mut app = loaded_test_app();
        app.overlay = Overlay::None;
        // Move to step 1 is gated; set it up through the store.
        app.session
            .form
            .update_field(Field::Symbol, FieldWrite::Text("FESX".into()));
        app.session
            .form
            .update_field(Field::Isin, FieldWrite::Text("FR0000000000".into()));
        app.session
            .form
            .update_field(Field::FullName, FieldWrite::Text("Euro Stoxx 50".into()));
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.session.nav.current_step(), 1);

        // Cursor lands on DepositType; cycle to the first option.
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.session.form.record().deposit_type, "AMOUNT");
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.session.form.record().deposit_type, "RATE");
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.session.form.record().deposit_type, "AMOUNT");
    }

    #[test]
    fn underlying_type_cycle_issues_a_fetch() {
        let mut app = loaded_test_app();
        app.overlay = Overlay::None;
        app.session.nav.go_to_step(0);

        // Jump straight onto the deposit step through the store.
        app.session
            .form
            .update_field(Field::Symbol, FieldWrite::Text("FESX".into()));
        app.session
            .form
            .update_field(Field::Isin, FieldWrite::Text("FR0000000000".into()));
        app.session
            .form
            .update_field(Field::FullName, FieldWrite::Text("Euro Stoxx 50".into()));
        handle_key(&mut app, press(KeyCode::Char('n')));

        // Move cursor to UnderlyingType (row 4 of the deposit step).
        app.field_cursor = 4;
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert!(app.assets_loading);
        assert_eq!(app.session.form.record().underlying_type, "INDEX");
        assert_eq!(app.session.form.record().underlying_id, 0);

        match app.worker_rx.try_recv() {
            Err(_) => {} // command went to the worker channel, not here
            Ok(resp) => panic!("unexpected response: {resp:?}"),
        }
    }

    #[test]
    fn next_step_feedback_when_incomplete() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.session.nav.current_step(), 0);
        let (msg, _) = app.status_message.clone().expect("warning set");
        assert!(msg.contains("required field(s) missing"));
    }

    #[test]
    fn edit_mode_toggle_reports_itself() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(
            app.session.form.edit_mode(),
            EditMode::ContractMultiplier
        );
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(app.session.form.edit_mode(), EditMode::TickValue);
    }

    #[test]
    fn submit_away_from_last_step_does_nothing() {
        let mut app = new_test_app();
        app.overlay = Overlay::None;
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(!app.session.form.is_submitting());
    }
}
