//! Top-level UI layout — stepper header, the active step's field list,
//! status bar, and overlays.

pub mod deposit_panel;
pub mod identification_panel;
pub mod overlays;
pub mod status_bar;
pub mod stepper;
pub mod trading_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use listdesk_core::record::{Field, FieldValue};

use crate::app::{AppState, FieldControl, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    stepper::render(f, chunks[0], app);
    draw_step_panel(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, chunks[1]),
        Overlay::Editing(field) => overlays::render_editing(f, chunks[1], app, *field),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::SubmitResult { success, detail } => {
            overlays::render_submit_result(f, chunks[1], *success, detail)
        }
        Overlay::None => {}
    }
}

fn draw_step_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let spec = app.session.nav.current_spec();
    let step = app.session.nav.current_step();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}/3] ", spec.title, step + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match step {
        0 => identification_panel::render(f, inner, app),
        1 => deposit_panel::render(f, inner, app),
        _ => trading_panel::render(f, inner, app),
    }
}

/// One field row: label, value, error annotation from the error map.
pub(crate) fn field_line(app: &AppState, field: Field, selected: bool) -> Line<'static> {
    let label_style = if selected {
        theme::selected()
    } else {
        theme::secondary()
    };

    let control = app.control_for(field);
    let value_style = match control {
        FieldControl::Derived => theme::neutral(),
        _ if selected => theme::accent(),
        _ => theme::muted(),
    };

    let mut spans = vec![
        Span::styled(format!(" {:<22}", field.label()), label_style),
        Span::styled(value_text(app, field), value_style),
    ];

    if control == FieldControl::Derived {
        spans.push(Span::styled("  (derived)", theme::neutral()));
    }

    if let Some(error) = app.session.form.error(field) {
        spans.push(Span::styled(format!("  ◂ {error}"), theme::negative()));
    }

    Line::from(spans)
}

/// Display text for a field's current value.
pub(crate) fn value_text(app: &AppState, field: Field) -> String {
    let form = &app.session.form;
    let record = form.record();

    match field {
        Field::TickSize => form.buffers().tick_size.clone(),
        Field::PercentageMargin => form.buffers().percentage_margin.clone(),
        Field::InitialMarginAmount => form.buffers().initial_margin_amount.clone(),
        Field::TickValue => positive_text(record.tick_value),
        Field::ContractMultiplier => positive_text(record.contract_multiplier),
        Field::LotSize => positive_text(record.lot_size),
        Field::UnderlyingId => {
            let selection = app
                .session
                .assets()
                .iter()
                .find(|a| a.id == record.underlying_id)
                .map(|a| a.identifier.clone());
            match selection {
                Some(identifier) => format!("< {identifier} >"),
                None if app.assets_loading => "< loading... >".to_string(),
                None => "< select >".to_string(),
            }
        }
        Field::DepositType | Field::UnderlyingType | Field::SettlementMethod => {
            match record.value(field) {
                FieldValue::Text(s) if !s.is_empty() => format!("< {s} >"),
                _ => "< select >".to_string(),
            }
        }
        Field::InstrumentStatus => {
            if record.instrument_status {
                "listed".to_string()
            } else {
                "unlisted".to_string()
            }
        }
        _ => match record.value(field) {
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

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
