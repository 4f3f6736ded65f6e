//! Step 3 — trading: dates, currency, the tick triangle, settlement.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use listdesk_core::EditMode;

use crate::app::AppState;
use crate::theme;
use crate::ui::field_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "[j/k]field [Enter]edit [m]swap tick side [s]submit [p]back",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for (i, &field) in app.visible_fields().iter().enumerate() {
        lines.push(field_line(app, field, i == app.field_cursor));
    }

    lines.push(Line::from(""));
    let mode = match app.session.form.edit_mode() {
        EditMode::TickValue => "tick value drives the multiplier",
        EditMode::ContractMultiplier => "multiplier drives the tick value",
    };
    lines.push(Line::from(vec![
        Span::styled(" Mode: ", theme::muted()),
        Span::styled(mode, theme::accent()),
    ]));

    if app.session.form.is_submitting() {
        lines.push(Line::from(Span::styled(
            " Submitting listing...",
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
