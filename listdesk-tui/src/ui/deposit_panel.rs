//! Step 2 — deposit & underlyings: margin pair and asset selection.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use listdesk_core::record::{DEPOSIT_AMOUNT, DEPOSIT_RATE};

use crate::app::AppState;
use crate::theme;
use crate::ui::field_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "[j/k]field [h/l]cycle choices [Enter]edit [n]next [p]back",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for (i, &field) in app.visible_fields().iter().enumerate() {
        lines.push(field_line(app, field, i == app.field_cursor));
    }

    lines.push(Line::from(""));
    let hint = match app.session.form.record().deposit_type.as_str() {
        DEPOSIT_RATE => "RATE deposit: margin amount = lot size × percentage",
        DEPOSIT_AMOUNT => "AMOUNT deposit: percentage = margin amount ÷ lot size",
        _ => "Pick a deposit type to enable margin derivation",
    };
    lines.push(Line::from(Span::styled(format!(" {hint}"), theme::secondary())));

    if app.assets_loading {
        lines.push(Line::from(Span::styled(
            " Loading underlying assets...",
            theme::warning(),
        )));
    } else if !app.session.assets().is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                " {} asset(s) available for {}",
                app.session.assets().len(),
                app.session.form.record().underlying_type
            ),
            theme::muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
