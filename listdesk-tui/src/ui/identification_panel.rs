//! Step 1 — identification: symbol, ISIN, names, optional metadata.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::field_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "[j/k]field [Enter]edit [n]next step",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for (i, &field) in app.visible_fields().iter().enumerate() {
        lines.push(field_line(app, field, i == app.field_cursor));
    }

    f.render_widget(Paragraph::new(lines), area);
}
