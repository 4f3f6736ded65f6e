//! Bottom status bar — key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " [1-3]step [n]ext [p]rev [s]ubmit [e]rrors [q]uit",
        theme::muted(),
    ));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.clone(), style));
    } else if app.enums_loading {
        spans.push(Span::styled("Loading reference data...", theme::warning()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
