//! Stepper header — the three steps with completion and validity marks.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use listdesk_core::steps::STEPS;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let current = app.session.nav.current_step();

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, step) in STEPS.iter().enumerate() {
        let completed = app.session.nav.is_completed(i);
        let valid = app
            .session
            .nav
            .step_validation(i, &app.session.form)
            .is_valid;

        let marker = if completed {
            "✓"
        } else if valid {
            "●"
        } else {
            "○"
        };

        let style = if i == current {
            theme::accent_bold()
        } else if completed {
            theme::positive()
        } else {
            theme::muted()
        };

        spans.push(Span::styled(
            format!("{marker} {}. {}", i + 1, step.title),
            style,
        ));
        if i + 1 < STEPS.len() {
            spans.push(Span::styled("  ─  ", theme::muted()));
        }
    }

    let description = Line::from(vec![Span::styled(
        format!(" {}", STEPS[current].description),
        theme::secondary(),
    )]);

    let para = Paragraph::new(vec![Line::from(spans), description]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::muted()),
    );
    f.render_widget(para, area);
}
