//! Overlays — welcome help, text-entry prompt, error history, submit result.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use listdesk_core::record::Field;

use crate::app::AppState;
use crate::input::key_bindings_help;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled("ListDesk", theme::accent_bold())),
        Line::from(Span::styled(
            "Draft a futures listing in three steps.",
            theme::secondary(),
        )),
        Line::from(""),
    ];
    for (keys, what) in key_bindings_help() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::accent()),
            Span::styled(what, theme::secondary()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to start",
        theme::muted(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true));
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_editing(f: &mut Frame, area: Rect, app: &AppState, field: Field) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", field.label()), theme::secondary()),
            Span::styled(app.edit_input.clone(), theme::accent()),
            Span::styled("▏", theme::accent()),
        ]),
        Line::from(Span::styled(
            "[Enter]apply [Esc]cancel",
            theme::muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Edit ");
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();
    if app.error_history.is_empty() {
        lines.push(Line::from(Span::styled("No errors so far", theme::muted())));
    }
    for record in app.error_history.iter().skip(app.error_scroll) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", record.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(record.message.clone(), theme::negative()),
            Span::styled(
                if record.context.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", record.context)
                },
                theme::secondary(),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Errors [j/k scroll, Esc close] ");
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_submit_result(f: &mut Frame, area: Rect, success: bool, detail: &str) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let (headline, style) = if success {
        ("Listing created", theme::positive())
    } else {
        ("Creation failed", theme::negative())
    };

    let lines = vec![
        Line::from(Span::styled(headline, style)),
        Line::from(Span::styled(detail.to_string(), theme::secondary())),
        Line::from(""),
        Line::from(Span::styled("[Enter] close", theme::muted())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true));
    f.render_widget(Paragraph::new(lines).block(block), popup);
}
