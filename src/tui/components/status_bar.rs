//! Status line under the header: fetch state, date range, and errors.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, FetchState};

/// Renders the one-line status summary.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let fetch_span = match app.fetch_state {
        FetchState::Idle => Span::styled(" Idle ", Style::default().fg(Color::DarkGray)),
        FetchState::Loading => Span::styled(" Loading... ", Style::default().fg(Color::Yellow)),
        FetchState::Loaded => Span::styled(
            format!(" {} days ", app.candles.len()),
            Style::default().fg(Color::Green),
        ),
        FetchState::Failed => Span::styled(" Fetch failed ", Style::default().fg(Color::Red)),
    };

    let range_span = Span::raw(format!(" {} .. {} ", app.start_date, app.end_date));

    let window_span = match app.window {
        Some(window) => Span::styled(
            format!(" {} ", window.label()),
            Style::default().fg(Color::Cyan),
        ),
        None => Span::raw(""),
    };

    let paged_span = if app.paged {
        Span::styled(
            " PAGED ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let spans = vec![
        fetch_span,
        Span::raw("│"),
        range_span,
        window_span,
        paged_span,
        Span::raw("│"),
        error_span,
    ];

    let line = Line::from(spans);
    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
