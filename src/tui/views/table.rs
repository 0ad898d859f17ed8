//! History table rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Focus};

/// Renders the daily history table, most recent day on top.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Table;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = format!(" History ({} days) ", app.candles.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Column headers
    lines.push(Line::from(Span::styled(
        format!(
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>8}",
            "Date", "Open", "High", "Low", "Close", "Volume", "Trades"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if app.candles.is_empty() {
        lines.push(Line::from(Span::styled(
            "No data",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let max_rows = inner.height.saturating_sub(1) as usize;

        // Newest first, shifted by the scroll offset.
        for candle in app
            .candles
            .iter()
            .rev()
            .skip(app.table_offset)
            .take(max_rows)
        {
            let close_color = if candle.close >= candle.open {
                Color::Green
            } else {
                Color::Red
            };

            lines.push(Line::from(vec![
                Span::raw(format!("{:<10} ", candle.open_time.format("%Y-%m-%d"))),
                Span::raw(format!("{:>10.2} ", candle.open)),
                Span::raw(format!("{:>10.2} ", candle.high)),
                Span::raw(format!("{:>10.2} ", candle.low)),
                Span::styled(
                    format!("{:>10.2} ", candle.close),
                    Style::default().fg(close_color),
                ),
                Span::raw(format!("{:>12.4} ", candle.volume)),
                Span::raw(format!("{:>8}", candle.trades)),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}
