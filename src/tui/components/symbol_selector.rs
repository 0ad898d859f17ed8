//! Symbol selector overlay.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::app::{AVAILABLE_SYMBOLS, App};

/// Symbols shown per selector row.
const SYMBOLS_PER_ROW: usize = 4;

/// Renders the symbol selector as a centered overlay.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = AVAILABLE_SYMBOLS.len().div_ceil(SYMBOLS_PER_ROW) as u16;
    let popup = centered_rect(46, rows + 2, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Symbol (Enter selects, Esc closes) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    // Grid of symbols, 4 per row
    let mut lines: Vec<Line> = Vec::new();
    for (row, chunk) in AVAILABLE_SYMBOLS.chunks(SYMBOLS_PER_ROW).enumerate() {
        let spans: Vec<Span> = chunk
            .iter()
            .enumerate()
            .map(|(col, symbol)| {
                let index = row * SYMBOLS_PER_ROW + col;
                let is_active = *symbol == app.symbol;
                let is_cursor = index == app.selector_index;

                let style = if is_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else if is_active {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };

                Span::styled(format!(" {:<10}", symbol), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}

/// Returns a rect of the given size centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}
