//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::App;
use super::components::{status_bar, symbol_selector};
use super::views::{chart, table};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Symbol header
            Constraint::Length(1), // Status bar
            Constraint::Min(10),   // Main content (table + chart)
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    render_symbol_header(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    // Main content: History | Chart
    let main_content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_layout[2]);

    table::render(frame, main_content[0], app);
    chart::render(frame, main_content[1], app);

    render_keybindings(frame, main_layout[3], app);

    // Overlay last so it sits on top.
    if app.selector_open {
        symbol_selector::render(frame, area, app);
    }
}

/// Renders the header with the active symbol and latest daily close.
fn render_symbol_header(frame: &mut Frame, area: Rect, app: &App) {
    let content = if let Some(latest) = app.candles.latest() {
        let change_color = if latest.close >= latest.open {
            Color::Green
        } else {
            Color::Red
        };
        let arrow = if latest.close >= latest.open {
            "▲"
        } else {
            "▼"
        };

        Line::from(vec![
            Span::styled(
                format!(" {} ", app.symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(arrow, Style::default().fg(change_color)),
            Span::styled(
                format!(" {:.2} ", latest.close),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("close "),
            Span::styled(
                latest.open_time.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Gray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!(" {} ", app.symbol),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" -- ", Style::default().fg(Color::DarkGray)),
        ])
    };

    let para = Paragraph::new(content).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, _app: &App) {
    let help = "[s]ymbol [g]chart type [r]efetch [1-4]window [j/k]scroll [Tab]focus [q]uit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
