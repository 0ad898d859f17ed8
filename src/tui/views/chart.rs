//! Chart panel rendering: candlestick and OHLC line styles.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::candle::Candle;
use crate::tui::app::{App, ChartType, Focus};

/// Columns reserved for the price axis gutter in the candle chart.
const PRICE_GUTTER: usize = 12;

/// Renders the chart panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Chart;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = format!(" Chart [{}] 1d ", app.chart_type.label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.candles.is_empty() {
        let para = Paragraph::new("No candle data").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, inner);
        return;
    }

    match app.chart_type {
        ChartType::Candle => render_candles(frame, inner, app),
        ChartType::Line => render_ohlc_lines(frame, inner, app),
    }
}

/// Renders an ASCII candlestick chart, oldest candle on the left.
fn render_candles(frame: &mut Frame, area: Rect, app: &App) {
    let Some((min_price, max_price)) = app.candles.price_range() else {
        return;
    };
    let price_range = max_price - min_price;
    let height = area.height as usize;
    let width = (area.width as usize).saturating_sub(PRICE_GUTTER);

    if price_range <= Decimal::ZERO || height == 0 || width == 0 {
        let para = Paragraph::new("Price range too narrow to chart")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, area);
        return;
    }

    // The most recent candles that fit, drawn in chronological order.
    let candles = app.candles.candles();
    let visible = &candles[candles.len().saturating_sub(width)..];

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..height {
        let price_level = max_price - (price_range * Decimal::from(row) / Decimal::from(height));

        let mut row_chars: Vec<Span> = Vec::new();
        row_chars.push(Span::raw(format!("{:>10.2} │", price_level)));

        for candle in visible {
            let is_bullish = candle.close >= candle.open;
            let color = if is_bullish { Color::Green } else { Color::Red };

            let body_top = candle.open.max(candle.close);
            let body_bottom = candle.open.min(candle.close);

            let glyph = if price_level <= candle.high && price_level >= body_top {
                "│" // Upper wick
            } else if price_level < body_top && price_level > body_bottom {
                "█" // Body
            } else if price_level <= body_bottom && price_level >= candle.low {
                "│" // Lower wick
            } else {
                " "
            };

            row_chars.push(Span::styled(glyph, Style::default().fg(color)));
        }

        lines.push(Line::from(row_chars));
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, area);
}

/// Renders the four OHLC components as line graphs over the full range.
fn render_ohlc_lines(frame: &mut Frame, area: Rect, app: &App) {
    let open = series_points(app, |c| c.open);
    let high = series_points(app, |c| c.high);
    let low = series_points(app, |c| c.low);
    let close = series_points(app, |c| c.close);

    let Some((min_price, max_price)) = app.candles.price_range() else {
        return;
    };
    let (Some(mut y_min), Some(mut y_max)) = (min_price.to_f64(), max_price.to_f64()) else {
        return;
    };
    if y_min == y_max {
        // Give flat series some vertical extent so the axis stays sane.
        y_min -= 1.0;
        y_max += 1.0;
    }

    let x_max = app.candles.len().saturating_sub(1) as f64;
    let x_labels: Vec<String> = match (app.candles.candles().first(), app.candles.latest()) {
        (Some(first), Some(last)) => vec![
            first.open_time.format("%Y-%m-%d").to_string(),
            last.open_time.format("%Y-%m-%d").to_string(),
        ],
        _ => Vec::new(),
    };
    let y_mid = (y_min + y_max) / 2.0;
    let y_labels = vec![
        format!("{y_min:.2}"),
        format!("{y_mid:.2}"),
        format!("{y_max:.2}"),
    ];

    let datasets = vec![
        Dataset::default()
            .name("Open")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&open),
        Dataset::default()
            .name("High")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&high),
        Dataset::default()
            .name("Low")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&low),
        Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&close),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Projects one OHLC component onto chart points indexed by day.
fn series_points(app: &App, value: impl Fn(&Candle) -> Decimal) -> Vec<(f64, f64)> {
    app.candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| value(candle).to_f64().map(|y| (i as f64, y)))
        .collect()
}
