//! Application state: the active request, the fetched series, and UI flags.

use std::time::Instant;

use chrono::{Duration, NaiveDate, Utc};

use crate::models::CandleRequest;
use crate::models::candle::CandleSeries;

/// Trading pairs offered in the symbol selector.
pub const AVAILABLE_SYMBOLS: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "LTCUSDT", "XRPUSDT", "BCHUSDT", "ADAUSDT", "DOTUSDT", "LINKUSDT",
    "XLMUSDT", "USDTUSDT", "BNBUSDT", "DOGEUSDT", "UNIUSDT", "USDCUSDT", "EOSUSDT", "TRXUSDT",
    "XMRUSDT", "XTZUSDT", "ATOMUSDT", "VETUSDT", "DASHUSDT", "MIOTAUSDT", "NEOUSDT", "MKRUSDT",
];

/// Everything the renderer needs for one frame.
pub struct App {
    // -- Request State --
    /// Trading pair whose history is shown.
    pub symbol: String,
    /// First day of the requested range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the requested range (inclusive).
    pub end_date: NaiveDate,
    /// Active window preset, if the range came from one.
    pub window: Option<DateWindow>,
    /// Use paged retrieval for ranges beyond the per-call cap.
    pub paged: bool,

    // -- Market Data --
    /// Candles currently displayed, oldest first.
    pub candles: CandleSeries,
    /// Lifecycle of the most recent fetch.
    pub fetch_state: FetchState,

    // -- UI State --
    /// Which panel has focus.
    pub focus: Focus,
    /// Active chart style.
    pub chart_type: ChartType,
    /// Scroll offset into the history table (0 = most recent day on top).
    pub table_offset: usize,
    /// Whether the symbol selector overlay is open.
    pub selector_open: bool,
    /// Cursor index in the symbol selector.
    pub selector_index: usize,
    /// Transient error shown in the status bar.
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    /// Set when the user asks to exit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance for the given startup request.
    pub fn new(symbol: String, start_date: NaiveDate, end_date: NaiveDate, paged: bool) -> Self {
        let selector_index = AVAILABLE_SYMBOLS
            .iter()
            .position(|s| *s == symbol)
            .unwrap_or(0);

        Self {
            symbol,
            start_date,
            end_date,
            window: None,
            paged,

            candles: CandleSeries::default(),
            fetch_state: FetchState::Idle,

            focus: Focus::Table,
            chart_type: ChartType::Candle,
            table_offset: 0,
            selector_open: false,
            selector_index,
            error_message: None,

            should_quit: false,
        }
    }

    /// The request matching the current symbol and date range.
    pub fn current_request(&self) -> CandleRequest {
        CandleRequest::new(self.symbol.clone(), self.start_date, self.end_date)
    }

    /// Marks a fetch as in flight and returns the request to run.
    pub fn begin_fetch(&mut self) -> CandleRequest {
        self.fetch_state = FetchState::Loading;
        self.current_request()
    }

    /// Replaces the displayed series after a completed fetch.
    pub fn apply_series(&mut self, series: CandleSeries) {
        self.candles = series;
        self.table_offset = 0;
        self.fetch_state = FetchState::Loaded;
    }

    /// Moves the date range to the preset window ending today (UTC).
    pub fn set_window(&mut self, window: DateWindow) {
        let today = Utc::now().date_naive();
        self.end_date = today;
        self.start_date = today - Duration::days(window.days());
        self.window = Some(window);
    }

    /// Scrolls the history table one row toward older days.
    pub fn scroll_table_down(&mut self) {
        let max_offset = self.candles.len().saturating_sub(1);
        if self.table_offset < max_offset {
            self.table_offset += 1;
        }
    }

    /// Scrolls the history table one row toward recent days.
    pub fn scroll_table_up(&mut self) {
        self.table_offset = self.table_offset.saturating_sub(1);
    }

    /// Moves the selector cursor forward.
    pub fn selector_next(&mut self) {
        if self.selector_index < AVAILABLE_SYMBOLS.len().saturating_sub(1) {
            self.selector_index += 1;
        }
    }

    /// Moves the selector cursor backward.
    pub fn selector_prev(&mut self) {
        self.selector_index = self.selector_index.saturating_sub(1);
    }

    /// Shows a transient error in the status bar.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Drops the error message once it has been visible for 5 seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > std::time::Duration::from_secs(5)
        {
            self.error_message = None;
        }
    }
}

/// Which style the chart panel draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartType {
    #[default]
    Candle,
    Line,
}

impl ChartType {
    /// Switches to the other style.
    pub fn toggle(&mut self) {
        *self = match self {
            ChartType::Candle => ChartType::Line,
            ChartType::Line => ChartType::Candle,
        };
    }

    /// Label shown in the chart title.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Candle => "Candle",
            ChartType::Line => "Line",
        }
    }
}

/// Date-window presets, each ending today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateWindow {
    D7,
    #[default]
    D30,
    D90,
    D365,
}

impl DateWindow {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DateWindow::D7 => "7d",
            DateWindow::D30 => "30d",
            DateWindow::D90 => "90d",
            DateWindow::D365 => "365d",
        }
    }

    /// Days subtracted from today to form the window start.
    pub fn days(&self) -> i64 {
        match self {
            DateWindow::D7 => 7,
            DateWindow::D30 => 30,
            DateWindow::D90 => 90,
            DateWindow::D365 => 365,
        }
    }
}

/// Panels that can hold keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Chart,
}

impl Focus {
    /// Toggles between the two panels.
    pub fn toggle(&mut self) {
        *self = match self {
            Focus::Table => Focus::Chart,
            Focus::Chart => Focus::Table,
        };
    }
}

/// Lifecycle of the most recent fetch, as shown in the status bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A transient error together with the instant it appeared.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    pub message: String,
    /// Drives the timed auto-clear.
    pub timestamp: Instant,
}
