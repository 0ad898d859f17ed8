//! Data models for Binance spot kline retrieval.

pub mod candle;

use chrono::NaiveDate;

/// Parameters for one historical-candle fetch: a trading pair and an
/// inclusive calendar-date range.
///
/// The range is not pre-validated. A `start` after `end` is forwarded
/// as-is and the exchange answers with an empty array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    /// Trading pair ticker, forwarded verbatim into the query string
    /// (e.g. `BTCUSDT`). No casing or escaping is applied.
    pub symbol: String,
    /// First day of the range, inclusive.
    pub start: NaiveDate,
    /// Last day of the range, inclusive.
    pub end: NaiveDate,
}

impl CandleRequest {
    /// Creates a request for the daily candles covering `start..=end`.
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }
}
