//! Daily OHLC candle types for the klines endpoint.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::WickerError;

/// One kline row exactly as the endpoint delivers it: a twelve-element
/// positional array. Deserializing through this type is what enforces the
/// row shape; a row with missing or extra fields fails here.
///
/// Field order: open time (ms), open, high, low, close, volume, close time
/// (ms), quote asset volume, trade count, taker-buy base volume, taker-buy
/// quote volume, and a final field the API documents as ignorable.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub i64,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub i64,
    pub Decimal,
    pub u64,
    pub Decimal,
    pub Decimal,
    pub serde_json::Value,
);

/// A single daily OHLC bar with UTC timestamps and exact decimal prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Start of the covered day (midnight UTC).
    pub open_time: DateTime<Utc>,
    /// End of the covered day (one millisecond before the next midnight).
    pub close_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Traded volume in the base asset.
    pub volume: Decimal,
    /// Traded volume in the quote asset.
    pub quote_volume: Decimal,
    /// Number of trades during the day.
    pub trades: u64,
    pub taker_buy_base_volume: Decimal,
    pub taker_buy_quote_volume: Decimal,
}

impl TryFrom<RawKline> for Candle {
    type Error = WickerError;

    fn try_from(row: RawKline) -> Result<Self, Self::Error> {
        Ok(Self {
            open_time: timestamp_from_millis(row.0)?,
            close_time: timestamp_from_millis(row.6)?,
            open: row.1,
            high: row.2,
            low: row.3,
            close: row.4,
            volume: row.5,
            quote_volume: row.7,
            trades: row.8,
            taker_buy_base_volume: row.9,
            taker_buy_quote_volume: row.10,
        })
    }
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, WickerError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| WickerError::MalformedResponse(format!("timestamp out of range: {millis}")))
}

/// An ordered run of daily candles, oldest first, exactly as delivered.
///
/// The series applies no deduplication or gap-filling and is rebuilt from
/// scratch on every fetch; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Wraps candles in delivery order.
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// All candles, oldest first.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// The most recent candle, if any.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Lowest low and highest high across the series, `None` when empty.
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        self.candles.iter().fold(None, |range, candle| match range {
            None => Some((candle.low, candle.high)),
            Some((low, high)) => Some((low.min(candle.low), high.max(candle.high))),
        })
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
