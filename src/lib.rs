//! wicker: a terminal viewer for Binance daily OHLC candles.
//!
//! The library half provides [`CandleFetcher`], a small async client for
//! the public `/api/v3/klines` endpoint, together with typed candle models.
//! The [`tui`] module renders a fetched series as a scrollable history
//! table and as candlestick or line charts.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tui;

pub use client::CandleFetcher;
pub use error::{Result, WickerError};
