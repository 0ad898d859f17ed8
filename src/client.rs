//! REST client for historical daily klines.
//!
//! [`CandleFetcher`] issues plain GET requests against the public
//! `/api/v3/klines` endpoint and normalizes the positional rows into
//! [`Candle`](crate::models::candle::Candle) values. Calls are independent:
//! no retries, no caching, no state shared between fetches.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::Result;
use crate::error::WickerError;
use crate::models::CandleRequest;
use crate::models::candle::{Candle, CandleSeries, RawKline};

/// Public Binance spot REST endpoint.
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// Path of the klines endpoint.
const KLINES_PATH: &str = "/api/v3/klines";

/// The only interval this crate requests.
const DAILY_INTERVAL: &str = "1d";

/// Most rows one call returns when an explicit `limit` is sent. Without
/// one the endpoint caps at 500 and truncates silently.
pub const MAX_KLINES_PER_CALL: usize = 1000;

/// Pause between successive pages in [`CandleFetcher::fetch_paged`].
const PAGE_DELAY_MS: u64 = 200;

/// Client for fetching daily candle history.
#[derive(Debug, Clone)]
pub struct CandleFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl CandleFetcher {
    /// Creates a fetcher against the public Binance endpoint.
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_API_URL)
    }

    /// Creates a fetcher against a custom base URL (proxies, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the daily candles covering the request's date range.
    ///
    /// Exactly one GET is issued per call. When the range holds more rows
    /// than the endpoint returns per call, the result is silently the first
    /// portion; use [`fetch_paged`](Self::fetch_paged) to cover long ranges.
    ///
    /// # Errors
    ///
    /// [`WickerError::HttpStatus`] for any non-200 status,
    /// [`WickerError::Transport`] when no status was received, and
    /// [`WickerError::MalformedResponse`] when the body does not decode as
    /// kline rows.
    pub async fn fetch(&self, request: &CandleRequest) -> Result<CandleSeries> {
        let (start_ms, end_ms) = day_bounds_utc(request.start, request.end);
        let candles = self
            .fetch_window(&request.symbol, start_ms, end_ms, None)
            .await?;
        info!(
            symbol = request.symbol,
            count = candles.len(),
            "fetched daily candles"
        );
        Ok(CandleSeries::new(candles))
    }

    /// Fetches the full range page by page.
    ///
    /// Pages are requested with an explicit `limit=1000`; after a full page
    /// the next call advances `startTime` one millisecond past the last
    /// delivered close time. A short pause between pages keeps the request
    /// rate polite. Errors abort the whole fetch, partial results are
    /// discarded.
    pub async fn fetch_paged(&self, request: &CandleRequest) -> Result<CandleSeries> {
        let (mut start_ms, end_ms) = day_bounds_utc(request.start, request.end);
        let mut all = Vec::new();

        loop {
            let page = self
                .fetch_window(
                    &request.symbol,
                    start_ms,
                    end_ms,
                    Some(MAX_KLINES_PER_CALL),
                )
                .await?;
            let last_close_ms = match page.last() {
                Some(candle) => candle.close_time.timestamp_millis(),
                None => break,
            };
            let page_len = page.len();
            all.extend(page);

            if page_len < MAX_KLINES_PER_CALL {
                break;
            }
            start_ms = last_close_ms + 1;
            if start_ms >= end_ms {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(PAGE_DELAY_MS)).await;
        }

        info!(
            symbol = request.symbol,
            count = all.len(),
            "fetched daily candles (paged)"
        );
        Ok(CandleSeries::new(all))
    }

    /// Issues one GET for the window and decodes the rows.
    async fn fetch_window(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
        limit: Option<usize>,
    ) -> Result<Vec<Candle>> {
        let url = self.klines_url(symbol, start_ms, end_ms, limit);
        debug!(%url, "requesting klines");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(WickerError::HttpStatus { status });
        }

        let body = response.text().await?;
        let rows: Vec<RawKline> = serde_json::from_str(&body)
            .map_err(|e| WickerError::MalformedResponse(e.to_string()))?;

        rows.into_iter().map(Candle::try_from).collect()
    }

    /// Builds the klines request URL. The symbol is concatenated verbatim,
    /// without URL-encoding.
    fn klines_url(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
        limit: Option<usize>,
    ) -> String {
        let mut url = format!(
            "{}{}?symbol={}&interval={}&startTime={}&endTime={}",
            self.base_url, KLINES_PATH, symbol, DAILY_INTERVAL, start_ms, end_ms
        );
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }
        url
    }
}

impl Default for CandleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Epoch-millisecond bounds for an inclusive calendar-date range in UTC:
/// 00:00:00.000 on `start` through 23:59:59 on `end`. The end bound is
/// floored to whole seconds, so it always lands on a `..59000` value.
pub fn day_bounds_utc(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let start_ms = start
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
        .timestamp_millis();
    let end_ms = end
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid time")
        .and_utc()
        .timestamp_millis();
    (start_ms, end_ms)
}
