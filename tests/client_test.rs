//! Fetch behavior tests against a local HTTP stub server.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use wicker::client::MAX_KLINES_PER_CALL;
use wicker::models::CandleRequest;
use wicker::{CandleFetcher, WickerError};

use common::StubServer;

/// Epoch milliseconds for 2021-01-01T00:00:00Z.
const BASE_OPEN_MS: i64 = 1_609_459_200_000;

const DAY_MS: i64 = 86_400_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(symbol: &str) -> CandleRequest {
    CandleRequest::new(symbol, date(2021, 1, 1), date(2021, 1, 3))
}

/// One generated kline row, `day_index` days after 2021-01-01.
fn kline_row(day_index: i64) -> String {
    let open_ms = BASE_OPEN_MS + day_index * DAY_MS;
    let close_ms = open_ms + DAY_MS - 1;
    format!(
        r#"[{open_ms},"100.0","110.0","90.0","105.0","1000.0",{close_ms},"105000.0",500,"500.0","52500.0","0"]"#
    )
}

fn klines_body(start_day: i64, count: i64) -> String {
    let rows: Vec<String> = (start_day..start_day + count).map(kline_row).collect();
    format!("[{}]", rows.join(","))
}

#[tokio::test]
async fn test_fetch_decodes_rows_in_delivery_order() {
    let server = StubServer::start(vec![(200, klines_body(0, 3))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let series = fetcher
        .fetch(&request("BTCUSDT"))
        .await
        .expect("Failed to fetch candles");

    assert_eq!(series.len(), 3);
    assert_eq!(series.candles()[0].open, dec!(100.0));
    for pair in series.candles().windows(2) {
        assert!(pair[0].open_time < pair[1].open_time);
    }
}

#[tokio::test]
async fn test_fetch_sends_daily_interval_and_millisecond_bounds() {
    let server = StubServer::start(vec![(200, String::from("[]"))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    fetcher
        .fetch(&request("BTCUSDT"))
        .await
        .expect("Failed to fetch candles");

    let lines = server.request_lines().await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("GET /api/v3/klines?symbol=BTCUSDT"));
    assert!(lines[0].contains("&interval=1d"));
    // 2021-01-01 00:00:00 through 2021-01-03 23:59:59, floored to seconds.
    assert!(lines[0].contains("&startTime=1609459200000&endTime=1609718399000"));
    assert!(!lines[0].contains("limit"));
}

#[tokio::test]
async fn test_fetch_forwards_the_symbol_verbatim() {
    let server = StubServer::start(vec![(200, String::from("[]"))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    fetcher
        .fetch(&request("btcusdt&limit=9"))
        .await
        .expect("Failed to fetch candles");

    let lines = server.request_lines().await;
    assert!(
        lines[0].contains("symbol=btcusdt&limit=9&interval=1d"),
        "symbol must reach the wire unescaped: {}",
        lines[0]
    );
}

#[tokio::test]
async fn test_empty_array_yields_an_empty_series() {
    let server = StubServer::start(vec![(200, String::from("[]"))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let series = fetcher
        .fetch(&request("BTCUSDT"))
        .await
        .expect("an empty window is not an error");
    assert!(series.is_empty());
}

#[tokio::test]
async fn test_non_200_status_maps_to_http_status_error() {
    let body = String::from(r#"{"code":-1121,"msg":"Invalid symbol."}"#);
    let server = StubServer::start(vec![(400, body)]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let err = fetcher.fetch(&request("NOSUCHPAIR")).await.unwrap_err();
    match err {
        WickerError::HttpStatus { status } => assert_eq!(status, 400),
        other => panic!("expected an HTTP status error, got {other}"),
    }
}

#[tokio::test]
async fn test_non_json_body_maps_to_malformed_response() {
    let server = StubServer::start(vec![(200, String::from("<!doctype html>oops"))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let err = fetcher.fetch(&request("BTCUSDT")).await.unwrap_err();
    assert!(matches!(err, WickerError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_short_rows_map_to_malformed_response() {
    let body = String::from(
        r#"[[1609459200000,"100.0","110.0","90.0","105.0","1000.0",1609545599999,"105000.0",500,"500.0","52500.0"]]"#,
    );
    let server = StubServer::start(vec![(200, body)]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let err = fetcher.fetch(&request("BTCUSDT")).await.unwrap_err();
    assert!(matches!(err, WickerError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_out_of_range_timestamps_map_to_malformed_response() {
    let body = format!(
        r#"[[{},"100.0","110.0","90.0","105.0","1000.0",1609545599999,"105000.0",500,"500.0","52500.0","0"]]"#,
        i64::MAX
    );
    let server = StubServer::start(vec![(200, body)]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let err = fetcher.fetch(&request("BTCUSDT")).await.unwrap_err();
    assert!(matches!(err, WickerError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_connection_failures_map_to_transport_error() {
    // Nothing listens on port 1.
    let fetcher = CandleFetcher::with_base_url("http://127.0.0.1:1");

    let err = fetcher.fetch(&request("BTCUSDT")).await.unwrap_err();
    assert!(matches!(err, WickerError::Transport(_)));
}

#[tokio::test]
async fn test_every_fetch_issues_a_fresh_request() {
    let server = StubServer::start(vec![(200, klines_body(0, 3))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    fetcher
        .fetch(&request("BTCUSDT"))
        .await
        .expect("Failed to fetch candles");
    fetcher
        .fetch(&request("BTCUSDT"))
        .await
        .expect("Failed to fetch candles");

    assert_eq!(server.hit_count(), 2, "results are never cached");
}

#[tokio::test]
async fn test_paged_fetch_stitches_full_pages() {
    let per_call = MAX_KLINES_PER_CALL as i64;
    let server = StubServer::start(vec![
        (200, klines_body(0, per_call)),
        (200, klines_body(per_call, 3)),
    ])
    .await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let request = CandleRequest::new("BTCUSDT", date(2021, 1, 1), date(2023, 12, 31));
    let series = fetcher
        .fetch_paged(&request)
        .await
        .expect("Failed to fetch paged candles");

    assert_eq!(series.len(), 1003);
    assert_eq!(server.hit_count(), 2);
    for pair in series.candles().windows(2) {
        assert!(pair[0].open_time < pair[1].open_time, "no overlap between pages");
    }

    let lines = server.request_lines().await;
    assert!(lines[0].contains("&limit=1000"));
    // The second page starts one millisecond past the last delivered close.
    let second_start = BASE_OPEN_MS + per_call * DAY_MS;
    assert!(
        lines[1].contains(&format!("&startTime={second_start}&")),
        "unexpected second page request: {}",
        lines[1]
    );
}

#[tokio::test]
async fn test_paged_fetch_stops_on_a_short_page() {
    let server = StubServer::start(vec![(200, klines_body(0, 5))]).await;
    let fetcher = CandleFetcher::with_base_url(&server.base_url);

    let request = CandleRequest::new("BTCUSDT", date(2021, 1, 1), date(2021, 12, 31));
    let series = fetcher
        .fetch_paged(&request)
        .await
        .expect("Failed to fetch paged candles");

    assert_eq!(series.len(), 5);
    assert_eq!(server.hit_count(), 1, "a short page ends the loop");
}
