use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use tokio::sync::mpsc;

use wicker::config::fetch_config;
use wicker::models::CandleRequest;
use wicker::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use wicker::tui::{self, Action, App, Message};
use wicker::{CandleFetcher, WickerError};

/// Days shown on startup when no explicit start date is given.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// UI tick interval in milliseconds.
const TICK_INTERVAL_MS: u64 = 250;

/// Terminal viewer for Binance spot daily OHLC candles.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Trading pair to load on startup.
    #[arg(long, default_value = "BTCUSDT")]
    symbol: String,

    /// First day of the range (YYYY-MM-DD); defaults to 30 days before the end.
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); defaults to today (UTC).
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Page through the full range instead of accepting the per-call cap.
    #[arg(long)]
    paged: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), WickerError> {
    // Log to stderr so the TUI canvas stays clean; enable with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let app_config = fetch_config()?;

    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = args
        .start
        .unwrap_or(end - Duration::days(DEFAULT_WINDOW_DAYS));

    let fetcher = CandleFetcher::with_base_url(app_config.binance.api_url);
    let mut app = App::new(args.symbol, start, end, args.paged);

    let mut terminal = tui::setup_terminal()?;
    let result = run(&mut terminal, &mut app, &fetcher).await;
    tui::restore_terminal(&mut terminal)?;

    result
}

/// Drives the message loop until the user quits.
async fn run(
    terminal: &mut tui::Tui,
    app: &mut App,
    fetcher: &CandleFetcher,
) -> Result<(), WickerError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);

    // Load the startup range before the first keypress.
    dispatch_fetch(app.begin_fetch(), app.paged, fetcher, &tx);

    while !app.should_quit {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| WickerError::Io(e.to_string()))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = update(app, message) {
            match action {
                Action::Fetch(request) => dispatch_fetch(request, app.paged, fetcher, &tx),
            }
        }
    }

    Ok(())
}

/// Runs one fetch on a background task and reports back as a message.
fn dispatch_fetch(
    request: CandleRequest,
    paged: bool,
    fetcher: &CandleFetcher,
    tx: &mpsc::UnboundedSender<Message>,
) {
    let fetcher = fetcher.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = if paged {
            fetcher.fetch_paged(&request).await
        } else {
            fetcher.fetch(&request).await
        };
        let message = match result {
            Ok(series) => Message::Fetched { request, series },
            Err(e) => Message::FetchFailed {
                request,
                error: e.to_string(),
            },
        };
        let _ = tx.send(message);
    });
}
