//! Terminal User Interface for the wicker candle viewer.
//!
//! Provides a Ratatui-based display of fetched daily history: a scrollable
//! table, candlestick and line charts, a symbol selector, and date-window
//! presets.

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;
pub mod views;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
