//! Reusable UI components.

pub mod status_bar;
pub mod symbol_selector;
