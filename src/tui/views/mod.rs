//! Main screen panels.

pub mod chart;
pub mod table;
