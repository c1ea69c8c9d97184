//! Persistence of screening results

pub mod history;

pub use history::{HistoryStore, ScreeningRecord};
