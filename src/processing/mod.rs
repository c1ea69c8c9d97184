//! Text processing, skill matching and scoring module

pub mod ats_scorer;
pub mod catalog;
pub mod keywords;
pub mod screener;
pub mod skill_matcher;
pub mod tokenizer;

pub use screener::{EvaluationResult, Screener};
