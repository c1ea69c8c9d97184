//! Output module: reports, formatters and the history listing

pub mod formatter;
pub mod history_page;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{Candidate, Notification, ScreeningReport};
