//! Input processing module
//! Handles format detection and text extraction for uploaded resumes

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use file_detector::DocumentFormat;
pub use manager::InputManager;
pub use text_extractor::ExtractedDocument;
