//! End-to-end screening of one uploaded resume

use crate::error::Result;
use crate::input::manager::InputManager;
use crate::output::report::{Candidate, ScreeningReport};
use crate::processing::screener::Screener;
use log::info;
use std::path::PathBuf;

/// One upload to screen
#[derive(Debug, Clone, Default)]
pub struct ScreeningRequest {
    pub resume_path: PathBuf,
    /// Name the file was uploaded under; the stored path may differ
    pub original_filename: Option<String>,
    pub profession: Option<String>,
    pub job_level: Option<String>,
    pub candidate: Candidate,
    pub threshold: Option<usize>,
}

/// Extraction plus evaluation. Extraction failures are returned as errors
/// and never reach the screener.
pub async fn screen(screener: &Screener, input: &InputManager, request: ScreeningRequest) -> Result<ScreeningReport> {
    let document = input
        .extract_file(&request.resume_path, request.original_filename.as_deref())
        .await?;

    let threshold = request.threshold.unwrap_or_else(|| screener.matcher().threshold());
    let evaluation = screener.evaluate_with_threshold(
        &document.normalized_text,
        request.profession.as_deref(),
        request.job_level.as_deref(),
        threshold,
    );

    info!(
        "Screened {}: eligible={}, skills={}, ats={}",
        request.resume_path.display(),
        evaluation.eligible,
        evaluation.match_count,
        evaluation.ats_score
    );

    let original_filename = request.original_filename.unwrap_or_else(|| {
        request
            .resume_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    Ok(ScreeningReport::new(
        request.candidate,
        request.resume_path.to_string_lossy().to_string(),
        original_filename,
        document.source_format,
        request.profession,
        request.job_level,
        evaluation,
        document.normalized_text,
    ))
}
