//! Screening report and the payloads handed to persistence and notification

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::screener::EvaluationResult;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Everything produced for one uploaded resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub candidate: Candidate,
    pub resume_path: String,
    pub original_filename: String,
    pub source_format: DocumentFormat,
    pub profession: Option<String>,
    pub job_level: Option<String>,
    pub evaluation: EvaluationResult,
    pub resume_text: String,
    pub notification: Option<Notification>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Verdict for the mail transport. Delivery happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient_email: String,
    pub name: String,
    pub eligible: bool,
    pub message: String,
}

impl Candidate {
    pub fn new(name: Option<String>, email: Option<String>) -> Result<Self> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());

        if let Some(address) = &email {
            if !is_valid_email(address) {
                return Err(ScreenerError::InvalidInput(format!("Invalid email address: {}", address)));
            }
        }

        Ok(Self { name, email })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Candidate")
    }
}

impl Notification {
    pub fn new(candidate: &Candidate, eligible: bool) -> Option<Self> {
        let recipient_email = candidate.email.clone()?;
        Some(Self {
            recipient_email,
            name: candidate.display_name().to_string(),
            eligible,
            message: verdict_message(candidate.display_name(), eligible),
        })
    }
}

impl ScreeningReport {
    pub fn new(
        candidate: Candidate,
        resume_path: String,
        original_filename: String,
        source_format: DocumentFormat,
        profession: Option<String>,
        job_level: Option<String>,
        evaluation: EvaluationResult,
        resume_text: String,
    ) -> Self {
        let notification = Notification::new(&candidate, evaluation.eligible);
        Self {
            candidate,
            resume_path,
            original_filename,
            source_format,
            profession,
            job_level,
            evaluation,
            resume_text,
            notification,
            generated_at: Utc::now(),
        }
    }

    pub fn verdict_message(&self) -> String {
        verdict_message(self.candidate.display_name(), self.evaluation.eligible)
    }
}

pub fn verdict_message(name: &str, eligible: bool) -> String {
    let verdict = if eligible { "Eligible" } else { "Not Eligible" };
    format!("{}, your result is: {}", name, verdict)
}

fn is_valid_email(address: &str) -> bool {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex");
    email_regex.is_match(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_message() {
        assert_eq!(verdict_message("Ada", true), "Ada, your result is: Eligible");
        assert_eq!(verdict_message("Ada", false), "Ada, your result is: Not Eligible");
    }

    #[test]
    fn test_notification_requires_email() {
        let candidate = Candidate::new(Some("Ada".into()), None).unwrap();
        assert!(Notification::new(&candidate, true).is_none());

        let candidate = Candidate::new(Some("Ada".into()), Some("ada@example.com".into())).unwrap();
        let notification = Notification::new(&candidate, false).unwrap();
        assert_eq!(notification.recipient_email, "ada@example.com");
        assert!(!notification.eligible);
        assert_eq!(notification.message, "Ada, your result is: Not Eligible");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let err = Candidate::new(None, Some("not-an-email".into())).unwrap_err();
        assert!(matches!(err, ScreenerError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_fields_become_none() {
        let candidate = Candidate::new(Some("  ".into()), Some("".into())).unwrap();
        assert_eq!(candidate, Candidate::default());
        assert_eq!(candidate.display_name(), "Candidate");
    }
}
