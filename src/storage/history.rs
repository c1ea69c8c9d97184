//! Screening history kept as a JSON-lines file
//!
//! One record per line, appended in upload order. Listing returns newest
//! first, which is what the admin view shows. The last issued id is kept in
//! a `.seq` file next to the history so ids are never reused after a delete
//! or a clear.

use crate::error::{Result, ScreenerError};
use crate::output::report::ScreeningReport;
use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A persisted screening result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: u64,
    pub filename: String,
    pub original_filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profession: Option<String>,
    pub job_level: Option<String>,
    pub resume_text: String,
    pub eligible: bool,
    pub match_count: usize,
    pub ats_score: u8,
    pub upload_date: DateTime<Utc>,
}

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a report and return the stored record with its new id
    pub fn append(&self, report: &ScreeningReport) -> Result<ScreeningRecord> {
        let newest = self.read_records()?.iter().map(|r| r.id).max().unwrap_or(0);
        let next_id = newest.max(self.last_issued_id()?) + 1;

        let filename = Path::new(&report.resume_path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report.resume_path.clone());

        let record = ScreeningRecord {
            id: next_id,
            filename,
            original_filename: report.original_filename.clone(),
            name: report.candidate.name.clone(),
            email: report.candidate.email.clone(),
            profession: report.profession.clone(),
            job_level: report.job_level.clone(),
            resume_text: report.resume_text.clone(),
            eligible: report.evaluation.eligible,
            match_count: report.evaluation.match_count,
            ats_score: report.evaluation.ats_score,
            upload_date: report.generated_at,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        fs::write(self.sequence_path(), next_id.to_string())
            .with_context(|| format!("Cannot update id sequence for '{}'", self.path.display()))?;

        info!("Saved screening record #{} to {}", record.id, self.path.display());
        Ok(record)
    }

    /// All records, newest first
    pub fn list(&self) -> Result<Vec<ScreeningRecord>> {
        let mut records = self.read_records()?;
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    pub fn get(&self, id: u64) -> Result<Option<ScreeningRecord>> {
        Ok(self.read_records()?.into_iter().find(|r| r.id == id))
    }

    /// Remove one record; returns whether it existed
    pub fn delete(&self, id: u64) -> Result<bool> {
        let records = self.read_records()?;
        let before = records.len();
        let kept: Vec<ScreeningRecord> = records.into_iter().filter(|r| r.id != id).collect();

        if kept.len() == before {
            return Ok(false);
        }
        self.write_records(&kept)?;
        Ok(true)
    }

    /// Remove every record; returns how many were removed
    pub fn clear(&self) -> Result<usize> {
        let count = self.read_records()?.len();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(count)
    }

    fn sequence_path(&self) -> PathBuf {
        self.path.with_extension("seq")
    }

    fn last_issued_id(&self) -> Result<u64> {
        let path = self.sequence_path();
        if !path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read id sequence '{}'", path.display()))?;
        content.trim().parse().map_err(|e| {
            ScreenerError::Storage(format!("Corrupt id sequence in {}: {}", path.display(), e))
        })
    }

    fn read_records(&self) -> Result<Vec<ScreeningRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read history file '{}'", self.path.display()))?;

        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: ScreeningRecord = serde_json::from_str(line).map_err(|e| {
                ScreenerError::Storage(format!(
                    "Corrupt history entry at {}:{}: {}",
                    self.path.display(),
                    line_no + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        debug!("Loaded {} history records", records.len());
        Ok(records)
    }

    fn write_records(&self, records: &[ScreeningRecord]) -> Result<()> {
        let mut content = String::new();
        for record in records {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }
        fs::write(&self.path, content)
            .with_context(|| format!("Cannot rewrite history file '{}'", self.path.display()))?;
        Ok(())
    }
}
