//! Admin listing of past screenings: console table, JSON and an HTML page

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::storage::history::ScreeningRecord;
use askama::Template;
use colored::Colorize;

/// Askama template for the HTML admin listing
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Screening History</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 2em; color: #333; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border-bottom: 1px solid #e9ecef; padding: 8px; text-align: left; }
        th { background: #f8f9fa; }
        .eligible { color: #28a745; font-weight: bold; }
        .rejected { color: #dc3545; font-weight: bold; }
    </style>
</head>
<body>
    <h1>Resume Screening History</h1>
    <p>{{ total }} record(s), {{ eligible_count }} eligible. Generated {{ generated_at }}.</p>
    <table>
        <thead>
            <tr><th>ID</th><th>Uploaded</th><th>Name</th><th>Email</th><th>File</th><th>Profession</th><th>Level</th><th>Skills</th><th>ATS</th><th>Result</th></tr>
        </thead>
        <tbody>
        {% for row in rows %}
            <tr>
                <td>{{ row.id }}</td>
                <td>{{ row.uploaded }}</td>
                <td>{{ row.name }}</td>
                <td>{{ row.email }}</td>
                <td>{{ row.filename }}</td>
                <td>{{ row.profession }}</td>
                <td>{{ row.job_level }}</td>
                <td>{{ row.match_count }}</td>
                <td>{{ row.ats_score }}</td>
                {% if row.eligible %}<td class="eligible">Eligible</td>{% else %}<td class="rejected">Not Eligible</td>{% endif %}
            </tr>
        {% endfor %}
        </tbody>
    </table>
</body>
</html>"#, ext = "html")]
struct HistoryTemplate {
    total: usize,
    eligible_count: usize,
    generated_at: String,
    rows: Vec<HistoryRow>,
}

struct HistoryRow {
    id: u64,
    uploaded: String,
    name: String,
    email: String,
    filename: String,
    profession: String,
    job_level: String,
    match_count: usize,
    ats_score: u8,
    eligible: bool,
}

impl From<&ScreeningRecord> for HistoryRow {
    fn from(record: &ScreeningRecord) -> Self {
        Self {
            id: record.id,
            uploaded: record.upload_date.format("%Y-%m-%d %H:%M").to_string(),
            name: record.name.clone().unwrap_or_else(|| "-".to_string()),
            email: record.email.clone().unwrap_or_else(|| "-".to_string()),
            filename: record.original_filename.clone(),
            profession: record.profession.clone().unwrap_or_else(|| "-".to_string()),
            job_level: record.job_level.clone().unwrap_or_else(|| "-".to_string()),
            match_count: record.match_count,
            ats_score: record.ats_score,
            eligible: record.eligible,
        }
    }
}

pub struct HistoryFormatter {
    use_colors: bool,
}

impl HistoryFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format(&self, records: &[ScreeningRecord], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.format_console(records)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Html => self.format_html(records),
            OutputFormat::Markdown => Err(ScreenerError::OutputFormatting(
                "Markdown output is only available for screening reports".to_string(),
            )),
        }
    }

    fn format_console(&self, records: &[ScreeningRecord]) -> String {
        if records.is_empty() {
            return "No screenings recorded yet.\n".to_string();
        }

        let mut output = format!(
            "{:>4}  {:<16}  {:<20}  {:<24}  {:>6}  {:>3}  {}\n",
            "ID", "Uploaded", "Name", "File", "Skills", "ATS", "Result"
        );
        for record in records {
            let row = HistoryRow::from(record);
            let verdict = match (row.eligible, self.use_colors) {
                (true, true) => "Eligible".green().to_string(),
                (false, true) => "Not Eligible".red().to_string(),
                (true, false) => "Eligible".to_string(),
                (false, false) => "Not Eligible".to_string(),
            };
            output.push_str(&format!(
                "{:>4}  {:<16}  {:<20}  {:<24}  {:>6}  {:>3}  {}\n",
                row.id,
                row.uploaded,
                clip(&row.name, 20),
                clip(&row.filename, 24),
                row.match_count,
                row.ats_score,
                verdict
            ));
        }
        output
    }

    fn format_html(&self, records: &[ScreeningRecord]) -> Result<String> {
        let template = HistoryTemplate {
            total: records.len(),
            eligible_count: records.iter().filter(|r| r.eligible).count(),
            generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            rows: records.iter().map(HistoryRow::from).collect(),
        };
        Ok(template.render()?)
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
