//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::ScreeningReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_text: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_verdict(&self, eligible: bool) -> String {
        match (eligible, self.use_colors) {
            (true, true) => "✅ Eligible".green().bold().to_string(),
            (false, true) => "❌ Not Eligible".red().bold().to_string(),
            (true, false) => "Eligible".to_string(),
            (false, false) => "Not Eligible".to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let breakdown = &evaluation.breakdown;
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME SCREENING RESULT"));
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "Resume: {} ({})\n",
            report.original_filename, report.source_format
        ));
        if let Some(profession) = &report.profession {
            output.push_str(&format!("Profession: {}\n", profession));
        }
        if let Some(level) = &report.job_level {
            output.push_str(&format!("Job level: {}\n", level));
        }

        output.push_str(&format!(
            "\n{}, your result is: {}\n",
            report.candidate.display_name(),
            self.format_verdict(evaluation.eligible)
        ));
        output.push_str(&format!(
            "Required skills matched: {} (threshold {})\n",
            evaluation.match_count, evaluation.threshold
        ));
        if !evaluation.matched_skills.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("✓", Color::Green),
                evaluation.matched_skills.join(", ")
            ));
        }
        if !evaluation.missing_skills.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("✗", Color::Red),
                evaluation.missing_skills.join(", ")
            ));
        }

        output.push_str(&format!(
            "\nATS score: {}/100 {}\n",
            evaluation.ats_score,
            self.format_score_badge(evaluation.ats_score)
        ));

        if self.detailed {
            output.push_str(&self.format_header("📊 SCORE BREAKDOWN"));
            output.push_str(&format!("  Base:              {}\n", breakdown.base));
            output.push_str(&format!(
                "  Keywords:         +{} ({})\n",
                breakdown.keyword_bonus,
                if breakdown.matched_keywords.is_empty() {
                    "none".to_string()
                } else {
                    breakdown.matched_keywords.join(", ")
                }
            ));
            output.push_str(&format!(
                "  Length:           +{} ({} words)\n",
                breakdown.length_bonus, breakdown.word_count
            ));
            output.push_str(&format!("  Sections:         +{}\n", breakdown.section_bonus));
            output.push_str(&format!(
                "  Raw score:         {} x {:.2}\n",
                breakdown.raw_score, breakdown.multiplier
            ));

            output.push_str(&self.format_header("📝 EXTRACTED TEXT"));
            output.push_str(&truncate_text(&report.resume_text, 600));
            output.push('\n');
        }

        if let Some(notification) = &report.notification {
            output.push_str(&format!(
                "\n{} Notification ready for {}\n",
                self.colorize("✉", Color::Cyan),
                notification.recipient_email
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new(include_text: bool) -> Self {
        Self { include_text }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let breakdown = &evaluation.breakdown;
        let mut content = String::new();

        content.push_str("# Resume Screening Result\n\n");
        content.push_str(&format!("**{}**\n\n", report.verdict_message()));

        content.push_str("| Field | Value |\n|---|---|\n");
        content.push_str(&format!("| Resume | {} ({}) |\n", report.original_filename, report.source_format));
        content.push_str(&format!(
            "| Profession | {} |\n",
            report.profession.as_deref().unwrap_or("-")
        ));
        content.push_str(&format!("| Job level | {} |\n", report.job_level.as_deref().unwrap_or("-")));
        content.push_str(&format!(
            "| Skills matched | {} / threshold {} |\n",
            evaluation.match_count, evaluation.threshold
        ));
        content.push_str(&format!("| ATS score | {} |\n", evaluation.ats_score));
        content.push_str(&format!(
            "| Generated | {} |\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        content.push_str("## Skills\n\n");
        for skill in &evaluation.matched_skills {
            content.push_str(&format!("- [x] {}\n", skill));
        }
        for skill in &evaluation.missing_skills {
            content.push_str(&format!("- [ ] {}\n", skill));
        }

        content.push_str("\n## Score Breakdown\n\n");
        content.push_str(&format!("- Base: {}\n", breakdown.base));
        content.push_str(&format!(
            "- Profession keywords: +{} ({})\n",
            breakdown.keyword_bonus,
            breakdown.matched_keywords.join(", ")
        ));
        content.push_str(&format!(
            "- Length: +{} ({} words)\n",
            breakdown.length_bonus, breakdown.word_count
        ));
        content.push_str(&format!("- Sections: +{}\n", breakdown.section_bonus));
        content.push_str(&format!(
            "- Level multiplier: x{:.2} on {}\n",
            breakdown.multiplier, breakdown.raw_score
        ));

        if self.include_text {
            content.push_str("\n## Extracted Text\n\n```text\n");
            content.push_str(&report.resume_text);
            if !report.resume_text.ends_with('\n') {
                content.push('\n');
            }
            content.push_str("```\n");
        }

        Ok(content)
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => Err(ScreenerError::OutputFormatting(
                "HTML output is only available for history listings".to_string(),
            )),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    // Cut at the last word boundary when there is one
    match truncated.rfind(char::is_whitespace) {
        Some(end) if end > 0 => format!("{}...", &truncated[..end]),
        _ => format!("{}...", truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreeningConfig;
    use crate::input::file_detector::DocumentFormat;
    use crate::output::report::Candidate;
    use crate::processing::screener::Screener;

    fn sample_report() -> ScreeningReport {
        let screener = Screener::new(&ScreeningConfig::default()).unwrap();
        let text = "skills: python, flask, sql and pandas";
        ScreeningReport::new(
            Candidate::new(Some("Ada".into()), Some("ada@example.com".into())).unwrap(),
            "uploads/ada.pdf".to_string(),
            "ada.pdf".to_string(),
            DocumentFormat::Pdf,
            Some("data-science".to_string()),
            Some("senior".to_string()),
            screener.evaluate(text, Some("data-science"), Some("senior")),
            text.to_string(),
        )
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();
        assert!(output.contains("Ada, your result is: Eligible"));
        assert!(output.contains("ATS score: 100/100 [EXCELLENT]"));
        assert!(output.contains("SCORE BREAKDOWN"));
        assert!(output.contains("Notification ready for ada@example.com"));
    }

    #[test]
    fn test_json_output_round_trips_fields() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["evaluation"]["eligible"], true);
        assert_eq!(value["evaluation"]["ats_score"], 100);
        assert_eq!(value["notification"]["recipient_email"], "ada@example.com");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        assert!(output.starts_with("# Resume Screening Result"));
        assert!(output.contains("- [x] python"));
        assert!(output.contains("- [ ] css"));
        assert!(output.contains("```text\nskills: python"));
    }

    #[test]
    fn test_html_is_not_a_report_format() {
        let err = ReportGenerator::with_options(false, false, true)
            .generate_report(&sample_report(), &OutputFormat::Html)
            .unwrap_err();
        assert!(matches!(err, ScreenerError::OutputFormatting(_)));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("python flask sql", 12), "python...");
        assert_eq!(truncate_text("résumé", 3), "rés...");
    }
}
