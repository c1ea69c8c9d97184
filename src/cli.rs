//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screen resumes for required skills and compute an ATS score")]
#[command(long_about = "Extract text from PDF or Word resumes, check them against the required skill set and score them by profession and job level")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen a resume
    Screen {
        /// Path to the stored resume file
        #[arg(short, long)]
        resume: PathBuf,

        /// Original upload name, used to detect the format (defaults to the file name)
        #[arg(short, long)]
        filename: Option<String>,

        /// Target profession, e.g. data-science
        #[arg(short, long)]
        profession: Option<String>,

        /// Job level, e.g. entry, mid, senior
        #[arg(short, long)]
        level: Option<String>,

        /// Candidate name
        #[arg(short, long)]
        name: Option<String>,

        /// Candidate email; enables the notification payload
        #[arg(short, long)]
        email: Option<String>,

        /// Override the required skill threshold
        #[arg(short, long)]
        threshold: Option<usize>,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include the score breakdown and extracted text
        #[arg(short, long)]
        detailed: bool,

        /// Do not record this screening in the history
        #[arg(long)]
        no_history: bool,
    },

    /// Show the skill catalog
    Catalog {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// Screening history (admin listing)
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Required skills for eligibility
    Skills,

    /// Professions and their ATS keywords
    Professions,

    /// Job levels and their multipliers
    Levels,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past screenings, newest first
    List {
        /// Show only eligible candidates
        #[arg(long)]
        eligible_only: bool,

        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: console, json, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show one record including its extracted text
    Show {
        id: u64,
    },

    /// Delete one record
    Delete {
        id: u64,
    },

    /// Delete all records
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}
