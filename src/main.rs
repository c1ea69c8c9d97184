//! Resume screener: skill eligibility and ATS scoring for uploaded resumes

use clap::Parser;
use log::{error, info, warn};
use resume_screener::cli::{self, CatalogAction, Cli, Commands, ConfigAction, HistoryAction};
use resume_screener::config::Config;
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{save_report_to_file, truncate_text};
use resume_screener::output::history_page::HistoryFormatter;
use resume_screener::output::{Candidate, ReportGenerator};
use resume_screener::pipeline::{self, ScreeningRequest};
use resume_screener::storage::HistoryStore;
use resume_screener::{Result, ScreenerError, Screener};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let use_colors = config.output.color_output && !cli.no_color;
    if let Err(e) = run_command(cli, config, use_colors).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, config: Config, use_colors: bool) -> Result<()> {
    match cli.command {
        Commands::Screen {
            resume,
            filename,
            profession,
            level,
            name,
            email,
            threshold,
            output,
            save,
            detailed,
            no_history,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let candidate = Candidate::new(name, email)?;
            let screener = Screener::new(&config.screening)?;

            if let Some(profession) = &profession {
                if !screener.scorer().knows_profession(profession) {
                    warn!("Unknown profession '{}'; no keyword bonus will apply", profession);
                }
            }
            if let Some(level) = &level {
                if !screener.scorer().levels().contains(level) {
                    warn!("Unknown job level '{}'; using multiplier 1.0", level);
                }
            }

            info!("Screening resume {}", resume.display());
            let request = ScreeningRequest {
                resume_path: resume,
                original_filename: filename,
                profession,
                job_level: level,
                candidate,
                threshold,
            };
            let report = pipeline::screen(&screener, &InputManager::new(), request).await?;

            let generator = ReportGenerator::with_options(use_colors && save.is_none(), detailed, true);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if config.storage.record_history && !no_history {
                let store = HistoryStore::new(&config.storage.history_path);
                let record = store.append(&report)?;
                info!("Recorded screening #{}", record.id);
            }
        }

        Commands::Catalog { action } => {
            let catalog = config.screening.catalog.normalized();

            if matches!(action, None | Some(CatalogAction::Skills)) {
                println!("Required skills (eligible at {} or more):", config.screening.eligibility.threshold);
                for skill in catalog.required() {
                    println!("  • {}", skill);
                }
            }

            if matches!(action, None | Some(CatalogAction::Professions)) {
                println!("\nProfessions:");
                for profession in catalog.profession_names() {
                    println!(
                        "  • {}: {}",
                        profession,
                        catalog.profession_keywords(Some(profession)).join(", ")
                    );
                }
            }

            if matches!(action, None | Some(CatalogAction::Levels)) {
                println!("\nJob levels:");
                for (level, multiplier) in config.screening.levels.iter() {
                    println!("  • {}: x{:.1}", level, multiplier);
                }
            }
        }

        Commands::History { action } => {
            let store = HistoryStore::new(&config.storage.history_path);

            match action {
                HistoryAction::List { eligible_only, limit, output, save } => {
                    let format = cli::parse_output_format(&output).map_err(ScreenerError::InvalidInput)?;

                    let mut records = store.list()?;
                    if eligible_only {
                        records.retain(|r| r.eligible);
                    }
                    if let Some(limit) = limit {
                        records.truncate(limit);
                    }

                    let rendered = HistoryFormatter::new(use_colors && save.is_none()).format(&records, &format)?;
                    match save {
                        Some(path) => {
                            save_report_to_file(&rendered, &path)?;
                            println!("History saved to {}", path.display());
                        }
                        None => print!("{}", rendered),
                    }
                }

                HistoryAction::Show { id } => {
                    let record = store
                        .get(id)?
                        .ok_or_else(|| ScreenerError::InvalidInput(format!("No screening with id {}", id)))?;

                    println!("Screening #{}", record.id);
                    println!("Uploaded: {}", record.upload_date.format("%Y-%m-%d %H:%M:%S UTC"));
                    println!("File: {} (stored as {})", record.original_filename, record.filename);
                    println!("Name: {}", record.name.as_deref().unwrap_or("-"));
                    println!("Email: {}", record.email.as_deref().unwrap_or("-"));
                    println!("Profession: {}", record.profession.as_deref().unwrap_or("-"));
                    println!("Job level: {}", record.job_level.as_deref().unwrap_or("-"));
                    println!(
                        "Result: {} ({} skills, ATS {})",
                        if record.eligible { "Eligible" } else { "Not Eligible" },
                        record.match_count,
                        record.ats_score
                    );
                    println!("\n{}", truncate_text(&record.resume_text, 2000));
                }

                HistoryAction::Delete { id } => {
                    if store.delete(id)? {
                        println!("Deleted screening #{}", id);
                    } else {
                        return Err(ScreenerError::InvalidInput(format!("No screening with id {}", id)));
                    }
                }

                HistoryAction::Clear => {
                    let removed = store.clear()?;
                    println!("Removed {} screening record(s)", removed);
                }
            }
        }

        Commands::Config { action } => {
            let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                    println!("# {}\n{}", config_path.display(), content);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&config_path)?;
                    println!("Configuration reset: {}", config_path.display());
                }
            }
        }
    }

    Ok(())
}
