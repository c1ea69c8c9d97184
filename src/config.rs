//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::processing::catalog::{LevelMultiplierTable, SkillCatalog};
use crate::processing::keywords::MatchStrategy;
use crate::processing::skill_matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub screening: ScreeningConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

/// Everything the screening engine needs; read-only once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreeningConfig {
    pub eligibility: EligibilityConfig,
    pub scoring: ScoringConfig,
    pub catalog: SkillCatalog,
    pub levels: LevelMultiplierTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub threshold: usize,
    pub strategy: MatchStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: u32,
    pub keyword_points: u32,
    pub keyword_cap: u32,
    pub length_threshold: usize,
    pub length_bonus: u32,
    pub section_bonus: u32,
    pub section_markers: Vec<String>,
    pub strategy: MatchStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub history_path: PathBuf,
    pub record_history: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strategy: MatchStrategy::Token,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 60,
            keyword_points: 5,
            keyword_cap: 25,
            length_threshold: 100,
            length_bonus: 10,
            section_bonus: 5,
            section_markers: vec![
                "experience".to_string(),
                "education".to_string(),
                "skills".to_string(),
            ],
            strategy: MatchStrategy::Substring,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let history_path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("history.jsonl");

        Self {
            screening: ScreeningConfig::default(),
            storage: StorageConfig {
                history_path,
                record_history: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.screening.validate()
    }
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = self.levels.invalid_entries();
        if !invalid.is_empty() {
            let listed: Vec<String> = invalid.iter().map(|(k, v)| format!("'{}' = {}", k, v)).collect();
            return Err(ScreenerError::Configuration(format!(
                "Job level multipliers must be positive: {}",
                listed.join(", ")
            )));
        }

        if self.scoring.keyword_cap < self.scoring.keyword_points {
            return Err(ScreenerError::Configuration(format!(
                "Keyword cap ({}) is below the points for a single keyword ({})",
                self.scoring.keyword_cap, self.scoring.keyword_points
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screening.eligibility.threshold, 3);
        assert_eq!(config.screening.scoring.base_score, 60);
        assert_eq!(config.screening.scoring.strategy, MatchStrategy::Substring);
        assert_eq!(config.screening.eligibility.strategy, MatchStrategy::Token);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_threshold_override_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.screening.eligibility.threshold = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.screening.eligibility.threshold, 5);
    }

    #[test]
    fn test_invalid_multiplier_is_rejected() {
        let mut config = ScreeningConfig::default();
        config.levels = LevelMultiplierTable::new([("senior", -1.0)]);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ScreenerError::Configuration(_)));
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "screening = [not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ScreenerError::Configuration(_)));
    }
}
