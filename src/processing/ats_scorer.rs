//! ATS (Applicant Tracking System) scoring by profession and job level
//!
//! The score starts from a fixed base and earns bonuses for profession
//! keywords, resume length and the presence of common section headings.
//! The sum is then weighted by the job level multiplier and capped at 100.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::catalog::{normalize_key, LevelMultiplierTable, SkillCatalog};
use crate::processing::keywords::{KeywordIndex, MatchStrategy};
use crate::processing::tokenizer::Tokenizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_SCORE: u8 = 100;

/// How a score was put together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub profession: Option<String>,
    pub job_level: Option<String>,
    pub base: u32,
    pub matched_keywords: Vec<String>,
    pub keyword_bonus: u32,
    pub word_count: usize,
    pub length_bonus: u32,
    pub section_bonus: u32,
    pub raw_score: u32,
    pub multiplier: f64,
    pub final_score: u8,
}

/// Scores resume text against the profession keyword catalog
pub struct AtsScorer {
    settings: ScoringConfig,
    levels: LevelMultiplierTable,
    professions: HashMap<String, KeywordIndex>,
    section_markers: Vec<String>,
    tokenizer: Tokenizer,
}

impl AtsScorer {
    pub fn new(settings: ScoringConfig, catalog: &SkillCatalog, levels: LevelMultiplierTable) -> Result<Self> {
        let mut professions = HashMap::new();
        for (profession, keywords) in &catalog.professions {
            professions.insert(normalize_key(profession), KeywordIndex::new(keywords)?);
        }

        let section_markers = settings
            .section_markers
            .iter()
            .map(|m| m.to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Ok(Self {
            settings,
            levels,
            professions,
            section_markers,
            tokenizer: Tokenizer::new(),
        })
    }

    /// Score in [0, 100]; unknown professions and levels degrade gracefully
    pub fn score(&self, raw_text: &str, profession: Option<&str>, job_level: Option<&str>) -> u8 {
        self.breakdown(raw_text, profession, job_level).final_score
    }

    pub fn breakdown(&self, raw_text: &str, profession: Option<&str>, job_level: Option<&str>) -> ScoreBreakdown {
        let text = raw_text.to_lowercase();
        let settings = &self.settings;

        let matched_keywords = match profession.and_then(|p| self.professions.get(&normalize_key(p))) {
            Some(index) => {
                let tokens = match settings.strategy {
                    MatchStrategy::Token => self.tokenizer.tokenize(&text),
                    MatchStrategy::Substring => Default::default(),
                };
                index.find_present(&text, &tokens, settings.strategy)
            }
            None => Vec::new(),
        };
        let matched = u32::try_from(matched_keywords.len()).unwrap_or(u32::MAX);
        let keyword_bonus = settings.keyword_points.saturating_mul(matched).min(settings.keyword_cap);

        let word_count = raw_text.split_whitespace().count();
        let length_bonus = if word_count > settings.length_threshold {
            settings.length_bonus
        } else {
            0
        };

        let section_bonus = if self.section_markers.iter().any(|m| text.contains(m.as_str())) {
            settings.section_bonus
        } else {
            0
        };

        let raw_score = settings
            .base_score
            .saturating_add(keyword_bonus)
            .saturating_add(length_bonus)
            .saturating_add(section_bonus);
        let multiplier = self.levels.multiplier(job_level);
        let weighted = (raw_score as f64 * multiplier).floor();
        let final_score = weighted.clamp(0.0, MAX_SCORE as f64) as u8;

        debug!(
            "ATS score: base {} + keywords {} + length {} + sections {} = {} x {:.2} -> {}",
            settings.base_score, keyword_bonus, length_bonus, section_bonus, raw_score, multiplier, final_score
        );

        ScoreBreakdown {
            profession: profession.map(normalize_key),
            job_level: job_level.map(normalize_key),
            base: settings.base_score,
            matched_keywords,
            keyword_bonus,
            word_count,
            length_bonus,
            section_bonus,
            raw_score,
            multiplier,
            final_score,
        }
    }

    pub fn knows_profession(&self, profession: &str) -> bool {
        self.professions.contains_key(&normalize_key(profession))
    }

    pub fn levels(&self) -> &LevelMultiplierTable {
        &self.levels
    }
}
