//! Screening engine combining skill eligibility and ATS scoring

use crate::config::ScreeningConfig;
use crate::error::Result;
use crate::input::text_extractor::ExtractedDocument;
use crate::processing::ats_scorer::{AtsScorer, ScoreBreakdown};
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

/// Verdict and score for one resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub eligible: bool,
    pub match_count: usize,
    pub threshold: usize,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub ats_score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Holds the matcher and scorer built from one immutable configuration.
///
/// Evaluation takes `&self` only, so a single screener can be shared across
/// threads behind an `Arc`.
pub struct Screener {
    tokenizer: Tokenizer,
    matcher: SkillMatcher,
    scorer: AtsScorer,
}

impl Screener {
    pub fn new(config: &ScreeningConfig) -> Result<Self> {
        config.validate()?;
        let catalog = config.catalog.normalized();

        let matcher = SkillMatcher::new(
            catalog.required(),
            config.eligibility.strategy,
            config.eligibility.threshold,
        )?;
        let scorer = AtsScorer::new(config.scoring.clone(), &catalog, config.levels.clone())?;

        Ok(Self {
            tokenizer: Tokenizer::new(),
            matcher,
            scorer,
        })
    }

    pub fn evaluate(&self, text: &str, profession: Option<&str>, job_level: Option<&str>) -> EvaluationResult {
        self.evaluate_with_threshold(text, profession, job_level, self.matcher.threshold())
    }

    pub fn evaluate_with_threshold(
        &self,
        text: &str,
        profession: Option<&str>,
        job_level: Option<&str>,
        threshold: usize,
    ) -> EvaluationResult {
        let text = text.to_lowercase();
        let tokens = self.tokenizer.tokenize(&text);
        let skills = self.matcher.match_tokens(&text, &tokens, threshold);
        let breakdown = self.scorer.breakdown(&text, profession, job_level);

        EvaluationResult {
            eligible: skills.eligible,
            match_count: skills.match_count,
            threshold: skills.threshold,
            matched_skills: skills.matched_skills,
            missing_skills: skills.missing_skills,
            ats_score: breakdown.final_score,
            breakdown,
        }
    }

    pub fn evaluate_document(
        &self,
        document: &ExtractedDocument,
        profession: Option<&str>,
        job_level: Option<&str>,
    ) -> EvaluationResult {
        self.evaluate(&document.normalized_text, profession, job_level)
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    pub fn scorer(&self) -> &AtsScorer {
        &self.scorer
    }
}
