//! Required-skill matching and the eligibility verdict

use crate::error::Result;
use crate::processing::keywords::{KeywordIndex, MatchStrategy};
use crate::processing::tokenizer::{TokenSet, Tokenizer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_THRESHOLD: usize = 3;

/// Outcome of matching one resume against the required skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub eligible: bool,
    pub match_count: usize,
    pub threshold: usize,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Matches resume text against a fixed required-skill set
pub struct SkillMatcher {
    index: KeywordIndex,
    strategy: MatchStrategy,
    threshold: usize,
    tokenizer: Tokenizer,
}

/// Count the required skills present in `tokens` and compare with `threshold`.
///
/// An empty required set is never eligible, whatever the threshold.
pub fn is_eligible<'a, I>(tokens: &TokenSet, required_skills: I, threshold: usize) -> (bool, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let required: BTreeSet<String> = required_skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let match_count = required.iter().filter(|s| tokens.contains_phrase(s)).count();
    (meets_threshold(required.len(), match_count, threshold), match_count)
}

/// The eligibility rule shared by `is_eligible` and `SkillMatcher`
fn meets_threshold(required_count: usize, match_count: usize, threshold: usize) -> bool {
    required_count > 0 && match_count >= threshold
}

impl SkillMatcher {
    pub fn new(required: &BTreeSet<String>, strategy: MatchStrategy, threshold: usize) -> Result<Self> {
        let required: Vec<String> = required.iter().cloned().collect();
        Ok(Self {
            index: KeywordIndex::new(&required)?,
            strategy,
            threshold,
            tokenizer: Tokenizer::new(),
        })
    }

    /// Match normalized text using the configured threshold
    pub fn match_text(&self, text: &str) -> SkillMatch {
        let tokens = self.tokenizer.tokenize(text);
        self.match_tokens(text, &tokens, self.threshold)
    }

    /// Match with an explicit threshold, for callers that override the default
    pub fn match_tokens(&self, text: &str, tokens: &TokenSet, threshold: usize) -> SkillMatch {
        let matched_skills = self.index.find_present(text, tokens, self.strategy);
        let match_count = matched_skills.len();
        let eligible = meets_threshold(self.index.len(), match_count, threshold);

        let missing_skills = self
            .index
            .keywords()
            .iter()
            .filter(|k| !matched_skills.contains(k))
            .cloned()
            .collect();

        debug!(
            "Skill match ({} strategy): {}/{} required skills, threshold {}, eligible: {}",
            self.strategy,
            match_count,
            self.index.len(),
            threshold,
            eligible
        );

        SkillMatch {
            eligible,
            match_count,
            threshold,
            matched_skills,
            missing_skills,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn required_count(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::SkillCatalog;

    fn default_matcher(threshold: usize) -> SkillMatcher {
        let catalog = SkillCatalog::default();
        SkillMatcher::new(catalog.required(), MatchStrategy::Token, threshold).unwrap()
    }

    #[test]
    fn test_three_skills_are_eligible() {
        let matcher = default_matcher(DEFAULT_THRESHOLD);
        let result = matcher.match_text("built apis with python, flask and sql");

        assert_eq!(result.match_count, 3);
        assert!(result.eligible);
        assert_eq!(result.matched_skills, vec!["flask", "python", "sql"]);
        assert_eq!(result.missing_skills.len(), 4);
    }

    #[test]
    fn test_two_skills_are_not_eligible() {
        let matcher = default_matcher(DEFAULT_THRESHOLD);
        let result = matcher.match_text("python and html only");

        assert_eq!(result.match_count, 2);
        assert!(!result.eligible);
    }

    #[test]
    fn test_threshold_edges() {
        let text = "python flask sql";
        let tokens = Tokenizer::new().tokenize(text);
        let matcher = default_matcher(DEFAULT_THRESHOLD);

        assert!(matcher.match_tokens(text, &tokens, 2).eligible);
        assert!(matcher.match_tokens(text, &tokens, 3).eligible);
        assert!(!matcher.match_tokens(text, &tokens, 4).eligible);
    }

    #[test]
    fn test_multi_word_skills_count() {
        let matcher = default_matcher(DEFAULT_THRESHOLD);
        let result = matcher.match_text("machine learning, data analysis and css");

        assert_eq!(result.match_count, 3);
        assert!(result.eligible);
    }

    #[test]
    fn test_token_strategy_ignores_embedded_words() {
        let matcher = default_matcher(1);
        let result = matcher.match_text("mysql and pythonic code");
        assert_eq!(result.match_count, 0);
    }

    #[test]
    fn test_substring_strategy_counts_embedded_words() {
        let catalog = SkillCatalog::default();
        let matcher = SkillMatcher::new(catalog.required(), MatchStrategy::Substring, 1).unwrap();
        let result = matcher.match_text("mysql and pythonic code");
        assert_eq!(result.matched_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_empty_required_set_is_never_eligible() {
        let matcher = SkillMatcher::new(&BTreeSet::new(), MatchStrategy::Token, 0).unwrap();
        let result = matcher.match_text("python flask sql");
        assert_eq!(result.match_count, 0);
        assert!(!result.eligible);

        let tokens = Tokenizer::new().tokenize("python");
        assert_eq!(is_eligible(&tokens, Vec::<&str>::new(), 0), (false, 0));
    }

    #[test]
    fn test_is_eligible_matches_intersection_size() {
        let tokens = Tokenizer::new().tokenize("python flask sql docker");
        let required = ["Python", "FLASK", "sql", "css", "machine learning"];

        for k in 0..6 {
            let (eligible, count) = is_eligible(&tokens, required.iter().copied(), k);
            assert_eq!(count, 3);
            assert_eq!(eligible, count >= k);
        }
    }

    #[test]
    fn test_eligibility_is_monotonic_in_threshold() {
        let tokens = Tokenizer::new().tokenize("python html css machine learning");
        let required = ["python", "flask", "sql", "machine learning", "html", "css", "data analysis"];

        let mut previous = true;
        for k in 0..10 {
            let (eligible, _) = is_eligible(&tokens, required.iter().copied(), k);
            assert!(previous || !eligible);
            previous = eligible;
        }
    }

    #[test]
    fn test_free_function_agrees_with_token_matcher() {
        let catalog = SkillCatalog::default();
        let tokenizer = Tokenizer::new();
        let texts = [
            "python flask sql",
            "python and html",
            "machine learning with python, css and data analysis",
            "",
        ];

        for threshold in 0..=4 {
            let matcher = default_matcher(threshold);
            for text in texts {
                let tokens = tokenizer.tokenize(text);
                let from_matcher = matcher.match_tokens(text, &tokens, threshold);
                let (eligible, count) =
                    is_eligible(&tokens, catalog.required().iter().map(String::as_str), threshold);
                assert_eq!((eligible, count), (from_matcher.eligible, from_matcher.match_count), "{:?}", text);
            }
        }

        let tokens = tokenizer.tokenize("python");
        assert_eq!(is_eligible(&tokens, Vec::<&str>::new(), 0), (false, 0));
    }
}
