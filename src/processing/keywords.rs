//! Keyword presence detection shared by the skill matcher and the ATS scorer

use crate::error::{Result, ScreenerError};
use crate::processing::tokenizer::TokenSet;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a keyword counts as present in a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Whole-token match; multi-word phrases must be contiguous tokens
    Token,
    /// Case-insensitive substring anywhere in the text
    Substring,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Token => write!(f, "token"),
            MatchStrategy::Substring => write!(f, "substring"),
        }
    }
}

/// A fixed list of lowercase keyword phrases with a prebuilt substring matcher
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    keywords: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl KeywordIndex {
    pub fn new(keywords: &[String]) -> Result<Self> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        // Standard match kind so overlapping keywords ("sql" inside "postgresql")
        // are each reported.
        let matcher = if keywords.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&keywords)
                    .map_err(|e| {
                        ScreenerError::Configuration(format!("Failed to build keyword matcher: {}", e))
                    })?,
            )
        };

        Ok(Self { keywords, matcher })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords present in `text`, in index order.
    ///
    /// `text` must already be lowercase for the token strategy; the substring
    /// strategy also tolerates ASCII case differences.
    pub fn find_present(&self, text: &str, tokens: &TokenSet, strategy: MatchStrategy) -> Vec<String> {
        match strategy {
            MatchStrategy::Token => self
                .keywords
                .iter()
                .filter(|k| tokens.contains_phrase(k))
                .cloned()
                .collect(),
            MatchStrategy::Substring => {
                let Some(matcher) = &self.matcher else {
                    return Vec::new();
                };
                let mut seen = vec![false; self.keywords.len()];
                for mat in matcher.find_overlapping_iter(text) {
                    seen[mat.pattern().as_usize()] = true;
                }
                self.keywords
                    .iter()
                    .zip(seen)
                    .filter_map(|(k, hit)| hit.then(|| k.clone()))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tokenizer::Tokenizer;

    fn index(keywords: &[&str]) -> KeywordIndex {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        KeywordIndex::new(&keywords).unwrap()
    }

    #[test]
    fn test_substring_counts_overlapping_keywords() {
        let index = index(&["sql", "postgresql", "python"]);
        let text = "worked with postgresql daily";
        let tokens = Tokenizer::new().tokenize(text);

        let present = index.find_present(text, &tokens, MatchStrategy::Substring);
        assert_eq!(present, vec!["sql".to_string(), "postgresql".to_string()]);
    }

    #[test]
    fn test_token_strategy_requires_whole_words() {
        let index = index(&["sql", "postgresql", "machine learning"]);
        let text = "postgresql and machine learning";
        let tokens = Tokenizer::new().tokenize(text);

        let present = index.find_present(text, &tokens, MatchStrategy::Token);
        assert_eq!(present, vec!["postgresql".to_string(), "machine learning".to_string()]);
    }

    #[test]
    fn test_substring_ignores_ascii_case() {
        let index = index(&["Pandas"]);
        let text = "PANDAS and numpy";
        let tokens = Tokenizer::new().tokenize(text);
        assert_eq!(index.find_present(text, &tokens, MatchStrategy::Substring).len(), 1);
    }

    #[test]
    fn test_empty_index_matches_nothing() {
        let index = index(&[]);
        let tokens = Tokenizer::new().tokenize("anything");
        assert!(index.is_empty());
        assert!(index.find_present("anything", &tokens, MatchStrategy::Substring).is_empty());
        assert!(index.find_present("anything", &tokens, MatchStrategy::Token).is_empty());
    }
}
