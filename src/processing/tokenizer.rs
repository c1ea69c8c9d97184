//! Word tokenization over normalized resume text

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text on Unicode word boundaries
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

/// Distinct lowercase tokens of a text, plus the order they appeared in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    tokens: HashSet<String>,
    sequence: Vec<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(&self, text: &str) -> TokenSet {
        let sequence = self.words(text);
        let tokens = sequence.iter().cloned().collect();
        TokenSet { tokens, sequence }
    }

    /// Lowercased words in document order, duplicates kept
    pub fn words(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|w| w.to_lowercase()).collect()
    }
}

impl TokenSet {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Whether a skill phrase occurs in the text.
    ///
    /// Single-word phrases are plain set membership. Multi-word phrases
    /// ("machine learning") must appear as a contiguous run of tokens.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let words = Tokenizer.words(phrase);
        match words.as_slice() {
            [] => false,
            [single] => self.tokens.contains(single),
            _ => self
                .sequence
                .windows(words.len())
                .any(|window| window == words.as_slice()),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization_collapses_duplicates() {
        let tokens = Tokenizer::new().tokenize("python, Python and SQL; python!");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("python"));
        assert!(tokens.contains("sql"));
        assert!(tokens.contains("and"));
        assert_eq!(tokens.sequence().len(), 5);
    }

    #[test]
    fn test_punctuation_is_not_part_of_tokens() {
        let tokens = Tokenizer::new().tokenize("skills: flask/sql (html)");
        assert!(tokens.contains("flask"));
        assert!(tokens.contains("sql"));
        assert!(tokens.contains("html"));
        assert!(!tokens.contains("skills:"));
    }

    #[test]
    fn test_multi_word_phrase_matching() {
        let tokens = Tokenizer::new().tokenize("experienced in machine learning and data\nanalysis");
        assert!(tokens.contains_phrase("machine learning"));
        assert!(tokens.contains_phrase("data analysis"));
        assert!(!tokens.contains_phrase("learning machine"));
        assert!(!tokens.contains("machine learning"));
    }

    #[test]
    fn test_phrase_must_be_whole_tokens() {
        let tokens = Tokenizer::new().tokenize("mysql postgresql");
        assert!(!tokens.contains_phrase("sql"));
        assert!(tokens.contains_phrase("mysql"));
        assert!(!tokens.contains_phrase(""));
    }

    #[test]
    fn test_deterministic() {
        let text = "rust python go rust c";
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }
}
