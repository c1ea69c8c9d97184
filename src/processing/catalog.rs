//! Skill catalog and job level multipliers
//!
//! Both tables are plain configuration values: they are deserialized once at
//! startup (or built directly in tests) and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Required skills for eligibility plus per-profession keywords for ATS scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub required: BTreeSet<String>,
    pub professions: BTreeMap<String, Vec<String>>,
}

/// Job level key to score multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelMultiplierTable(BTreeMap<String, f64>);

impl SkillCatalog {
    pub fn new<R, S>(required: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            required: required
                .into_iter()
                .filter_map(|s| normalize_phrase(s.as_ref()))
                .collect(),
            professions: BTreeMap::new(),
        }
    }

    pub fn with_profession<K, S>(mut self, profession: &str, keywords: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = Vec::new();
        for keyword in keywords {
            if let Some(phrase) = normalize_phrase(keyword.as_ref()) {
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
        }
        self.professions.insert(normalize_key(profession), phrases);
        self
    }

    /// Lowercase every phrase and key, dropping blanks and duplicates.
    ///
    /// Hand-edited config files may carry mixed case; every consumer works
    /// on the normalized form.
    pub fn normalized(&self) -> Self {
        let mut catalog = SkillCatalog::new(&self.required);
        for (profession, keywords) in &self.professions {
            catalog = catalog.with_profession(profession, keywords);
        }
        catalog
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Keywords for a profession, empty for unknown or missing keys
    pub fn profession_keywords(&self, profession: Option<&str>) -> &[String] {
        profession
            .and_then(|p| self.professions.get(&normalize_key(p)))
            .map(|k| k.as_slice())
            .unwrap_or(&[])
    }

    pub fn profession_names(&self) -> impl Iterator<Item = &str> {
        self.professions.keys().map(|k| k.as_str())
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        SkillCatalog::new([
            "python",
            "flask",
            "sql",
            "machine learning",
            "html",
            "css",
            "data analysis",
        ])
        .with_profession(
            "data-science",
            [
                "python",
                "pandas",
                "sql",
                "machine learning",
                "statistics",
                "tensorflow",
                "data visualization",
            ],
        )
        .with_profession(
            "software-engineering",
            [
                "java",
                "python",
                "javascript",
                "git",
                "docker",
                "algorithms",
                "rest api",
            ],
        )
        .with_profession(
            "web-development",
            [
                "html",
                "css",
                "javascript",
                "react",
                "node.js",
                "flask",
                "responsive design",
            ],
        )
        .with_profession(
            "devops",
            [
                "linux",
                "docker",
                "kubernetes",
                "aws",
                "terraform",
                "ci/cd",
                "monitoring",
            ],
        )
        .with_profession(
            "product-management",
            [
                "roadmap",
                "stakeholder",
                "agile",
                "user research",
                "analytics",
                "prioritization",
                "jira",
            ],
        )
        .with_profession(
            "design",
            [
                "figma",
                "user experience",
                "prototyping",
                "wireframe",
                "typography",
                "adobe",
                "accessibility",
            ],
        )
    }
}

impl LevelMultiplierTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (normalize_key(k.as_ref()), v))
                .collect(),
        )
    }

    /// Multiplier for a job level; unknown or missing levels weigh 1.0
    pub fn multiplier(&self, level: Option<&str>) -> f64 {
        level
            .and_then(|l| self.0.get(&normalize_key(l)))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn contains(&self, level: &str) -> bool {
        self.0.contains_key(&normalize_key(level))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Levels whose multiplier is not a finite positive number
    pub fn invalid_entries(&self) -> Vec<(&str, f64)> {
        self.iter()
            .filter(|(k, v)| k.is_empty() || !v.is_finite() || *v <= 0.0)
            .collect()
    }
}

impl Default for LevelMultiplierTable {
    fn default() -> Self {
        LevelMultiplierTable::new([
            ("entry", 1.0),
            ("junior", 1.1),
            ("mid", 1.2),
            ("senior", 1.4),
            ("lead", 1.6),
            ("executive", 1.8),
        ])
    }
}

/// Normalize a lookup key such as a profession or job level
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn normalize_phrase(phrase: &str) -> Option<String> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.required().len(), 7);
        assert!(catalog.required().contains("machine learning"));
        assert_eq!(catalog.profession_keywords(Some("data-science")).len(), 7);
    }

    #[test]
    fn test_unknown_profession_has_no_keywords() {
        let catalog = SkillCatalog::default();
        assert!(catalog.profession_keywords(Some("astronomy")).is_empty());
        assert!(catalog.profession_keywords(None).is_empty());
    }

    #[test]
    fn test_profession_lookup_ignores_case() {
        let catalog = SkillCatalog::default();
        assert_eq!(
            catalog.profession_keywords(Some("  Data-Science ")),
            catalog.profession_keywords(Some("data-science"))
        );
    }

    #[test]
    fn test_normalization_lowercases_and_dedups() {
        let catalog = SkillCatalog {
            required: ["Python", "  SQL ", "", "python"].iter().map(|s| s.to_string()).collect(),
            professions: [("DevOps".to_string(), vec!["Docker".to_string(), "docker".to_string()])]
                .into_iter()
                .collect(),
        }
        .normalized();

        assert_eq!(catalog.required().len(), 2);
        assert!(catalog.required().contains("sql"));
        assert_eq!(catalog.profession_keywords(Some("devops")), &["docker".to_string()]);
    }

    #[test]
    fn test_level_multipliers() {
        let levels = LevelMultiplierTable::default();
        assert_eq!(levels.multiplier(Some("senior")), 1.4);
        assert_eq!(levels.multiplier(Some("EXECUTIVE")), 1.8);
        assert_eq!(levels.multiplier(Some("unknown-level")), 1.0);
        assert_eq!(levels.multiplier(None), 1.0);
        assert!(levels.invalid_entries().is_empty());
    }

    #[test]
    fn test_invalid_multipliers_are_reported() {
        let levels = LevelMultiplierTable::new([("intern", 0.0), ("mid", 1.2), ("chief", f64::NAN)]);
        let invalid: Vec<&str> = levels.invalid_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(invalid, vec!["chief", "intern"]);
    }
}
