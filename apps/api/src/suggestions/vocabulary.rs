//! Word lists that drive the writing critique.
//!
//! Loaded once at startup (built-in defaults, or a JSON override file) and
//! shared read-only through `Arc<SuggestionVocabulary>`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const WEAK_PHRASES: &[&str] = &["did", "made", "worked on", "helped with", "responsible for"];

const LEADERSHIP_VERBS: &[&str] = &[
    "Led",
    "Managed",
    "Directed",
    "Spearheaded",
    "Orchestrated",
    "Oversaw",
    "Supervised",
    "Guided",
    "Mentored",
    "Cultivated",
];

const TECHNICAL_VERBS: &[&str] = &[
    "Developed",
    "Implemented",
    "Engineered",
    "Architected",
    "Optimized",
    "Debugged",
    "Automated",
    "Streamlined",
    "Designed",
    "Integrated",
];

const ACHIEVEMENT_VERBS: &[&str] = &[
    "Achieved",
    "Increased",
    "Reduced",
    "Improved",
    "Enhanced",
    "Accelerated",
    "Generated",
    "Delivered",
    "Exceeded",
    "Maximized",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionVocabulary {
    /// Matched case-insensitively anywhere in the text.
    pub weak_phrases: Vec<String>,
    /// Action verbs, matched as written (capitalised sentence openers).
    pub leadership_verbs: Vec<String>,
    pub technical_verbs: Vec<String>,
    pub achievement_verbs: Vec<String>,
}

impl Default for SuggestionVocabulary {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }
        Self {
            weak_phrases: owned(WEAK_PHRASES),
            leadership_verbs: owned(LEADERSHIP_VERBS),
            technical_verbs: owned(TECHNICAL_VERBS),
            achievement_verbs: owned(ACHIEVEMENT_VERBS),
        }
    }
}

impl SuggestionVocabulary {
    /// Reads a vocabulary override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))
    }

    /// Every action verb across the three vocabularies.
    pub fn action_verbs(&self) -> impl Iterator<Item = &str> {
        self.leadership_verbs
            .iter()
            .chain(&self.technical_verbs)
            .chain(&self.achievement_verbs)
            .map(String::as_str)
    }
}
