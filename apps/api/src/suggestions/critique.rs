//! Writing critique: deterministic suggestions for free-text fields.
//!
//! Pure containment tests: no scoring, no fuzzy matching. The general critique
//! is driven by an injected [`SuggestionVocabulary`]; the field-specific
//! critiques use fixed patterns.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::suggestions::vocabulary::SuggestionVocabulary;

/// Which rule set to apply to a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CritiqueKind {
    #[default]
    General,
    Summary,
    Skills,
    Education,
    Certifications,
}

/// General statement critique.
///
/// Output order: one entry per weak phrase found (vocabulary order), then the
/// missing-metrics hint, then the action-verb hint.
pub fn critique(vocab: &SuggestionVocabulary, text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut suggestions = Vec::new();

    for phrase in &vocab.weak_phrases {
        if lower.contains(&phrase.to_lowercase()) {
            suggestions.push(format!(
                "Consider replacing \"{phrase}\" with a stronger action verb"
            ));
        }
    }

    if !has_metric(text) {
        suggestions
            .push("Add specific metrics or numbers to quantify your achievement".to_string());
    }

    if !vocab.action_verbs().any(|verb| text.contains(verb)) {
        suggestions.push("Start with a strong action verb".to_string());
    }

    suggestions
}

/// Dispatches to the rule set for `kind`.
pub fn critique_as(kind: CritiqueKind, vocab: &SuggestionVocabulary, text: &str) -> Vec<String> {
    match kind {
        CritiqueKind::General => critique(vocab, text),
        CritiqueKind::Summary => critique_summary(text),
        CritiqueKind::Skills => critique_skills(text),
        CritiqueKind::Education => critique_education(text),
        CritiqueKind::Certifications => critique_certifications(text),
    }
}

fn has_metric(text: &str) -> bool {
    text.contains('%') || text.chars().any(|c| c.is_ascii_digit())
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("critique patterns are valid"))
}

const MIN_SUMMARY_CHARS: usize = 100;

fn critique_summary(text: &str) -> Vec<String> {
    static EXPERTISE: OnceLock<Regex> = OnceLock::new();
    static CONTRIBUTION: OnceLock<Regex> = OnceLock::new();

    let mut suggestions = Vec::new();
    if !has_metric(text) {
        suggestions.push("Include specific metrics or quantifiable achievements".to_string());
    }
    if !pattern(&EXPERTISE, r"(?i)(expertise|experience|background) in").is_match(text) {
        suggestions.push("Mention your expertise areas or relevant experience".to_string());
    }
    if !pattern(&CONTRIBUTION, r"(?i)(led|managed|developed|implemented|created)").is_match(text)
    {
        suggestions.push("Include leadership or major project contributions".to_string());
    }
    if text.chars().count() < MIN_SUMMARY_CHARS {
        suggestions
            .push("Consider expanding your summary to highlight more key achievements".to_string());
    }
    suggestions
}

fn critique_skills(text: &str) -> Vec<String> {
    static YEARS: OnceLock<Regex> = OnceLock::new();
    static PROFICIENCY: OnceLock<Regex> = OnceLock::new();

    let mut suggestions = Vec::new();
    if !pattern(&YEARS, r"(?i)\d+\+? years?").is_match(text) {
        suggestions.push("Add years of experience with key technologies".to_string());
    }
    if !text.contains(',') {
        suggestions.push("List multiple skills separated by commas".to_string());
    }
    if !pattern(&PROFICIENCY, r"(?i)(proficient|expert|advanced|experienced) in").is_match(text) {
        suggestions.push("Indicate proficiency level with skills".to_string());
    }
    suggestions
}

fn critique_education(text: &str) -> Vec<String> {
    static ACHIEVEMENT: OnceLock<Regex> = OnceLock::new();
    static SPECIALIZATION: OnceLock<Regex> = OnceLock::new();

    let mut suggestions = Vec::new();
    if !pattern(&ACHIEVEMENT, r"(?i)GPA|grade|honors|distinction").is_match(text) {
        suggestions.push("Consider adding academic achievements or GPA if notable".to_string());
    }
    if !pattern(
        &SPECIALIZATION,
        r"(?i)(major|minor|concentration|focus|specialization) in",
    )
    .is_match(text)
    {
        suggestions.push("Specify major/specialization if applicable".to_string());
    }
    suggestions
}

fn critique_certifications(text: &str) -> Vec<String> {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    static CREDENTIAL: OnceLock<Regex> = OnceLock::new();

    let mut suggestions = Vec::new();
    if !pattern(&YEAR, r"\b(19|20)\d{2}\b").is_match(text) {
        suggestions.push("Add year of certification completion".to_string());
    }
    if !pattern(&CREDENTIAL, r"(?i)license|number|id").is_match(text) {
        suggestions.push("Consider adding certification number if applicable".to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SuggestionVocabulary {
        SuggestionVocabulary::default()
    }

    #[test]
    fn test_weak_phrase_and_missing_metrics_flagged() {
        let s = critique(&vocab(), "Worked on stuff");
        assert!(s.iter().any(|m| m.contains("\"worked on\"")));
        assert!(s.iter().any(|m| m.contains("metrics")));
        assert!(s.iter().any(|m| m.contains("strong action verb")));
    }

    #[test]
    fn test_quantified_statement_with_power_verb_is_clean() {
        let s = critique(&vocab(), "Increased throughput by 40% using Kubernetes");
        assert!(!s.iter().any(|m| m.contains("metrics")));
        assert!(!s.iter().any(|m| m.contains("Consider replacing")));
        assert!(s.is_empty());
    }

    #[test]
    fn test_percent_alone_counts_as_metric() {
        let s = critique(&vocab(), "Reduced churn by a few %");
        assert!(!s.iter().any(|m| m.contains("metrics")));
    }

    #[test]
    fn test_weak_phrases_reported_in_vocabulary_order() {
        let s = critique(&vocab(), "Responsible for things, helped with others, did 3 tasks");
        let weak: Vec<_> = s.iter().filter(|m| m.starts_with("Consider replacing")).collect();
        assert_eq!(weak.len(), 3);
        assert!(weak[0].contains("\"did\""));
        assert!(weak[1].contains("\"helped with\""));
        assert!(weak[2].contains("\"responsible for\""));
    }

    #[test]
    fn test_metrics_hint_precedes_verb_hint() {
        let s = critique(&vocab(), "stuff happened");
        assert_eq!(
            s,
            vec![
                "Add specific metrics or numbers to quantify your achievement".to_string(),
                "Start with a strong action verb".to_string(),
            ]
        );
    }

    #[test]
    fn test_injected_vocabulary_is_honoured() {
        let custom = SuggestionVocabulary {
            weak_phrases: vec!["tried".to_string()],
            leadership_verbs: vec!["Shipped".to_string()],
            technical_verbs: vec![],
            achievement_verbs: vec![],
        };
        let s = critique(&custom, "Shipped 2 releases, tried hard");
        assert_eq!(s.len(), 1);
        assert!(s[0].contains("\"tried\""));
    }

    #[test]
    fn test_critique_is_deterministic() {
        let text = "Made a thing that worked on Tuesdays";
        assert_eq!(critique(&vocab(), text), critique(&vocab(), text));
    }

    #[test]
    fn test_summary_rules() {
        let s = critique_as(CritiqueKind::Summary, &vocab(), "Engineer");
        assert_eq!(s.len(), 4);

        let strong = "Backend engineer with 8 years of experience in distributed systems. \
                      Led migrations and developed services that cut latency by 30% for millions of users.";
        assert!(critique_as(CritiqueKind::Summary, &vocab(), strong).is_empty());
    }

    #[test]
    fn test_skills_rules() {
        let s = critique_as(CritiqueKind::Skills, &vocab(), "Rust");
        assert_eq!(s.len(), 3);
        let ok = "Proficient in Rust, Go, and SQL with 5+ years of production use";
        assert!(critique_as(CritiqueKind::Skills, &vocab(), ok).is_empty());
    }

    #[test]
    fn test_education_rules() {
        let ok = "BSc with honors, major in Computer Science";
        assert!(critique_as(CritiqueKind::Education, &vocab(), ok).is_empty());
        assert_eq!(critique_as(CritiqueKind::Education, &vocab(), "BSc").len(), 2);
    }

    #[test]
    fn test_certifications_rules() {
        let s = critique_as(CritiqueKind::Certifications, &vocab(), "AWS Solutions Architect");
        assert_eq!(s.len(), 2);
        let ok = "AWS Solutions Architect 2023, license 12345";
        assert!(critique_as(CritiqueKind::Certifications, &vocab(), ok).is_empty());
    }

    #[test]
    fn test_year_must_be_a_whole_word() {
        let s = critique_as(CritiqueKind::Certifications, &vocab(), "Cert id 120234");
        assert!(s.iter().any(|m| m.contains("year")));
    }
}
