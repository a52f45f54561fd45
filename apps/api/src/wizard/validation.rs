use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::resume::ResumeRecord;

/// Field name → message for the violations found on one step.
///
/// Ordered by field name so repeated validation yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Per-step rules
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn require_personal_info(record: &ResumeRecord, errors: &mut ValidationErrors) {
    let info = &record.personal_info;
    if is_blank(&info.full_name) {
        errors.insert("fullName", "Name is required");
    }
    if is_blank(&info.email) {
        errors.insert("email", "Email is required");
    }
    if is_blank(&info.phone) {
        errors.insert("phone", "Phone is required");
    }
}

pub(crate) fn require_summary(record: &ResumeRecord, errors: &mut ValidationErrors) {
    if is_blank(&record.summary) {
        errors.insert("summary", "Summary is required");
    }
}

pub(crate) fn require_work_experience(record: &ResumeRecord, errors: &mut ValidationErrors) {
    if record.work_experience.is_empty() {
        errors.insert("workExperience", "Add at least one work experience");
    }
}

pub(crate) fn no_required_fields(_record: &ResumeRecord, _errors: &mut ValidationErrors) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_personal_info_reports_all_three_fields() {
        let mut errors = ValidationErrors::new();
        require_personal_info(&ResumeRecord::default(), &mut errors);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("fullName"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("phone"), Some("Phone is required"));
        assert_eq!(errors.get("location"), None);
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let mut record = ResumeRecord::default();
        record.summary = "   \n".to_string();
        let mut errors = ValidationErrors::new();
        require_summary(&record, &mut errors);
        assert_eq!(errors.get("summary"), Some("Summary is required"));
    }

    #[test]
    fn test_blank_work_entry_still_counts() {
        let mut errors = ValidationErrors::new();
        require_work_experience(&ResumeRecord::default(), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_display_is_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.insert("phone", "Phone is required");
        errors.insert("email", "Email is required");
        assert_eq!(
            errors.to_string(),
            "email: Email is required; phone: Phone is required"
        );
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut errors = ValidationErrors::new();
        errors.insert("summary", "Summary is required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "summary": "Summary is required" })
        );
    }
}
