use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The aggregate edited by the wizard and persisted on submission.
///
/// Field names are `camelCase` on the wire so stored documents and API
/// payloads share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub certifications: Vec<CertificationEntry>,
}

impl Default for ResumeRecord {
    /// A fresh record: singleton sections blank, one blank entry per repeatable section.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            work_experience: vec![WorkExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            skills: Skills::default(),
            certifications: vec![CertificationEntry::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical: String,
    pub soft_skills: String,
    pub tools: String,
    pub languages: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// The repeatable sections of a record. Singleton sections have no entries to add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatableSection {
    WorkExperience,
    Education,
    Certifications,
}

impl RepeatableSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatableSection::WorkExperience => "workExperience",
            RepeatableSection::Education => "education",
            RepeatableSection::Certifications => "certifications",
        }
    }
}

impl ResumeRecord {
    /// Number of entries currently held by a repeatable section.
    pub fn entry_count(&self, section: RepeatableSection) -> usize {
        match section {
            RepeatableSection::WorkExperience => self.work_experience.len(),
            RepeatableSection::Education => self.education.len(),
            RepeatableSection::Certifications => self.certifications.len(),
        }
    }

    /// Appends one blank entry to `section`.
    pub fn push_blank_entry(&mut self, section: RepeatableSection) {
        match section {
            RepeatableSection::WorkExperience => {
                self.work_experience.push(WorkExperienceEntry::default())
            }
            RepeatableSection::Education => self.education.push(EducationEntry::default()),
            RepeatableSection::Certifications => {
                self.certifications.push(CertificationEntry::default())
            }
        }
    }

    /// Removes the entry at `index`. Returns `false` (and leaves the record untouched)
    /// when `index` is out of range.
    pub fn remove_entry(&mut self, section: RepeatableSection, index: usize) -> bool {
        if index >= self.entry_count(section) {
            return false;
        }
        match section {
            RepeatableSection::WorkExperience => {
                self.work_experience.remove(index);
            }
            RepeatableSection::Education => {
                self.education.remove(index);
            }
            RepeatableSection::Certifications => {
                self.certifications.remove(index);
            }
        }
        true
    }
}

/// A record as held by the document store, together with its ownership and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub id: Uuid,
    pub owner_id: String,
    pub record: ResumeRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredResume {
    /// Last modification time, falling back to creation time.
    pub fn last_edited(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_has_one_blank_entry_per_repeatable_section() {
        let record = ResumeRecord::default();
        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.certifications.len(), 1);
        assert!(record.personal_info.full_name.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut record = ResumeRecord::default();
        assert!(!record.remove_entry(RepeatableSection::Education, 3));
        assert_eq!(record.education.len(), 1);
    }

    #[test]
    fn test_remove_last_then_add_from_empty() {
        let mut record = ResumeRecord::default();
        assert!(record.remove_entry(RepeatableSection::Certifications, 0));
        assert!(record.certifications.is_empty());
        record.push_blank_entry(RepeatableSection::Certifications);
        assert_eq!(record.certifications, vec![CertificationEntry::default()]);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value["personalInfo"].get("linkedIn").is_some());
        assert!(value["workExperience"][0].get("startDate").is_some());
        assert!(value["skills"].get("softSkills").is_some());
    }

    #[test]
    fn test_missing_entry_fields_deserialize_blank() {
        let entry: WorkExperienceEntry =
            serde_json::from_value(serde_json::json!({ "title": "Dev" })).unwrap();
        assert_eq!(entry.title, "Dev");
        assert!(entry.responsibilities.is_empty());
    }
}
