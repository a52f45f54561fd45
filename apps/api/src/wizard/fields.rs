//! Typed field edits: one variant per record section, one enum per section's fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    CertificationEntry, EducationEntry, PersonalInfo, RepeatableSection, ResumeRecord, Skills,
    WorkExperienceEntry,
};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{} has no entry at index {index} (length {len})", .section.as_str())]
    IndexOutOfBounds {
        section: RepeatableSection,
        index: usize,
        len: usize,
    },

    #[error("example {index} does not exist for this field")]
    UnknownExample { index: usize },

    #[error("an entry index is required for this field")]
    MissingIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalInfoField {
    FullName,
    Email,
    Phone,
    Location,
    LinkedIn,
}

impl PersonalInfoField {
    fn slot(self, info: &mut PersonalInfo) -> &mut String {
        match self {
            PersonalInfoField::FullName => &mut info.full_name,
            PersonalInfoField::Email => &mut info.email,
            PersonalInfoField::Phone => &mut info.phone,
            PersonalInfoField::Location => &mut info.location,
            PersonalInfoField::LinkedIn => &mut info.linked_in,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkExperienceField {
    Title,
    Company,
    Location,
    StartDate,
    EndDate,
    Responsibilities,
}

impl WorkExperienceField {
    fn slot(self, entry: &mut WorkExperienceEntry) -> &mut String {
        match self {
            WorkExperienceField::Title => &mut entry.title,
            WorkExperienceField::Company => &mut entry.company,
            WorkExperienceField::Location => &mut entry.location,
            WorkExperienceField::StartDate => &mut entry.start_date,
            WorkExperienceField::EndDate => &mut entry.end_date,
            WorkExperienceField::Responsibilities => &mut entry.responsibilities,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    Location,
    GraduationDate,
    Gpa,
}

impl EducationField {
    fn slot(self, entry: &mut EducationEntry) -> &mut String {
        match self {
            EducationField::Degree => &mut entry.degree,
            EducationField::Institution => &mut entry.institution,
            EducationField::Location => &mut entry.location,
            EducationField::GraduationDate => &mut entry.graduation_date,
            EducationField::Gpa => &mut entry.gpa,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillsField {
    Technical,
    SoftSkills,
    Tools,
    Languages,
}

impl SkillsField {
    fn slot(self, skills: &mut Skills) -> &mut String {
        match self {
            SkillsField::Technical => &mut skills.technical,
            SkillsField::SoftSkills => &mut skills.soft_skills,
            SkillsField::Tools => &mut skills.tools,
            SkillsField::Languages => &mut skills.languages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificationField {
    Name,
    Issuer,
    Date,
}

impl CertificationField {
    fn slot(self, entry: &mut CertificationEntry) -> &mut String {
        match self {
            CertificationField::Name => &mut entry.name,
            CertificationField::Issuer => &mut entry.issuer,
            CertificationField::Date => &mut entry.date,
        }
    }
}

/// A single-field replacement on a record.
///
/// On the wire: `{"section": "workExperience", "index": 0, "field": "title", "value": "Dev"}`.
/// Singleton sections carry no index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum FieldEdit {
    PersonalInfo {
        field: PersonalInfoField,
        value: String,
    },
    Summary {
        value: String,
    },
    WorkExperience {
        index: usize,
        field: WorkExperienceField,
        value: String,
    },
    Education {
        index: usize,
        field: EducationField,
        value: String,
    },
    Skills {
        field: SkillsField,
        value: String,
    },
    Certifications {
        index: usize,
        field: CertificationField,
        value: String,
    },
}

impl FieldEdit {
    pub fn value(&self) -> &str {
        match self {
            FieldEdit::PersonalInfo { value, .. }
            | FieldEdit::Summary { value }
            | FieldEdit::WorkExperience { value, .. }
            | FieldEdit::Education { value, .. }
            | FieldEdit::Skills { value, .. }
            | FieldEdit::Certifications { value, .. } => value,
        }
    }

    /// Free-text fields whose edits refresh the writing suggestions.
    pub fn is_content_field(&self) -> bool {
        matches!(
            self,
            FieldEdit::Summary { .. }
                | FieldEdit::WorkExperience {
                    field: WorkExperienceField::Responsibilities,
                    ..
                }
                | FieldEdit::Skills {
                    field: SkillsField::Technical,
                    ..
                }
                | FieldEdit::Certifications {
                    field: CertificationField::Name,
                    ..
                }
        )
    }

    /// Writes the value into `record`. An out-of-range index leaves the record untouched.
    pub fn apply(&self, record: &mut ResumeRecord) -> Result<(), EditError> {
        let target = match self {
            FieldEdit::PersonalInfo { field, .. } => field.slot(&mut record.personal_info),
            FieldEdit::Summary { .. } => &mut record.summary,
            FieldEdit::WorkExperience { index, field, .. } => {
                let len = record.work_experience.len();
                let entry = record.work_experience.get_mut(*index).ok_or(
                    EditError::IndexOutOfBounds {
                        section: RepeatableSection::WorkExperience,
                        index: *index,
                        len,
                    },
                )?;
                field.slot(entry)
            }
            FieldEdit::Education { index, field, .. } => {
                let len = record.education.len();
                let entry =
                    record
                        .education
                        .get_mut(*index)
                        .ok_or(EditError::IndexOutOfBounds {
                            section: RepeatableSection::Education,
                            index: *index,
                            len,
                        })?;
                field.slot(entry)
            }
            FieldEdit::Skills { field, .. } => field.slot(&mut record.skills),
            FieldEdit::Certifications { index, field, .. } => {
                let len = record.certifications.len();
                let entry = record.certifications.get_mut(*index).ok_or(
                    EditError::IndexOutOfBounds {
                        section: RepeatableSection::Certifications,
                        index: *index,
                        len,
                    },
                )?;
                field.slot(entry)
            }
        };
        *target = self.value().to_string();
        Ok(())
    }
}
