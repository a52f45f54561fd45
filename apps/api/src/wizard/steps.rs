//! The wizard as a finite-state machine.
//!
//! States are the six steps. Forward transitions are gated by the validator
//! registered for the step being left; the table below is the single source
//! of step titles and rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRecord;
use crate::wizard::validation::{
    no_required_fields, require_personal_info, require_summary, require_work_experience,
    ValidationErrors,
};

pub const STEP_COUNT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    PersonalInfo = 1,
    Summary = 2,
    WorkExperience = 3,
    Education = 4,
    Skills = 5,
    Certifications = 6,
}

type StepValidator = fn(&ResumeRecord, &mut ValidationErrors);

struct StepRule {
    step: WizardStep,
    title: &'static str,
    validate: StepValidator,
}

static STEP_RULES: [StepRule; STEP_COUNT as usize] = [
    StepRule {
        step: WizardStep::PersonalInfo,
        title: "Personal Information",
        validate: require_personal_info,
    },
    StepRule {
        step: WizardStep::Summary,
        title: "Professional Summary",
        validate: require_summary,
    },
    StepRule {
        step: WizardStep::WorkExperience,
        title: "Work Experience",
        validate: require_work_experience,
    },
    StepRule {
        step: WizardStep::Education,
        title: "Education",
        validate: no_required_fields,
    },
    StepRule {
        step: WizardStep::Skills,
        title: "Skills",
        validate: no_required_fields,
    },
    StepRule {
        step: WizardStep::Certifications,
        title: "Certifications",
        validate: no_required_fields,
    },
];

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::PersonalInfo;
    pub const LAST: WizardStep = WizardStep::Certifications;

    pub const ALL: [WizardStep; STEP_COUNT as usize] = [
        WizardStep::PersonalInfo,
        WizardStep::Summary,
        WizardStep::WorkExperience,
        WizardStep::Education,
        WizardStep::Skills,
        WizardStep::Certifications,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn title(self) -> &'static str {
        self.rule().title
    }

    /// Runs this step's validator. Pure: the same record always yields the same set.
    pub fn validate(self, record: &ResumeRecord) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        (self.rule().validate)(record, &mut errors);
        errors
    }

    fn rule(self) -> &'static StepRule {
        &STEP_RULES[(self.number() - 1) as usize]
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        WizardStep::from_number(n).ok_or_else(|| format!("step must be between 1 and {STEP_COUNT}"))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_matches_step_order() {
        for (i, rule) in STEP_RULES.iter().enumerate() {
            assert_eq!(rule.step.number() as usize, i + 1);
            assert_eq!(WizardStep::ALL[i], rule.step);
        }
    }

    #[test]
    fn test_from_number_bounds() {
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(1), Some(WizardStep::PersonalInfo));
        assert_eq!(WizardStep::from_number(6), Some(WizardStep::Certifications));
        assert_eq!(WizardStep::from_number(7), None);
    }

    #[test]
    fn test_next_and_prev_stop_at_the_ends() {
        assert_eq!(WizardStep::LAST.next(), None);
        assert_eq!(WizardStep::FIRST.prev(), None);
        assert_eq!(WizardStep::Summary.next(), Some(WizardStep::WorkExperience));
        assert_eq!(WizardStep::Summary.prev(), Some(WizardStep::PersonalInfo));
    }

    #[test]
    fn test_validate_is_idempotent_for_every_step() {
        let record = ResumeRecord::default();
        for step in WizardStep::ALL {
            assert_eq!(step.validate(&record), step.validate(&record));
        }
    }

    #[test]
    fn test_only_first_three_steps_have_rules() {
        let mut record = ResumeRecord::default();
        record.work_experience.clear();
        assert!(!WizardStep::PersonalInfo.validate(&record).is_empty());
        assert!(!WizardStep::Summary.validate(&record).is_empty());
        assert!(!WizardStep::WorkExperience.validate(&record).is_empty());
        assert!(WizardStep::Education.validate(&record).is_empty());
        assert!(WizardStep::Skills.validate(&record).is_empty());
        assert!(WizardStep::Certifications.validate(&record).is_empty());
    }

    #[test]
    fn test_serde_uses_step_number() {
        assert_eq!(serde_json::to_value(WizardStep::Skills).unwrap(), serde_json::json!(5));
        let step: WizardStep = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(step, WizardStep::Summary);
        assert!(serde_json::from_value::<WizardStep>(serde_json::json!(9)).is_err());
    }
}
