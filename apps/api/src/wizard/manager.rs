//! Form state manager: owns one in-progress record and the wizard position.
//!
//! Every operation is synchronous and total: failures come back as values and
//! leave the record as it was. Nothing here touches the network or the store.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::models::resume::{RepeatableSection, ResumeRecord};
use crate::suggestions::{critique, examples_for, fill_placeholders, ExampleTarget, SuggestionVocabulary};
use crate::wizard::fields::{
    CertificationField, EditError, FieldEdit, SkillsField, WorkExperienceField,
};
use crate::wizard::steps::WizardStep;
use crate::wizard::validation::ValidationErrors;

#[derive(Debug, Error, PartialEq)]
pub enum NavigationError {
    #[error("step {0} does not exist")]
    OutOfRange(u8),

    #[error("cannot skip from step {from} to step {to}")]
    SkipAhead { from: WizardStep, to: WizardStep },

    #[error("step {step} has validation errors: {errors}")]
    Blocked {
        step: WizardStep,
        errors: ValidationErrors,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("resume can only be generated from the final step (currently on step {0})")]
    NotOnFinalStep(WizardStep),

    #[error("step {step} has validation errors: {errors}")]
    Invalid {
        step: WizardStep,
        errors: ValidationErrors,
    },
}

pub struct FormStateManager {
    record: ResumeRecord,
    current_step: WizardStep,
    errors: ValidationErrors,
    suggestions: Vec<String>,
    vocabulary: Arc<SuggestionVocabulary>,
}

impl FormStateManager {
    /// A fresh wizard on step 1 with an empty record.
    pub fn new(vocabulary: Arc<SuggestionVocabulary>) -> Self {
        Self {
            record: ResumeRecord::default(),
            current_step: WizardStep::FIRST,
            errors: ValidationErrors::new(),
            suggestions: Vec::new(),
            vocabulary,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    // ── Record mutations ────────────────────────────────────────────────────

    /// Replaces one field. Edits to content fields refresh the suggestion list.
    pub fn set_field(&mut self, edit: &FieldEdit) -> Result<(), EditError> {
        edit.apply(&mut self.record)?;
        if edit.is_content_field() {
            self.suggestions = self.critique(edit.value());
        }
        Ok(())
    }

    pub fn add_entry(&mut self, section: RepeatableSection) {
        self.record.push_blank_entry(section);
    }

    /// Removes an entry; out-of-range indices are ignored. Returns whether anything was removed.
    pub fn remove_entry(&mut self, section: RepeatableSection, index: usize) -> bool {
        self.record.remove_entry(section, index)
    }

    /// Writes a filled-in example statement into its target field.
    ///
    /// `index` selects the entry for per-entry targets and is ignored otherwise.
    pub fn apply_example(
        &mut self,
        target: ExampleTarget,
        index: Option<usize>,
        example: usize,
    ) -> Result<(), EditError> {
        let template = examples_for(target)
            .get(example)
            .ok_or(EditError::UnknownExample { index: example })?;
        let role = self.record.work_experience.first().map(|e| e.title.as_str());
        let value = fill_placeholders(template, role);

        let edit = match target {
            ExampleTarget::Summary => FieldEdit::Summary { value },
            ExampleTarget::Responsibilities => FieldEdit::WorkExperience {
                index: index.ok_or(EditError::MissingIndex)?,
                field: WorkExperienceField::Responsibilities,
                value,
            },
            ExampleTarget::TechnicalSkills => FieldEdit::Skills {
                field: SkillsField::Technical,
                value,
            },
            ExampleTarget::SoftSkills => FieldEdit::Skills {
                field: SkillsField::SoftSkills,
                value,
            },
            ExampleTarget::Tools => FieldEdit::Skills {
                field: SkillsField::Tools,
                value,
            },
            ExampleTarget::CertificationName => FieldEdit::Certifications {
                index: index.ok_or(EditError::MissingIndex)?,
                field: CertificationField::Name,
                value,
            },
        };
        edit.apply(&mut self.record)
    }

    // ── Validation and navigation ───────────────────────────────────────────

    /// Validates `step` against the current record and stores the result as `errors`.
    pub fn validate(&mut self, step: WizardStep) -> bool {
        self.errors = step.validate(&self.record);
        self.errors.is_empty()
    }

    /// Moves to step `n`: any step up to the current one, or the next one once
    /// the current step validates.
    pub fn go_to_step(&mut self, n: u8) -> Result<WizardStep, NavigationError> {
        let target = WizardStep::from_number(n).ok_or(NavigationError::OutOfRange(n))?;
        let current = self.current_step;

        if target <= current {
            if target != current {
                self.errors.clear();
            }
            self.current_step = target;
            return Ok(target);
        }

        if current.next() != Some(target) {
            return Err(NavigationError::SkipAhead {
                from: current,
                to: target,
            });
        }

        if !self.validate(current) {
            debug!("Step {current} blocked: {}", self.errors);
            return Err(NavigationError::Blocked {
                step: current,
                errors: self.errors.clone(),
            });
        }

        self.current_step = target;
        Ok(target)
    }

    /// Next step, gated by validation. On the final step the validation still
    /// runs but the position stays put.
    pub fn advance(&mut self) -> Result<WizardStep, NavigationError> {
        let current = self.current_step;
        match current.next() {
            Some(next) => self.go_to_step(next.number()),
            None if self.validate(current) => Ok(current),
            None => Err(NavigationError::Blocked {
                step: current,
                errors: self.errors.clone(),
            }),
        }
    }

    /// Previous step, never validated; stays on step 1.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.current_step.prev() {
            self.errors.clear();
            self.current_step = prev;
        }
        self.current_step
    }

    // ── Suggestions ─────────────────────────────────────────────────────────

    pub fn critique(&self, text: &str) -> Vec<String> {
        critique(&self.vocabulary, text)
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Final hygiene check across every step, then a copy of the record for
    /// rendering and storage. The first failing step becomes current.
    pub fn submit(&mut self) -> Result<ResumeRecord, SubmitError> {
        if self.current_step != WizardStep::LAST {
            return Err(SubmitError::NotOnFinalStep(self.current_step));
        }

        for step in WizardStep::ALL {
            if !self.validate(step) {
                self.current_step = step;
                return Err(SubmitError::Invalid {
                    step,
                    errors: self.errors.clone(),
                });
            }
        }

        Ok(self.record.clone())
    }
}
