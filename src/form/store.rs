use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::document::{Document, FieldValue, SectionId};
use super::validator;
use crate::errors::Result;

/// Per-field validation lifecycle. Editing a field always returns it to
/// `Unvalidated`; only an explicit validation moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Unvalidated,
    Invalid,
    Valid,
}

/// Section -> field -> message. An entry exists only while the field is
/// known to fail.
pub type ErrorMap = BTreeMap<SectionId, BTreeMap<String, String>>;

/// Outcome flags of the most recent submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub in_flight: bool,
    pub success: bool,
    pub error: Option<String>,
}

/// Mutable form state owned by one enrolment session.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    document: Document,
    errors: ErrorMap,
    statuses: BTreeMap<(SectionId, String), FieldStatus>,
    submission: SubmissionState,
    today: Option<NaiveDate>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an existing document (e.g. one loaded from disk).
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Pins the date used for "in the past" checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, section: SectionId, field: &str) -> Option<&str> {
        self.errors
            .get(&section)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|fields| !fields.is_empty())
    }

    pub fn status(&self, section: SectionId, field: &str) -> FieldStatus {
        self.statuses
            .get(&(section, field.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub(crate) fn submission_mut(&mut self) -> &mut SubmissionState {
        &mut self.submission
    }

    /// Replaces one field and optimistically clears its error. The field is
    /// not re-validated until the next explicit validation.
    pub fn update(&mut self, section: SectionId, field: &str, value: FieldValue) -> Result<()> {
        self.document.set(section, field, value)?;
        self.clear_error(section, field);
        self.statuses
            .insert((section, field.to_string()), FieldStatus::Unvalidated);
        Ok(())
    }

    /// Validates one field (the "blur" transition) and records the outcome.
    pub fn validate_field(&mut self, section: SectionId, field: &str) -> bool {
        let outcome = validator::check_field(&self.document, section, field, self.today());
        let status = match outcome {
            Ok(()) => {
                self.clear_error(section, field);
                FieldStatus::Valid
            }
            Err(err) => {
                debug!(section = %section, field, message = %err.message, "field failed validation");
                self.errors
                    .entry(section)
                    .or_default()
                    .insert(field.to_string(), err.message);
                FieldStatus::Invalid
            }
        };
        self.statuses.insert((section, field.to_string()), status);
        status == FieldStatus::Valid
    }

    /// Validates every field of a section; all fields are visited so each
    /// failure gets its own error entry.
    pub fn validate_section(&mut self, section: SectionId) -> bool {
        Document::field_names(section)
            .iter()
            .fold(true, |all_valid, field| {
                self.validate_field(section, field) && all_valid
            })
    }

    pub fn validate_all(&mut self) -> bool {
        SectionId::ALL
            .into_iter()
            .fold(true, |all_valid, section| {
                self.validate_section(section) && all_valid
            })
    }

    pub fn clear_submission_error(&mut self) {
        self.submission.error = None;
    }

    pub fn clear_success(&mut self) {
        self.submission.success = false;
    }

    /// Restores the default document and forgets every error and flag.
    pub fn reset(&mut self) {
        self.document = Document::default();
        self.errors.clear();
        self.statuses.clear();
        self.submission = SubmissionState::default();
    }

    fn clear_error(&mut self, section: SectionId, field: &str) {
        if let Some(fields) = self.errors.get_mut(&section) {
            fields.remove(field);
            if fields.is_empty() {
                self.errors.remove(&section);
            }
        }
    }
}
