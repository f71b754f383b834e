//! Pure validation functions over the enrolment document.
//!
//! Checks run in a fixed order and the first failure wins: emptiness,
//! invalid characters, pattern, date checks, then cross-field rules.

use std::fmt;

use chrono::NaiveDate;

use super::document::{Document, FieldValue, SectionId};
use super::registry::{self, Rule, RuleKind, REQUIRED_MESSAGE};

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub const END_BEFORE_START_MESSAGE: &str = "End date must be after start date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a non-empty value against a single rule, without looking at the
/// rest of the document.
pub fn check_value(rule: &Rule, value: &FieldValue, today: NaiveDate) -> Result<(), ValidationError> {
    let text = match value {
        FieldValue::Choice(_) if rule.is_boolean() => return Ok(()),
        FieldValue::Choice(_) => {
            return Err(ValidationError::new(format!(
                "{} expects a text value",
                rule.label
            )))
        }
        FieldValue::Text(_) if rule.is_boolean() => {
            return Err(ValidationError::new("Please select Yes or No"))
        }
        FieldValue::Text(text) => text.trim(),
    };

    if let Some((invalid, message)) = rule.invalid_chars() {
        if invalid.is_match(text) {
            return Err(ValidationError::new(message));
        }
    }

    if let Some((pattern, message)) = rule.pattern() {
        if !pattern.is_match(text) {
            return Err(ValidationError::new(message));
        }
    }

    match rule.kind {
        RuleKind::Phone => {
            let digits = text.chars().filter(char::is_ascii_digit).count();
            if digits < 8 {
                return Err(ValidationError::new(
                    "Phone number must contain at least 8 digits",
                ));
            }
        }
        RuleKind::Date | RuleKind::BirthDate => {
            let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map_err(|_| ValidationError::new("Please enter a valid date (YYYY-MM-DD)"))?;
            if rule.kind == RuleKind::BirthDate && date >= today {
                return Err(ValidationError::new("Date of birth must be in the past"));
            }
        }
        RuleKind::Gender => {
            if !registry::GENDER_OPTIONS.contains(&text) {
                return Err(ValidationError::new("Please select a gender"));
            }
        }
        RuleKind::YearLevel => {
            if !registry::YEAR_LEVEL_OPTIONS.contains(&text) {
                return Err(ValidationError::new("Please select a year level"));
            }
        }
        _ => {}
    }

    Ok(())
}

/// Validates one field of the document, including the cross-field rules.
pub fn check_field(
    document: &Document,
    section: SectionId,
    field: &str,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let rule = registry::rule_for(section, field);
    let value = document
        .get(section, field)
        .unwrap_or_else(|| FieldValue::text(""));

    if value.is_empty() {
        let required = rule.required || conditionally_required(document, section, field);
        return if required {
            Err(ValidationError::new(REQUIRED_MESSAGE))
        } else {
            Ok(())
        };
    }

    check_value(&rule, &value, today)?;
    check_cross_field(document, section, field)
}

/// Correspondence address for the living parents becomes mandatory once the
/// residential address is declared not to be the student's.
fn conditionally_required(document: &Document, section: SectionId, field: &str) -> bool {
    section == SectionId::ParentLivingDetails
        && field == "correspondence_address"
        && document.parent_living_details.is_student_residential_address == Some(false)
}

fn check_cross_field(
    document: &Document,
    section: SectionId,
    field: &str,
) -> Result<(), ValidationError> {
    if section == SectionId::Student && field == "attendance_to" {
        let from = document.student.attendance_from.trim();
        let to = document.student.attendance_to.trim();
        let month_rule = registry::rule_for(SectionId::Student, "attendance_from");
        let from_is_month = month_rule
            .pattern()
            .is_some_and(|(pattern, _)| pattern.is_match(from));
        // YYYY-MM strings order the same way as the months they name.
        if from_is_month && to <= from {
            return Err(ValidationError::new(END_BEFORE_START_MESSAGE));
        }
    }
    Ok(())
}

/// Non-validating completeness check: every field of the section holds
/// something, regardless of whether it is well formed.
pub fn is_section_filled(document: &Document, section: SectionId) -> bool {
    document.section(section).is_filled()
}

/// Completeness check restricted to a subset of the section's fields.
pub fn is_section_filled_by(document: &Document, section: SectionId, fields: &[&str]) -> bool {
    let record = document.section(section);
    fields
        .iter()
        .all(|field| record.get(field).is_some_and(|value| !value.is_empty()))
}

/// True when at least one text field of the section has been typed into.
/// Choice fields are ignored since they may carry a non-empty default.
pub fn is_section_touched(document: &Document, section: SectionId) -> bool {
    let record = document.section(section);
    record.fields().iter().any(|field| {
        matches!(record.get(field), Some(FieldValue::Text(ref text)) if !text.trim().is_empty())
    })
}

pub const CONTACT_REQUIRED_FIELDS: &[&str] = &["parent_name", "mobile_phone"];

pub const PARENT_NOT_LIVING_REQUIRED_FIELDS: &[&str] = &[
    "given_name",
    "family_name",
    "relationship_to_student",
    "mobile_phone",
];

/// Family step: living details, Parent/Carer 1 or Parent/Carer 2 fully filled.
pub fn family_step_complete(document: &Document) -> bool {
    is_section_filled(document, SectionId::ParentLivingDetails)
        || is_section_filled(document, SectionId::ParentCarer1)
        || is_section_filled(document, SectionId::ParentCarer2)
}

/// Contact step: one of the contacts filled by its own reduced field subset.
pub fn contact_step_complete(document: &Document) -> bool {
    is_section_filled_by(document, SectionId::FirstContact, CONTACT_REQUIRED_FIELDS)
        || is_section_filled_by(document, SectionId::SecondContact, CONTACT_REQUIRED_FIELDS)
        || is_section_filled_by(
            document,
            SectionId::ParentNotLiving,
            PARENT_NOT_LIVING_REQUIRED_FIELDS,
        )
}

/// Emergency step: any emergency contact touched at all.
pub fn emergency_step_complete(document: &Document) -> bool {
    is_section_touched(document, SectionId::FirstEmergencyContact)
        || is_section_touched(document, SectionId::SecondEmergencyContact)
}
