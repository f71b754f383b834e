//! Field registry: static table mapping `(section, field)` to a validation
//! rule descriptor.

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{FieldValue, SectionId};
use super::validator::ValidationError;

pub const REQUIRED_MESSAGE: &str = "This field is required";

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];

pub const YEAR_LEVEL_OPTIONS: &[&str] = &[
    "K1", "K2", "K3", "K4", "K5", "K6", "K7", "K8", "K9", "K10", "K11", "K12",
];

static NAME_INVALID_CHARS: Lazy<Regex> = Lazy::new(|| compile_regex(r"[^\p{L}\p{M}\s]"));
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[\p{L}\p{M}\s]{2,}$"));
static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[A-Za-z][A-Za-z.\s]{0,9}$"));
static PHONE_INVALID_CHARS: Lazy<Regex> = Lazy::new(|| compile_regex(r"[^0-9+\-()\s]"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[A-Za-z0-9\s,./#'()\-]{5,}$"));
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));
static MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| compile_regex(r"^[0-9]{4}-(0[1-9]|1[0-2])$"));

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid built-in pattern {pattern}: {err}"),
    }
}

/// Rule families shared across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Person or place name: letters and spaces, at least two characters.
    Name,
    Title,
    Phone,
    Email,
    Address,
    Date,
    /// A date that must lie strictly in the past.
    BirthDate,
    /// `YYYY-MM` month selection.
    Month,
    YearLevel,
    Gender,
    /// Explicit yes/no answer; unanswered counts as empty.
    Boolean,
    /// Anything non-empty.
    FreeText,
}

/// Validation rule for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub label: &'static str,
    pub kind: RuleKind,
    pub required: bool,
}

impl Rule {
    pub const fn required(label: &'static str, kind: RuleKind) -> Self {
        Self {
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(label: &'static str, kind: RuleKind) -> Self {
        Self {
            label,
            kind,
            required: false,
        }
    }

    /// Characters that may never appear, with the message reported for them.
    pub fn invalid_chars(&self) -> Option<(&'static Regex, String)> {
        match self.kind {
            RuleKind::Name => Some((
                &NAME_INVALID_CHARS,
                format!("{} cannot contain numbers or symbols", self.label),
            )),
            RuleKind::Phone => Some((
                &PHONE_INVALID_CHARS,
                "Phone number can only contain digits, spaces, +, -, ( and )".to_string(),
            )),
            _ => None,
        }
    }

    /// Shape the whole (trimmed) value must match.
    pub fn pattern(&self) -> Option<(&'static Regex, String)> {
        match self.kind {
            RuleKind::Name => Some((
                &NAME_PATTERN,
                format!("{} must be at least 2 letters", self.label),
            )),
            RuleKind::Title => Some((
                &TITLE_PATTERN,
                "Please enter a valid title (eg Mr/Ms/Mrs/Dr)".to_string(),
            )),
            RuleKind::Email => Some((
                &EMAIL_PATTERN,
                "Please enter a valid email address".to_string(),
            )),
            RuleKind::Address => Some((
                &ADDRESS_PATTERN,
                "Please enter a valid address (at least 5 characters)".to_string(),
            )),
            RuleKind::Date | RuleKind::BirthDate => Some((
                &DATE_PATTERN,
                "Please enter a valid date (YYYY-MM-DD)".to_string(),
            )),
            RuleKind::Month => Some((&MONTH_PATTERN, "Please use the YYYY-MM format".to_string())),
            _ => None,
        }
    }

    /// Closed option list for selection fields.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            RuleKind::Gender => Some(GENDER_OPTIONS),
            RuleKind::YearLevel => Some(YEAR_LEVEL_OPTIONS),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == RuleKind::Boolean
    }

    /// Converts raw user input into the value shape this rule expects.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        let trimmed = raw.trim();
        match self.kind {
            RuleKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "" => Ok(FieldValue::unanswered()),
                "y" | "yes" | "true" => Ok(FieldValue::yes()),
                "n" | "no" | "false" => Ok(FieldValue::no()),
                _ => Err(ValidationError::new("Please select Yes or No")),
            },
            _ => {
                let canonical = self.options().and_then(|options| {
                    options
                        .iter()
                        .find(|option| option.eq_ignore_ascii_case(trimmed))
                        .copied()
                });
                Ok(FieldValue::text(canonical.unwrap_or(trimmed)))
            }
        }
    }
}

use RuleKind::*;

const STUDENT_RULES: &[(&str, Rule)] = &[
    ("family_name", Rule::required("Family name", Name)),
    ("first_given_name", Rule::required("First given name", Name)),
    ("second_given_name", Rule::optional("Second given name", Name)),
    ("preferred_first_name", Rule::optional("Preferred first name", Name)),
    ("gender", Rule::required("Gender", Gender)),
    ("date_of_birth", Rule::required("Date of birth", BirthDate)),
    ("enrollment_year", Rule::required("Year enrolled in day school", YearLevel)),
    ("overseas_student", Rule::required("Overseas full fee paying student?", Boolean)),
    ("community_school_name", Rule::required("Community language school name", Name)),
    ("enrolment_date", Rule::required("Date of enrolment at this school", Date)),
    ("day_school_name", Rule::required("Name of day school attended", Name)),
    ("day_school_location", Rule::required("Location of day school", Name)),
    ("attendance_from", Rule::optional("Dates of attendance (from)", Month)),
    ("attendance_to", Rule::optional("Dates of attendance (to)", Month)),
];

const PARENT_CARER_RULES: &[(&str, Rule)] = &[
    ("title", Rule::optional("Title", Title)),
    ("gender", Rule::optional("Gender", Gender)),
    ("relationship_to_student", Rule::optional("Relationship to student", Name)),
    ("family_name", Rule::optional("Family name", Name)),
    ("given_name", Rule::optional("Given name", Name)),
    ("country_of_birth", Rule::optional("Country of birth", Name)),
];

const LIVING_DETAILS_RULES: &[(&str, Rule)] = &[
    ("correspondence_name", Rule::optional("Name to be used for all correspondence", Name)),
    ("residential_address", Rule::optional("Residential address", Address)),
    (
        "is_student_residential_address",
        Rule::optional("Is this the residential address of the student?", Boolean),
    ),
    ("correspondence_address", Rule::optional("Correspondence address", Address)),
];

const CONTACT_RULES: &[(&str, Rule)] = &[
    ("parent_name", Rule::optional("Name of parent/carer to contact", Name)),
    ("mobile_phone", Rule::optional("Phone number (mobile)", Phone)),
    ("home_phone", Rule::optional("Phone number (home)", Phone)),
    ("work_phone", Rule::optional("Phone number (work)", Phone)),
    ("email", Rule::optional("Contact email address", Email)),
];

const PARENT_NOT_LIVING_RULES: &[(&str, Rule)] = &[
    ("title", Rule::optional("Title", Title)),
    ("gender", Rule::optional("Gender", Gender)),
    ("relationship_to_student", Rule::optional("Relationship to student", Name)),
    ("family_name", Rule::optional("Family name", Name)),
    ("given_name", Rule::optional("Given name", Name)),
    ("mobile_phone", Rule::optional("Phone number (mobile)", Phone)),
    ("home_phone", Rule::optional("Phone number (home)", Phone)),
    ("work_phone", Rule::optional("Phone number (work)", Phone)),
    ("email", Rule::optional("Preferred email address for correspondence", Email)),
    ("residential_address", Rule::optional("Residential address", Address)),
    (
        "does_student_reside_here",
        Rule::optional("Does the student sometimes reside at this address?", Boolean),
    ),
    ("correspondence_address", Rule::optional("Correspondence address", Address)),
];

const EMERGENCY_CONTACT_RULES: &[(&str, Rule)] = &[
    ("family_name", Rule::optional("Family name", Name)),
    ("given_name", Rule::optional("Given name", Name)),
    ("relationship_to_student", Rule::optional("Relationship to student", Name)),
    ("mobile_phone", Rule::optional("Phone number (mobile)", Phone)),
    ("home_phone", Rule::optional("Phone number (home)", Phone)),
    ("work_phone", Rule::optional("Phone number (work)", Phone)),
];

const DECLARATION_RULES: &[(&str, Rule)] = &[
    ("first_parent_carer_name", Rule::required("Name of first parent/carer", Name)),
    ("first_parent_carer_name_date", Rule::required("Date", Date)),
    (
        "second_parent_carer_name",
        Rule::optional("Name of second parent/carer (if applicable)", Name),
    ),
    ("second_parent_carer_name_date", Rule::optional("Date", Date)),
];

/// Every rule declared for a section, in display order.
pub fn section_rules(section: SectionId) -> &'static [(&'static str, Rule)] {
    match section {
        SectionId::Student => STUDENT_RULES,
        SectionId::ParentCarer1 | SectionId::ParentCarer2 => PARENT_CARER_RULES,
        SectionId::ParentLivingDetails => LIVING_DETAILS_RULES,
        SectionId::FirstContact | SectionId::SecondContact => CONTACT_RULES,
        SectionId::ParentNotLiving => PARENT_NOT_LIVING_RULES,
        SectionId::FirstEmergencyContact | SectionId::SecondEmergencyContact => {
            EMERGENCY_CONTACT_RULES
        }
        SectionId::PersonalDeclaration => DECLARATION_RULES,
    }
}

/// Looks up the rule for a field. Total: unknown fields are treated as
/// required free text.
pub fn rule_for(section: SectionId, field: &str) -> Rule {
    section_rules(section)
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, rule)| *rule)
        .unwrap_or(Rule::required("This field", FreeText))
}
