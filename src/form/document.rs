//! Strongly typed enrolment document.
//!
//! Every section is its own record so schema drift is caught at compile time.
//! UI collaborators still address fields by `(section, field)` name; the
//! [`SectionRecord`] trait bridges those lookups onto the typed records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EnrolmentError, Result};

/// Named sub-records of the enrolment document, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Student,
    ParentCarer1,
    ParentCarer2,
    ParentLivingDetails,
    FirstContact,
    SecondContact,
    ParentNotLiving,
    FirstEmergencyContact,
    SecondEmergencyContact,
    PersonalDeclaration,
}

impl SectionId {
    pub const ALL: [SectionId; 10] = [
        SectionId::Student,
        SectionId::ParentCarer1,
        SectionId::ParentCarer2,
        SectionId::ParentLivingDetails,
        SectionId::FirstContact,
        SectionId::SecondContact,
        SectionId::ParentNotLiving,
        SectionId::FirstEmergencyContact,
        SectionId::SecondEmergencyContact,
        SectionId::PersonalDeclaration,
    ];

    /// Wire/storage key of the section.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Student => "student",
            SectionId::ParentCarer1 => "parent_carer_1",
            SectionId::ParentCarer2 => "parent_carer_2",
            SectionId::ParentLivingDetails => "parent_living_details",
            SectionId::FirstContact => "first_contact",
            SectionId::SecondContact => "second_contact",
            SectionId::ParentNotLiving => "parent_not_living",
            SectionId::FirstEmergencyContact => "first_emergency_contact",
            SectionId::SecondEmergencyContact => "second_emergency_contact",
            SectionId::PersonalDeclaration => "personal_declaration",
        }
    }

    /// Heading shown above the section's fields.
    pub fn title(self) -> &'static str {
        match self {
            SectionId::Student => "A. Student details",
            SectionId::ParentCarer1 => "B. Parent/Carer 1 with whom this student normally lives",
            SectionId::ParentCarer2 => "B. Parent/Carer 2 with whom this student normally lives",
            SectionId::ParentLivingDetails => {
                "C. Parents/carers with whom this student normally lives"
            }
            SectionId::FirstContact => "Parent/carer to contact first",
            SectionId::SecondContact => "Parent/carer to contact second",
            SectionId::ParentNotLiving => "D. Parents/carers not living with this student",
            SectionId::FirstEmergencyContact => "E. Emergency contact (first preference)",
            SectionId::SecondEmergencyContact => "E. Emergency contact (second preference)",
            SectionId::PersonalDeclaration => "Your consent and declaration",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = EnrolmentError;

    fn from_str(value: &str) -> Result<Self> {
        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str() == value.trim())
            .ok_or_else(|| EnrolmentError::UnknownSection(value.to_string()))
    }
}

/// Value held by a single field.
///
/// `Choice(None)` means "unanswered" and is distinct from an explicit `No`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choice(Option<bool>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn yes() -> Self {
        FieldValue::Choice(Some(true))
    }

    pub fn no() -> Self {
        FieldValue::Choice(Some(false))
    }

    pub fn unanswered() -> Self {
        FieldValue::Choice(None)
    }

    /// True when the user has not typed or selected anything.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::Choice(choice) => choice.is_none(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Choice(Some(true)) => f.write_str("Yes"),
            FieldValue::Choice(Some(false)) => f.write_str("No"),
            FieldValue::Choice(None) => Ok(()),
        }
    }
}

/// Name-keyed access to a typed section record.
pub trait SectionRecord {
    /// Field names in display order.
    fn fields(&self) -> &'static [&'static str];

    fn get(&self, field: &str) -> Option<FieldValue>;

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>>;

    /// True iff every field holds a non-empty value.
    fn is_filled(&self) -> bool {
        self.fields()
            .iter()
            .all(|field| self.get(field).is_some_and(|value| !value.is_empty()))
    }
}

/// Mutable handle to one field of a record.
pub enum Slot<'a> {
    Text(&'a mut String),
    Choice(&'a mut Option<bool>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Student {
    pub family_name: String,
    pub first_given_name: String,
    pub second_given_name: String,
    pub preferred_first_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub enrollment_year: String,
    pub overseas_student: Option<bool>,
    pub community_school_name: String,
    pub enrolment_date: String,
    pub day_school_name: String,
    pub day_school_location: String,
    pub attendance_from: String,
    pub attendance_to: String,
}

impl Student {
    pub const FIELDS: &'static [&'static str] = &[
        "family_name",
        "first_given_name",
        "second_given_name",
        "preferred_first_name",
        "gender",
        "date_of_birth",
        "enrollment_year",
        "overseas_student",
        "community_school_name",
        "enrolment_date",
        "day_school_name",
        "day_school_location",
        "attendance_from",
        "attendance_to",
    ];
}

impl SectionRecord for Student {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "family_name" => &self.family_name,
            "first_given_name" => &self.first_given_name,
            "second_given_name" => &self.second_given_name,
            "preferred_first_name" => &self.preferred_first_name,
            "gender" => &self.gender,
            "date_of_birth" => &self.date_of_birth,
            "enrollment_year" => &self.enrollment_year,
            "overseas_student" => return Some(FieldValue::Choice(self.overseas_student)),
            "community_school_name" => &self.community_school_name,
            "enrolment_date" => &self.enrolment_date,
            "day_school_name" => &self.day_school_name,
            "day_school_location" => &self.day_school_location,
            "attendance_from" => &self.attendance_from,
            "attendance_to" => &self.attendance_to,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "family_name" => &mut self.family_name,
            "first_given_name" => &mut self.first_given_name,
            "second_given_name" => &mut self.second_given_name,
            "preferred_first_name" => &mut self.preferred_first_name,
            "gender" => &mut self.gender,
            "date_of_birth" => &mut self.date_of_birth,
            "enrollment_year" => &mut self.enrollment_year,
            "overseas_student" => return Some(Slot::Choice(&mut self.overseas_student)),
            "community_school_name" => &mut self.community_school_name,
            "enrolment_date" => &mut self.enrolment_date,
            "day_school_name" => &mut self.day_school_name,
            "day_school_location" => &mut self.day_school_location,
            "attendance_from" => &mut self.attendance_from,
            "attendance_to" => &mut self.attendance_to,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

/// Parent/Carer 1 and Parent/Carer 2 share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParentCarer {
    pub title: String,
    pub gender: String,
    pub relationship_to_student: String,
    pub family_name: String,
    pub given_name: String,
    pub country_of_birth: String,
}

impl ParentCarer {
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "gender",
        "relationship_to_student",
        "family_name",
        "given_name",
        "country_of_birth",
    ];
}

impl SectionRecord for ParentCarer {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "title" => &self.title,
            "gender" => &self.gender,
            "relationship_to_student" => &self.relationship_to_student,
            "family_name" => &self.family_name,
            "given_name" => &self.given_name,
            "country_of_birth" => &self.country_of_birth,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "title" => &mut self.title,
            "gender" => &mut self.gender,
            "relationship_to_student" => &mut self.relationship_to_student,
            "family_name" => &mut self.family_name,
            "given_name" => &mut self.given_name,
            "country_of_birth" => &mut self.country_of_birth,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParentLivingDetails {
    pub correspondence_name: String,
    pub residential_address: String,
    pub is_student_residential_address: Option<bool>,
    pub correspondence_address: String,
}

impl ParentLivingDetails {
    pub const FIELDS: &'static [&'static str] = &[
        "correspondence_name",
        "residential_address",
        "is_student_residential_address",
        "correspondence_address",
    ];
}

impl SectionRecord for ParentLivingDetails {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "correspondence_name" => Some(FieldValue::Text(self.correspondence_name.clone())),
            "residential_address" => Some(FieldValue::Text(self.residential_address.clone())),
            "is_student_residential_address" => {
                Some(FieldValue::Choice(self.is_student_residential_address))
            }
            "correspondence_address" => {
                Some(FieldValue::Text(self.correspondence_address.clone()))
            }
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        match field {
            "correspondence_name" => Some(Slot::Text(&mut self.correspondence_name)),
            "residential_address" => Some(Slot::Text(&mut self.residential_address)),
            "is_student_residential_address" => {
                Some(Slot::Choice(&mut self.is_student_residential_address))
            }
            "correspondence_address" => Some(Slot::Text(&mut self.correspondence_address)),
            _ => None,
        }
    }
}

/// First and second contact share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contact {
    pub parent_name: String,
    pub mobile_phone: String,
    pub home_phone: String,
    pub work_phone: String,
    pub email: String,
}

impl Contact {
    pub const FIELDS: &'static [&'static str] = &[
        "parent_name",
        "mobile_phone",
        "home_phone",
        "work_phone",
        "email",
    ];
}

impl SectionRecord for Contact {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "parent_name" => &self.parent_name,
            "mobile_phone" => &self.mobile_phone,
            "home_phone" => &self.home_phone,
            "work_phone" => &self.work_phone,
            "email" => &self.email,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "parent_name" => &mut self.parent_name,
            "mobile_phone" => &mut self.mobile_phone,
            "home_phone" => &mut self.home_phone,
            "work_phone" => &mut self.work_phone,
            "email" => &mut self.email,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParentNotLiving {
    pub title: String,
    pub gender: String,
    pub relationship_to_student: String,
    pub family_name: String,
    pub given_name: String,
    pub mobile_phone: String,
    pub home_phone: String,
    pub work_phone: String,
    pub email: String,
    pub residential_address: String,
    pub does_student_reside_here: Option<bool>,
    pub correspondence_address: String,
}

impl Default for ParentNotLiving {
    fn default() -> Self {
        Self {
            title: String::new(),
            gender: String::new(),
            relationship_to_student: String::new(),
            family_name: String::new(),
            given_name: String::new(),
            mobile_phone: String::new(),
            home_phone: String::new(),
            work_phone: String::new(),
            email: String::new(),
            residential_address: String::new(),
            does_student_reside_here: Some(false),
            correspondence_address: String::new(),
        }
    }
}

impl ParentNotLiving {
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "gender",
        "relationship_to_student",
        "family_name",
        "given_name",
        "mobile_phone",
        "home_phone",
        "work_phone",
        "email",
        "residential_address",
        "does_student_reside_here",
        "correspondence_address",
    ];
}

impl SectionRecord for ParentNotLiving {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "title" => &self.title,
            "gender" => &self.gender,
            "relationship_to_student" => &self.relationship_to_student,
            "family_name" => &self.family_name,
            "given_name" => &self.given_name,
            "mobile_phone" => &self.mobile_phone,
            "home_phone" => &self.home_phone,
            "work_phone" => &self.work_phone,
            "email" => &self.email,
            "residential_address" => &self.residential_address,
            "does_student_reside_here" => {
                return Some(FieldValue::Choice(self.does_student_reside_here))
            }
            "correspondence_address" => &self.correspondence_address,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "title" => &mut self.title,
            "gender" => &mut self.gender,
            "relationship_to_student" => &mut self.relationship_to_student,
            "family_name" => &mut self.family_name,
            "given_name" => &mut self.given_name,
            "mobile_phone" => &mut self.mobile_phone,
            "home_phone" => &mut self.home_phone,
            "work_phone" => &mut self.work_phone,
            "email" => &mut self.email,
            "residential_address" => &mut self.residential_address,
            "does_student_reside_here" => {
                return Some(Slot::Choice(&mut self.does_student_reside_here))
            }
            "correspondence_address" => &mut self.correspondence_address,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

/// First and second emergency contact share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmergencyContact {
    pub family_name: String,
    pub given_name: String,
    pub relationship_to_student: String,
    pub mobile_phone: String,
    pub home_phone: String,
    pub work_phone: String,
}

impl EmergencyContact {
    pub const FIELDS: &'static [&'static str] = &[
        "family_name",
        "given_name",
        "relationship_to_student",
        "mobile_phone",
        "home_phone",
        "work_phone",
    ];
}

impl SectionRecord for EmergencyContact {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "family_name" => &self.family_name,
            "given_name" => &self.given_name,
            "relationship_to_student" => &self.relationship_to_student,
            "mobile_phone" => &self.mobile_phone,
            "home_phone" => &self.home_phone,
            "work_phone" => &self.work_phone,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "family_name" => &mut self.family_name,
            "given_name" => &mut self.given_name,
            "relationship_to_student" => &mut self.relationship_to_student,
            "mobile_phone" => &mut self.mobile_phone,
            "home_phone" => &mut self.home_phone,
            "work_phone" => &mut self.work_phone,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonalDeclaration {
    pub first_parent_carer_name: String,
    pub first_parent_carer_name_date: String,
    pub second_parent_carer_name: String,
    pub second_parent_carer_name_date: String,
}

impl PersonalDeclaration {
    pub const FIELDS: &'static [&'static str] = &[
        "first_parent_carer_name",
        "first_parent_carer_name_date",
        "second_parent_carer_name",
        "second_parent_carer_name_date",
    ];
}

impl SectionRecord for PersonalDeclaration {
    fn fields(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let text = match field {
            "first_parent_carer_name" => &self.first_parent_carer_name,
            "first_parent_carer_name_date" => &self.first_parent_carer_name_date,
            "second_parent_carer_name" => &self.second_parent_carer_name,
            "second_parent_carer_name_date" => &self.second_parent_carer_name_date,
            _ => return None,
        };
        Some(FieldValue::Text(text.clone()))
    }

    fn slot_mut(&mut self, field: &str) -> Option<Slot<'_>> {
        let text = match field {
            "first_parent_carer_name" => &mut self.first_parent_carer_name,
            "first_parent_carer_name_date" => &mut self.first_parent_carer_name_date,
            "second_parent_carer_name" => &mut self.second_parent_carer_name,
            "second_parent_carer_name_date" => &mut self.second_parent_carer_name_date,
            _ => return None,
        };
        Some(Slot::Text(text))
    }
}

/// The full enrolment record, one typed struct per section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Document {
    pub student: Student,
    pub parent_carer_1: ParentCarer,
    pub parent_carer_2: ParentCarer,
    pub parent_living_details: ParentLivingDetails,
    pub first_contact: Contact,
    pub second_contact: Contact,
    pub parent_not_living: ParentNotLiving,
    pub first_emergency_contact: EmergencyContact,
    pub second_emergency_contact: EmergencyContact,
    pub personal_declaration: PersonalDeclaration,
}

impl Document {
    pub fn section(&self, section: SectionId) -> &dyn SectionRecord {
        match section {
            SectionId::Student => &self.student,
            SectionId::ParentCarer1 => &self.parent_carer_1,
            SectionId::ParentCarer2 => &self.parent_carer_2,
            SectionId::ParentLivingDetails => &self.parent_living_details,
            SectionId::FirstContact => &self.first_contact,
            SectionId::SecondContact => &self.second_contact,
            SectionId::ParentNotLiving => &self.parent_not_living,
            SectionId::FirstEmergencyContact => &self.first_emergency_contact,
            SectionId::SecondEmergencyContact => &self.second_emergency_contact,
            SectionId::PersonalDeclaration => &self.personal_declaration,
        }
    }

    pub fn section_mut(&mut self, section: SectionId) -> &mut dyn SectionRecord {
        match section {
            SectionId::Student => &mut self.student,
            SectionId::ParentCarer1 => &mut self.parent_carer_1,
            SectionId::ParentCarer2 => &mut self.parent_carer_2,
            SectionId::ParentLivingDetails => &mut self.parent_living_details,
            SectionId::FirstContact => &mut self.first_contact,
            SectionId::SecondContact => &mut self.second_contact,
            SectionId::ParentNotLiving => &mut self.parent_not_living,
            SectionId::FirstEmergencyContact => &mut self.first_emergency_contact,
            SectionId::SecondEmergencyContact => &mut self.second_emergency_contact,
            SectionId::PersonalDeclaration => &mut self.personal_declaration,
        }
    }

    /// Reads a field by name. `None` for names outside the section schema.
    pub fn get(&self, section: SectionId, field: &str) -> Option<FieldValue> {
        self.section(section).get(field)
    }

    /// Replaces one field. The schema is fixed: unknown names and values of
    /// the wrong shape are rejected instead of being added.
    pub fn set(&mut self, section: SectionId, field: &str, value: FieldValue) -> Result<()> {
        let slot = self
            .section_mut(section)
            .slot_mut(field)
            .ok_or_else(|| EnrolmentError::UnknownField {
                section: section.as_str(),
                field: field.to_string(),
            })?;
        match (slot, value) {
            (Slot::Text(target), FieldValue::Text(value)) => *target = value,
            (Slot::Choice(target), FieldValue::Choice(value)) => *target = value,
            (Slot::Text(_), FieldValue::Choice(_)) => {
                return Err(EnrolmentError::TypeMismatch {
                    field: field.to_string(),
                    expected: "a text value",
                })
            }
            (Slot::Choice(_), FieldValue::Text(_)) => {
                return Err(EnrolmentError::TypeMismatch {
                    field: field.to_string(),
                    expected: "a yes/no choice",
                })
            }
        }
        Ok(())
    }

    pub fn field_names(section: SectionId) -> &'static [&'static str] {
        match section {
            SectionId::Student => Student::FIELDS,
            SectionId::ParentCarer1 | SectionId::ParentCarer2 => ParentCarer::FIELDS,
            SectionId::ParentLivingDetails => ParentLivingDetails::FIELDS,
            SectionId::FirstContact | SectionId::SecondContact => Contact::FIELDS,
            SectionId::ParentNotLiving => ParentNotLiving::FIELDS,
            SectionId::FirstEmergencyContact | SectionId::SecondEmergencyContact => {
                EmergencyContact::FIELDS
            }
            SectionId::PersonalDeclaration => PersonalDeclaration::FIELDS,
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let document = Document::default();
        for section in SectionId::ALL {
            for field in Document::field_names(section) {
                assert!(
                    document.get(section, field).is_some(),
                    "{section}.{field} missing"
                );
            }
        }
        assert_eq!(
            document.get(SectionId::Student, "overseas_student"),
            Some(FieldValue::Choice(None))
        );
        assert_eq!(
            document.get(SectionId::ParentNotLiving, "does_student_reside_here"),
            Some(FieldValue::no())
        );
    }

    #[test]
    fn set_rejects_unknown_fields_and_wrong_shapes() {
        let mut document = Document::default();
        assert!(matches!(
            document.set(SectionId::Student, "nickname", FieldValue::text("Bo")),
            Err(EnrolmentError::UnknownField { .. })
        ));
        assert!(matches!(
            document.set(SectionId::Student, "overseas_student", FieldValue::text("yes")),
            Err(EnrolmentError::TypeMismatch { .. })
        ));
        assert!(matches!(
            document.set(SectionId::Student, "family_name", FieldValue::yes()),
            Err(EnrolmentError::TypeMismatch { .. })
        ));

        document
            .set(SectionId::Student, "family_name", FieldValue::text("Nguyen"))
            .unwrap();
        assert_eq!(document.student.family_name, "Nguyen");
    }

    #[test]
    fn section_ids_round_trip_through_names() {
        for section in SectionId::ALL {
            assert_eq!(section.as_str().parse::<SectionId>().unwrap(), section);
        }
        assert!("guardian".parse::<SectionId>().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults_and_rejects_unknown_keys() {
        let document =
            Document::from_json(r#"{"student": {"family_name": "Lee", "overseas_student": true}}"#)
                .unwrap();
        assert_eq!(document.student.family_name, "Lee");
        assert_eq!(document.student.overseas_student, Some(true));
        assert_eq!(document.parent_not_living.does_student_reside_here, Some(false));

        assert!(Document::from_json(r#"{"student": {"shoe_size": "9"}}"#).is_err());
    }

    #[test]
    fn is_filled_requires_every_field() {
        let mut carer = ParentCarer::default();
        assert!(!carer.is_filled());
        carer.family_name = "Smith".into();
        carer.given_name = "Jo".into();
        assert!(!carer.is_filled());
        carer.title = "Ms".into();
        carer.gender = "Female".into();
        carer.relationship_to_student = "Mother".into();
        carer.country_of_birth = "Australia".into();
        assert!(carer.is_filled());
    }
}
