#![allow(dead_code)]

use std::io::Write;

use enrolment_core::form::{Document, FieldValue, SectionId};
use tempfile::NamedTempFile;

/// A document that passes every step gate with the minimum of data.
pub fn valid_document() -> Document {
    let mut document = Document::default();
    let entries: &[(SectionId, &str, &str)] = &[
        (SectionId::Student, "family_name", "Nguyen"),
        (SectionId::Student, "first_given_name", "An"),
        (SectionId::Student, "gender", "Female"),
        (SectionId::Student, "date_of_birth", "2015-03-14"),
        (SectionId::Student, "enrollment_year", "K4"),
        (SectionId::Student, "community_school_name", "Vietnamese Community School"),
        (SectionId::Student, "enrolment_date", "2024-02-01"),
        (SectionId::Student, "day_school_name", "Marrickville Public School"),
        (SectionId::Student, "day_school_location", "Marrickville"),
        (SectionId::Student, "attendance_from", "2024-02"),
        (SectionId::Student, "attendance_to", "2024-05"),
        (SectionId::ParentCarer1, "title", "Mrs"),
        (SectionId::ParentCarer1, "gender", "Female"),
        (SectionId::ParentCarer1, "relationship_to_student", "Mother"),
        (SectionId::ParentCarer1, "family_name", "Nguyen"),
        (SectionId::ParentCarer1, "given_name", "Linh"),
        (SectionId::ParentCarer1, "country_of_birth", "Vietnam"),
        (SectionId::FirstContact, "parent_name", "Linh Nguyen"),
        (SectionId::FirstContact, "mobile_phone", "0412 345 678"),
        (SectionId::FirstEmergencyContact, "given_name", "Minh"),
        (SectionId::FirstEmergencyContact, "mobile_phone", "0498 765 432"),
        (SectionId::PersonalDeclaration, "first_parent_carer_name", "Linh Nguyen"),
        (SectionId::PersonalDeclaration, "first_parent_carer_name_date", "2024-05-30"),
    ];
    for (section, field, value) in entries {
        document
            .set(*section, field, FieldValue::text(*value))
            .expect("known field");
    }
    document
        .set(SectionId::Student, "overseas_student", FieldValue::no())
        .expect("known field");
    document
}

/// Writes the document as pretty JSON into a temp file.
pub fn write_document(document: &Document) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    let json = document.to_json_pretty().expect("serialize document");
    file.write_all(json.as_bytes()).expect("write document");
    file
}
