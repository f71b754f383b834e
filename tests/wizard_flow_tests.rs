mod common;

use std::cell::RefCell;

use enrolment_core::errors::SubmissionError;
use enrolment_core::form::{FieldValue, FormStore, SectionId, Step, StepOutcome, Wizard};
use enrolment_core::submission::Transport;
use serde_json::{json, Value};

#[derive(Default)]
struct CapturingTransport {
    payloads: RefCell<Vec<Value>>,
}

impl Transport for CapturingTransport {
    fn send(&self, payload: &Value) -> Result<Value, SubmissionError> {
        self.payloads.borrow_mut().push(payload.clone());
        Ok(json!({"message": "ok"}))
    }
}

#[test]
fn complete_document_walks_every_step_and_submits() {
    let store = FormStore::with_document(common::valid_document());
    let mut wizard = Wizard::new(store, CapturingTransport::default());

    for expected in [Step::Family, Step::Contacts, Step::Emergency, Step::Declaration] {
        assert_eq!(wizard.next(), StepOutcome::Advanced(expected));
    }
    assert_eq!(wizard.next(), StepOutcome::Submitted(json!({"message": "ok"})));

    let payloads = wizard.transport().payloads.borrow();
    let payload = &payloads[0];
    assert_eq!(payload["student"]["dates_of_attendance"], json!("2024-02 to 2024-05"));
    assert_eq!(payload["parent_living_details"]["is_student_residential_address"], json!(false));
    assert!(payload["student"].get("attendance_to").is_none());
}

#[test]
fn living_details_alone_satisfy_the_family_step() {
    let mut document = common::valid_document();
    document.parent_carer_1 = Default::default();
    let mut wizard = Wizard::new(FormStore::with_document(document), CapturingTransport::default());
    assert_eq!(wizard.next(), StepOutcome::Advanced(Step::Family));
    assert!(matches!(wizard.next(), StepOutcome::Blocked(_)));

    let store = wizard.store_mut();
    for (field, value) in [
        ("correspondence_name", "Linh Nguyen"),
        ("residential_address", "12 Illawarra Road, Marrickville"),
    ] {
        store
            .update(SectionId::ParentLivingDetails, field, FieldValue::text(value))
            .unwrap();
    }
    store
        .update(
            SectionId::ParentLivingDetails,
            "is_student_residential_address",
            FieldValue::no(),
        )
        .unwrap();
    assert!(matches!(wizard.next(), StepOutcome::Blocked(_)));
    assert_eq!(
        wizard.store().error(SectionId::ParentLivingDetails, "correspondence_address"),
        Some("This field is required")
    );

    wizard
        .store_mut()
        .update(
            SectionId::ParentLivingDetails,
            "correspondence_address",
            FieldValue::text("PO Box 123, Marrickville"),
        )
        .unwrap();
    assert_eq!(wizard.next(), StepOutcome::Advanced(Step::Contacts));
}
