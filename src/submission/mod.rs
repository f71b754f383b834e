//! Submission adapter: turns the in-memory document into the wire payload
//! and posts it to the enrolment endpoint.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::SubmissionError;
use crate::form::document::Document;

pub const DEFAULT_ENDPOINT: &str =
    "https://urbanviewre.com/wstsc_backend/public/api/student-enrollment";

/// Student fields collected by the form but not stored by the enrolment API.
const SCRATCH_FIELDS: &[&str] = &[
    "attendance_from",
    "attendance_to",
    "community_school_name",
    "enrolment_date",
];

/// Human readable attendance range sent as `dates_of_attendance`.
pub fn attendance_summary(from: &str, to: &str) -> String {
    match (from.trim(), to.trim()) {
        ("", "") => "Not specified".to_string(),
        (from, "") => format!("From {from}"),
        ("", to) => format!("Until {to}"),
        (from, to) => format!("{from} to {to}"),
    }
}

/// Builds the JSON document posted to the endpoint.
///
/// The attendance months collapse into `dates_of_attendance`, scratch fields
/// are dropped and every yes/no field becomes a definite boolean.
pub fn build_payload(document: &Document) -> Result<Value, SubmissionError> {
    let mut payload = serde_json::to_value(document)?;

    if let Some(student) = section_object(&mut payload, "student") {
        let summary = attendance_summary(
            &document.student.attendance_from,
            &document.student.attendance_to,
        );
        student.insert("dates_of_attendance".into(), Value::String(summary));
        coerce_bool(student, "overseas_student");
        for field in SCRATCH_FIELDS {
            student.remove(*field);
        }
    }
    if let Some(living) = section_object(&mut payload, "parent_living_details") {
        coerce_bool(living, "is_student_residential_address");
    }
    if let Some(not_living) = section_object(&mut payload, "parent_not_living") {
        coerce_bool(not_living, "does_student_reside_here");
    }

    Ok(payload)
}

fn section_object<'a>(payload: &'a mut Value, section: &str) -> Option<&'a mut Map<String, Value>> {
    payload.get_mut(section).and_then(Value::as_object_mut)
}

/// Unanswered (`null`) becomes `false`.
fn coerce_bool(section: &mut Map<String, Value>, field: &str) {
    let value = section.get(field).and_then(Value::as_bool).unwrap_or(false);
    section.insert(field.to_string(), Value::Bool(value));
}

/// Interprets a raw HTTP outcome. The body must be JSON whatever the status;
/// error responses carry their message in `message` or `error`.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, SubmissionError> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|_| SubmissionError::InvalidJson(body.to_string()))?;

    if !(200..300).contains(&status) {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| parsed.get(*key).and_then(message_text))
            .unwrap_or_else(|| format!("Server error: {status}"));
        return Err(SubmissionError::Server { status, message });
    }

    Ok(parsed)
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Delivery seam for the payload. Returns the parsed response body.
pub trait Transport {
    fn send(&self, payload: &Value) -> Result<Value, SubmissionError>;
}

/// Posts the payload as JSON using a blocking reqwest client with its
/// default timeouts.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmissionError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, payload: &Value) -> Result<Value, SubmissionError> {
        info!(endpoint = %self.endpoint, "submitting enrolment");
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        let outcome = interpret_response(status, &body);
        match &outcome {
            Ok(_) => info!(status, "enrolment stored"),
            Err(err) => warn!(status, error = %err, "enrolment rejected"),
        }
        outcome
    }
}
