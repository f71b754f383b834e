mod common;

use enrolment_core::errors::SubmissionError;
use enrolment_core::submission::{build_payload, HttpTransport, Transport};
use mockito::{Matcher, Server};
use serde_json::json;

#[test]
fn posts_payload_and_returns_parsed_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/student-enrollment")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "student": {
                "family_name": "Nguyen",
                "overseas_student": false,
                "dates_of_attendance": "2024-02 to 2024-05"
            },
            "parent_not_living": { "does_student_reside_here": false }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Student enrollment stored","id":42}"#)
        .create();

    let endpoint = format!("{}/api/student-enrollment", server.url());
    let transport = HttpTransport::new(endpoint.clone()).unwrap();
    assert_eq!(transport.endpoint(), endpoint);
    let payload = build_payload(&common::valid_document()).unwrap();
    let body = transport.send(&payload).unwrap();

    mock.assert();
    assert_eq!(body["id"], json!(42));
}

#[test]
fn error_status_surfaces_server_message() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/student-enrollment")
        .with_status(422)
        .with_body(r#"{"message":"The student.family_name field is required."}"#)
        .create();

    let transport = HttpTransport::new(format!("{}/api/student-enrollment", server.url())).unwrap();
    let err = transport.send(&json!({})).unwrap_err();

    mock.assert();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "The student.family_name field is required.");
}

#[test]
fn error_status_without_message_uses_generic_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/student-enrollment")
        .with_status(500)
        .with_body("{}")
        .create();

    let transport = HttpTransport::new(format!("{}/api/student-enrollment", server.url())).unwrap();
    let err = transport.send(&json!({})).unwrap_err();

    assert_eq!(err.to_string(), "Server error: 500");
}

#[test]
fn non_json_body_is_reported() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/student-enrollment")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let transport = HttpTransport::new(format!("{}/api/student-enrollment", server.url())).unwrap();
    let err = transport.send(&json!({})).unwrap_err();

    assert!(matches!(err, SubmissionError::InvalidJson(_)));
}

#[test]
fn unreachable_endpoint_is_a_transport_failure() {
    let transport = HttpTransport::new("http://127.0.0.1:9/api/student-enrollment").unwrap();
    let err = transport.send(&json!({})).unwrap_err();

    assert!(matches!(err, SubmissionError::Transport(_)));
    assert!(err
        .to_string()
        .starts_with("Failed to store student enrollment data:"));
}
