//! Behaviour of the built-in ALERT_CREATED schema

use alertcheck::builtin::{alert_sample, alert_schema};
use alertcheck::schema::Schema;
use alertcheck::validate::Violation;
use serde_json::{Value, json};

const SEVERITIES: [&str; 4] = ["low", "medium", "high", "critical"];

/// Every object in the sample and the keys its schema requires
const REQUIRED: &[(&str, &[&str])] = &[
    ("", &["messageType", "incident"]),
    ("/incident", &["incident_id", "session"]),
    (
        "/incident/session",
        &["session_id", "incident_id", "company_id", "metadata", "alerts"],
    ),
    (
        "/incident/session/metadata",
        &["title", "service", "severity", "timestamp", "source", "environment"],
    ),
    ("/incident/session/alerts/0", &["service", "title", "severity"]),
];

fn schema() -> Schema {
    alert_schema().unwrap()
}

fn sample() -> Value {
    alert_sample().unwrap()
}

fn set(document: &mut Value, pointer: &str, value: Value) {
    *document.pointer_mut(pointer).unwrap() = value;
}

/// Dotted display form of a JSON Pointer
fn dotted(pointer: &str) -> String {
    if pointer.is_empty() {
        return "<root>".to_owned();
    }
    let mut out = String::new();
    for token in pointer.trim_start_matches('/').split('/') {
        if token.parse::<usize>().is_ok() {
            out.push_str(&format!("[{token}]"));
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(token);
        }
    }
    out
}

#[test]
fn test_sample_is_valid() {
    schema().validate(&sample()).unwrap();
}

#[test]
fn test_sample_survives_reserialization() {
    let text = serde_json::to_string_pretty(&sample()).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, sample());
    schema().validate(&reparsed).unwrap();
}

#[test]
fn test_removing_any_required_key_fails() {
    let schema = schema();
    for (pointer, keys) in REQUIRED {
        for key in *keys {
            let mut document = sample();
            document
                .pointer_mut(pointer)
                .and_then(Value::as_object_mut)
                .unwrap()
                .remove(*key);

            let err = schema.validate(&document).unwrap_err();
            assert_eq!(
                err.violation,
                Violation::MissingRequired {
                    key: (*key).to_owned()
                },
                "removing {pointer}/{key}"
            );
            assert_eq!(err.path.to_string(), dotted(pointer));
            assert!(err.to_string().contains(&format!("missing required key '{key}'")));
        }
    }
}

#[test]
fn test_extra_key_fails_at_every_level() {
    let schema = schema();
    for (pointer, _) in REQUIRED {
        let mut document = sample();
        document
            .pointer_mut(pointer)
            .and_then(Value::as_object_mut)
            .unwrap()
            .insert("unexpected".to_owned(), json!(true));

        let err = schema.validate(&document).unwrap_err();
        assert_eq!(
            err.violation,
            Violation::AdditionalProperty {
                key: "unexpected".to_owned()
            },
            "extra key under {pointer:?}"
        );
        assert_eq!(err.path.to_string(), dotted(pointer));
    }
}

#[test]
fn test_severity_membership() {
    let schema = schema();
    for pointer in [
        "/incident/session/metadata/severity",
        "/incident/session/alerts/0/severity",
    ] {
        for severity in SEVERITIES {
            let mut document = sample();
            set(&mut document, pointer, json!(severity));
            assert!(schema.is_valid(&document), "{pointer} = {severity}");
        }

        for severity in ["urgent", "LOW", ""] {
            let mut document = sample();
            set(&mut document, pointer, json!(severity));
            let err = schema.validate(&document).unwrap_err();
            assert!(matches!(err.violation, Violation::Enum { .. }));
            assert_eq!(err.path.to_string(), dotted(pointer));
        }
    }
}

#[test]
fn test_severity_enum_message() {
    let mut document = sample();
    set(&mut document, "/incident/session/metadata/severity", json!("urgent"));
    let err = schema().validate(&document).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"incident.session.metadata.severity: must be one of ["low", "medium", "high", "critical"]"#
    );
}

#[test]
fn test_environment_membership() {
    let mut document = sample();
    set(&mut document, "/incident/session/metadata/environment", json!("production"));
    assert!(schema().is_valid(&document));

    set(&mut document, "/incident/session/metadata/environment", json!("qa"));
    assert!(!schema().is_valid(&document));
}

#[test]
fn test_alerts_must_not_be_empty() {
    let mut document = sample();
    set(&mut document, "/incident/session/alerts", json!([]));
    let err = schema().validate(&document).unwrap_err();
    assert_eq!(err.violation, Violation::MinItems { min: 1, actual: 0 });
    assert_eq!(
        err.to_string(),
        "incident.session.alerts: expected at least 1 item(s), got 0 (minItems)"
    );
}

#[test]
fn test_second_alert_is_checked() {
    let mut document = sample();
    let alerts = document
        .pointer_mut("/incident/session/alerts")
        .and_then(Value::as_array_mut)
        .unwrap();
    alerts.push(json!({"service": "payments", "title": "", "severity": "low"}));

    let err = schema().validate(&document).unwrap_err();
    assert_eq!(err.path.to_string(), "incident.session.alerts[1].title");
    assert_eq!(err.violation, Violation::MinLength { min: 1, actual: 0 });
}

#[test]
fn test_timestamp_requires_offset() {
    let pointer = "/incident/session/metadata/timestamp";

    let mut document = sample();
    set(&mut document, pointer, json!("2025-09-11T04:55:00"));
    let err = schema().validate(&document).unwrap_err();
    assert!(matches!(err.violation, Violation::Format { .. }));
    assert_eq!(
        err.to_string(),
        r#"incident.session.metadata.timestamp: "2025-09-11T04:55:00" is not a valid date-time"#
    );

    set(&mut document, pointer, json!("2025-09-11T04:55:00Z"));
    assert!(schema().is_valid(&document));

    set(&mut document, pointer, json!("2025-09-11T06:55:00.250+02:00"));
    assert!(schema().is_valid(&document));

    set(&mut document, pointer, json!("2025-09-11T10:25:00+0530"));
    assert!(schema().is_valid(&document));
}

#[test]
fn test_message_type_must_be_constant() {
    for other in ["ALERT_RESOLVED", "alert_created", ""] {
        let mut document = sample();
        set(&mut document, "/messageType", json!(other));
        let err = schema().validate(&document).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"messageType: must be equal to constant "ALERT_CREATED""#
        );
    }
}

#[test]
fn test_message_type_has_no_declared_type() {
    let mut document = sample();
    set(&mut document, "/messageType", json!(42));
    let err = schema().validate(&document).unwrap_err();
    assert!(matches!(err.violation, Violation::Const { .. }));
}

#[test]
fn test_wrong_container_type() {
    let mut document = sample();
    set(&mut document, "/incident/session", json!("session-1"));
    let err = schema().validate(&document).unwrap_err();
    assert_eq!(
        err.to_string(),
        "incident.session: expected type object, got string"
    );
}

#[test]
fn test_first_violation_wins() {
    // title (declared first) and severity are both broken
    let mut document = sample();
    set(&mut document, "/incident/session/metadata/title", json!(""));
    set(&mut document, "/incident/session/metadata/severity", json!("urgent"));
    let err = schema().validate(&document).unwrap_err();
    assert_eq!(err.path.to_string(), "incident.session.metadata.title");

    // a broken property is reported before an unknown key in the same object
    let mut document = sample();
    set(&mut document, "/incident/incident_id", json!(""));
    document
        .pointer_mut("/incident")
        .and_then(Value::as_object_mut)
        .unwrap()
        .insert("extra".to_owned(), json!(1));
    let err = schema().validate(&document).unwrap_err();
    assert_eq!(err.path.to_string(), "incident.incident_id");
}
