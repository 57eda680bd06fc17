//! Cross-check verdicts against the `jsonschema` crate

use alertcheck::builtin::{alert_sample, alert_schema, alert_schema_document};
use serde_json::{Value, json};

fn reference() -> jsonschema::Validator {
    jsonschema::options()
        .should_validate_formats(true)
        .build(&alert_schema_document().unwrap())
        .unwrap()
}

fn mutate(pointer: &str, value: Value) -> Value {
    let mut document = alert_sample().unwrap();
    *document.pointer_mut(pointer).unwrap() = value;
    document
}

fn without(pointer: &str, key: &str) -> Value {
    let mut document = alert_sample().unwrap();
    document
        .pointer_mut(pointer)
        .and_then(Value::as_object_mut)
        .unwrap()
        .remove(key);
    document
}

#[test]
fn test_verdicts_agree_with_reference_implementation() {
    let ours = alert_schema().unwrap();
    let theirs = reference();

    let cases = vec![
        ("sample", alert_sample().unwrap()),
        ("extra root key", {
            let mut document = alert_sample().unwrap();
            document["extra"] = json!(true);
            document
        }),
        ("message type", mutate("/messageType", json!("ALERT_RESOLVED"))),
        ("message type number", mutate("/messageType", json!(7))),
        ("incident string", mutate("/incident", json!("INC-1"))),
        ("empty incident id", mutate("/incident/incident_id", json!(""))),
        ("session array", mutate("/incident/session", json!([]))),
        ("severity", mutate("/incident/session/metadata/severity", json!("urgent"))),
        ("severity ok", mutate("/incident/session/metadata/severity", json!("low"))),
        ("environment", mutate("/incident/session/metadata/environment", json!("qa"))),
        ("naive timestamp", mutate("/incident/session/metadata/timestamp", json!("2025-09-11T04:55:00"))),
        ("offset timestamp", mutate("/incident/session/metadata/timestamp", json!("2025-09-11T04:55:00+02:00"))),
        ("garbage timestamp", mutate("/incident/session/metadata/timestamp", json!("soon"))),
        ("no alerts", mutate("/incident/session/alerts", json!([]))),
        ("alert not object", mutate("/incident/session/alerts/0", json!("alert"))),
        ("alert severity", mutate("/incident/session/alerts/0/severity", json!("HIGH"))),
        ("empty alert title", mutate("/incident/session/alerts/0/title", json!(""))),
        ("missing session", without("/incident", "session")),
        ("missing timestamp", without("/incident/session/metadata", "timestamp")),
        ("missing alert title", without("/incident/session/alerts/0", "title")),
        ("extra metadata", mutate("/incident/session/metadata", json!({
            "title": "t", "service": "s", "severity": "low",
            "timestamp": "2025-09-11T04:55:00Z", "source": "x",
            "environment": "staging", "region": "eu"
        }))),
        ("not an object", json!(["ALERT_CREATED"])),
        ("null", Value::Null),
    ];

    for (name, document) in cases {
        assert_eq!(
            ours.is_valid(&document),
            theirs.is_valid(&document),
            "verdicts differ for case '{name}'"
        );
    }
}
