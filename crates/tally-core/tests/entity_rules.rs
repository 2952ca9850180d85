//! Entity naming and registry rules.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tally_core::{Entity, EntityRegistry, HealthStatus, VoteCounter, MAX_ENTITY_LEN};

#[test]
fn empty_name_is_invalid_request() {
    let err = Entity::parse("").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_REQUEST");
}

#[test]
fn rejects_whitespace_and_punctuation() {
    for bad in [" google", "goo gle", "google\n", "a\"b", "<script>", "ç"] {
        assert!(Entity::parse(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn length_limit_matches_column() {
    let ok = "a".repeat(MAX_ENTITY_LEN);
    assert!(Entity::parse(&ok).is_ok());
    let too_long = "a".repeat(MAX_ENTITY_LEN + 1);
    assert!(Entity::parse(&too_long).is_err());
}

#[test]
fn accepts_plain_names() {
    let e = Entity::parse("nvidia").unwrap();
    assert_eq!(e.as_str(), "nvidia");
    assert_eq!(e.to_string(), "nvidia");
    assert!(Entity::parse("big_co-2").is_ok());
}

#[test]
fn registry_keeps_order_and_rejects_duplicates() {
    let reg = EntityRegistry::from_names(["b", "a", "c"]).unwrap();
    let names: Vec<&str> = reg.iter().map(|e| e.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);
    assert_eq!(reg.len(), 3);

    let err = EntityRegistry::from_names(["a", "a"]).expect_err("dup");
    assert_eq!(err.client_code().as_str(), "CONFIG");

    let err = EntityRegistry::from_names(Vec::<String>::new()).expect_err("empty");
    assert_eq!(err.client_code().as_str(), "CONFIG");
}

#[test]
fn counter_serializes_with_wire_names() {
    let c = VoteCounter::new(Entity::parse("apple").unwrap(), 7);
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v, serde_json::json!({ "company": "apple", "votes": 7 }));
}

#[test]
fn health_status_from_bool() {
    assert_eq!(HealthStatus::from(true).as_str(), "healthy");
    assert!(!HealthStatus::from(false).is_healthy());
}
