//! Tests for keyed error aggregation

use errkind::{new_request, ClassifiedError, Detail, ErrorBuilder, Kind, Putter, StubPutter};
use serde_json::json;

#[test]
fn test_put_chains_repeated_keys() {
    let errb = ErrorBuilder::new();
    assert!(!errb.not_nil());
    assert!(errb.to_error().is_none());

    errb.put("k1", 1);
    assert!(errb.not_nil());
    let err = errb.to_error().expect("builder should produce an error");
    assert_eq!(err.kind(), Kind::Request);
    assert_eq!(err.to_json().expect("serialization should succeed"), r#"{"k1":1}"#);

    errb.put("k1", 3);
    errb.put("newkey", 4);
    let err = errb.to_error().expect("builder should produce an error");
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"k1":[1,3],"newkey":4}"#
    );
    assert_eq!(err.to_string(), "k1: [1, 3], newkey: 4");
}

#[test]
fn test_third_put_extends_chain() {
    let errb = ErrorBuilder::new();
    errb.put("name", "too short");
    errb.put("name", "has digits");
    errb.put("name", "reserved");

    let stored = errb.get("name").expect("name should be stored");
    assert_eq!(stored.as_slice().len(), 3);
    assert!(stored.as_slice().iter().all(|item| item.as_str().is_some()));
    assert_eq!(
        stored.to_json_value().expect("serialization should succeed"),
        json!(["too short", "has digits", "reserved"])
    );
}

#[test]
fn test_nil_puts_are_ignored() {
    let errb = ErrorBuilder::new();
    errb.put("a", None::<&str>);
    errb.put("b", serde_json::Value::Null);
    errb.putter("c").put(Detail::NIL);
    assert!(!errb.not_nil());
    assert!(errb.is_empty());
    assert!(errb.to_error().is_none());
    assert!(errb.to_result().is_ok());

    errb.put("a", Some("present"));
    assert_eq!(errb.len(), 1);
}

#[test]
fn test_fork_prefixes_keys() {
    let b1 = ErrorBuilder::new();
    b1.put("k", 1);
    assert_eq!(b1.get("k"), Some(Detail::from(1)));

    let b2 = b1.fork("b");
    b2.put("k", 2);
    let b3 = b1.fork("c");
    b3.put("k", 3);

    assert_eq!(b2.get("k"), Some(Detail::from(2)));
    assert_eq!(b3.get("k"), Some(Detail::from(3)));
    assert_eq!(b1.get("b|k"), Some(Detail::from(2)));
    assert_eq!(b2.prefix(), "b|");

    let keys: Vec<String> = b1.snapshot().keys().map(str::to_owned).collect();
    assert_eq!(keys, vec!["b|k", "c|k", "k"]);
    assert!(b3.not_nil());
}

#[test]
fn test_nested_forks_and_indexes() {
    let errb = ErrorBuilder::new();
    errb.fork("rows").fork_index(3).put("email", "missing");
    errb.fork_index(0).put("name", "empty");

    let details = errb.details();
    assert!(details.contains_key("rows|3|email"));
    assert!(details.contains_key("0|name"));
}

#[test]
fn test_putter_uses_colon_for_sub_keys() {
    let errb = ErrorBuilder::new();
    let address = errb.putter("address");
    address.put("incomplete");
    address.fork("city").put("unknown city");
    address.fork_index(1).put("bad line");
    errb.putter("").fork("bare").put("x");
    errb.fork("user").putter("email").fork("domain").put("no mx record");

    let keys: Vec<String> = errb.snapshot().keys().map(str::to_owned).collect();
    assert_eq!(
        keys,
        vec![
            "address",
            "address:1",
            "address:city",
            "bare",
            "user|email:domain"
        ]
    );
    assert_eq!(address.key(), "address");
}

fn validate_name(name: &str, errp: &impl Putter) {
    if name.len() < 3 {
        errp.put("name is too short");
    }
    if name.contains('%') {
        errp.put("name contains invalid characters");
    }
}

#[test]
fn test_putter_abstracts_the_key() {
    let errb = ErrorBuilder::new();
    validate_name("a%", &errb.putter("first_name"));
    validate_name("valid", &errb.putter("last_name"));

    let err = errb.to_error().expect("builder should produce an error");
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"first_name":["name is too short","name contains invalid characters"]}"#
    );

    let stub = StubPutter::new();
    validate_name("valid", &stub);
    assert!(!stub.has_error());
    validate_name("no", &stub.fork("nested"));
    assert!(stub.has_error());
}

#[test]
fn test_stub_putter_ignores_nil() {
    let stub = StubPutter::new();
    stub.put(None::<String>);
    assert!(!stub.has_error());
    stub.fork_index(4).put(false);
    assert!(stub.has_error());
}

#[test]
fn test_error_is_a_snapshot() {
    let errb = ErrorBuilder::new();
    errb.put("first", "a");
    let err = errb.to_error().expect("builder should produce an error");

    errb.put("second", "b");
    assert_eq!(err.details().len(), 1);
    assert_eq!(errb.len(), 2);
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"first":"a"}"#
    );
}

#[test]
fn test_classified_details_render_with_their_own_rules() {
    let errb = ErrorBuilder::new();
    errb.put("name", new_request("too short"));
    errb.put("upstream", ClassifiedError::io("db at 10.0.0.7 down"));

    let err = errb.to_error().expect("builder should produce an error");
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"name":{"msg":"too short"},"upstream":"Internal server error: db at 10.0.0.7 down"}"#
    );
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_to_result_for_question_mark() {
    fn validate(age: i64) -> errkind::Result<()> {
        let errb = ErrorBuilder::new();
        if age < 0 {
            errb.put("age", "must not be negative");
        }
        errb.to_result()
    }

    assert!(validate(3).is_ok());
    let err = validate(-1).expect_err("negative age should fail");
    assert!(err.is_aggregate());
    assert_eq!(err.message(), "");
}
