//! Tests for macros, extension traits and sequencing helpers

use errkind::{
    bail, ensure, err, join, seq, ClassifiedError, Kind, OptionExt, ResultExt, UntilFirst,
};
use std::cell::Cell;
use std::io;

fn check_quantity(n: i64) -> errkind::Result<i64> {
    ensure!(n > 0, Invalid, "quantity must be positive, got {}", n);
    if n > 100 {
        bail!(Request, "quantity {n} exceeds the limit");
    }
    Ok(n)
}

#[test]
fn test_macros_build_classified_errors() {
    let err = err!(NotExist, "no user {}", 42);
    assert_eq!(err.kind(), Kind::NotExist);
    assert_eq!(err.to_string(), "no user 42");
    assert_eq!(err!(Private).to_string(), "error");

    assert_eq!(check_quantity(5).expect("5 should pass"), 5);
    let err = check_quantity(-2).expect_err("-2 should fail");
    assert_eq!(err.kind(), Kind::Invalid);
    assert_eq!(err.to_string(), "quantity must be positive, got -2");
    let err = check_quantity(101).expect_err("101 should fail");
    assert_eq!(err.kind(), Kind::Request);
}

#[test]
fn test_bail_converts_into_anyhow() {
    fn load() -> anyhow::Result<()> {
        bail!(Permission, "read only");
    }
    let err = load().expect_err("load should fail");
    let classified = err
        .downcast_ref::<ClassifiedError>()
        .expect("anyhow should carry the classified error");
    assert_eq!(classified.kind(), Kind::Permission);
}

#[test]
fn test_result_ext_wraps_errors() {
    let parsed: Result<i32, _> = "x1".parse::<i32>();
    let err = parsed.wrap_as(Kind::Invalid, "parsing count").expect_err("should fail");
    assert_eq!(err.kind(), Kind::Invalid);
    assert_eq!(err.to_string(), "parsing count [invalid digit found in string]");

    let ok: Result<i32, io::Error> = Ok(7);
    assert_eq!(ok.wrap_as_io("reading").expect("ok should pass"), 7);

    let failed: Result<(), io::Error> = Err(io::Error::other("gone"));
    assert_eq!(
        failed.wrap_as_domain("syncing").expect_err("should fail").kind(),
        Kind::Domain
    );

    let failed: Result<(), io::Error> = Err(io::Error::other("gone"));
    let err = failed.wrap_as_request("upload").expect_err("should fail");
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"err":"gone","msg":"upload"}"#
    );
}

#[test]
fn test_wrap_as_with_is_lazy() {
    let calls = Cell::new(0);
    let message = || {
        calls.set(calls.get() + 1);
        "expensive context"
    };

    let ok: Result<(), io::Error> = Ok(());
    ok.wrap_as_with(Kind::Io, message).expect("ok should pass");
    assert_eq!(calls.get(), 0);

    let failed: Result<(), io::Error> = Err(io::Error::other("boom"));
    let err = failed.wrap_as_with(Kind::Io, message).expect_err("should fail");
    assert_eq!(calls.get(), 1);
    assert_eq!(err.to_string(), "expensive context [boom]");
}

#[test]
fn test_same_kind_result_wrap_flattens() {
    let inner: errkind::Result<()> = Err(ClassifiedError::request("first"));
    let err = inner.wrap_as_request("second").expect_err("should fail");
    assert_eq!(err.to_string(), "second [first]");
    assert_eq!(
        err.to_json().expect("serialization should succeed"),
        r#"{"err":{"msg":"first"},"msg":"second"}"#
    );
}

#[test]
fn test_option_ext() {
    assert_eq!(Some(3).ok_or_kind(Kind::NotExist, "missing").ok(), Some(3));
    let err = None::<u8>
        .ok_or_kind(Kind::NotExist, "user 9")
        .expect_err("none should fail");
    assert_eq!(err.kind(), Kind::NotExist);
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_join_filters_missing_errors() {
    assert!(join(vec![None::<io::Error>, None]).is_none());
    assert!(join(Vec::<Option<io::Error>>::new()).is_none());

    let joined = join(vec![
        None,
        Some(io::Error::other("a")),
        None,
        Some(io::Error::other("b")),
    ])
    .expect("two errors should be joined");
    assert_eq!(joined.len(), 2);
    assert_eq!(joined.to_string(), "a; b");

    let joined = join([Some(ClassifiedError::io("disk"))]).expect("one error should be joined");
    assert!(joined.errors()[0].classified().is_some());
}

#[test]
fn test_seq_joins_with_spaces() {
    assert_eq!(seq(["a", "b", "c"]).to_string(), "a b c");
    assert_eq!(seq(["", "b"]).to_string(), " b");
    assert_eq!(seq(Vec::<String>::new()).to_string(), "");
}

#[test]
fn test_until_first_stops_at_failure() {
    let ran = Cell::new(0);
    let mut steps = UntilFirst::new();
    steps
        .step(|| {
            ran.set(ran.get() + 1);
            Ok(())
        })
        .step(|| Err(ClassifiedError::new(Kind::Invalid, "second")))
        .step(|| {
            ran.set(ran.get() + 10);
            Ok(())
        });

    assert_eq!(ran.get(), 1);
    assert_eq!(steps.err().map(ToString::to_string), Some("second".to_string()));
    assert!(steps.into_result().is_err());

    let mut clean = UntilFirst::new();
    clean.step(|| Ok(()));
    assert!(clean.into_result().is_ok());
}
