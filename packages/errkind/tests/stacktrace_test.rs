//! Tests for creation-site capture

use errkind::{new_io, ClassifiedError, ErrorBuilder, Kind, OptionExt, ResultExt, MAX_FRAMES};
use std::io;

#[test]
fn test_location_points_at_caller() {
    let (err, line) = (ClassifiedError::new(Kind::Io, "x"), line!());
    let location = err.stacktrace().location();
    assert_eq!(location.line(), line);
    assert!(location.file().ends_with("stacktrace_test.rs"));
}

#[test]
fn test_helpers_report_their_caller() {
    let (err, line) = (new_io("x"), line!());
    assert_eq!(err.stacktrace().location().line(), line);

    let failed: Result<(), io::Error> = Err(io::Error::other("boom"));
    let (err, line) = (failed.wrap_as_request("wrapped"), line!());
    let err = err.expect_err("should fail");
    assert_eq!(err.stacktrace().location().line(), line);

    let (err, line) = (None::<u8>.ok_or_kind(Kind::NotExist, "none"), line!());
    let err = err.expect_err("should fail");
    assert_eq!(err.stacktrace().location().line(), line);

    let errb = ErrorBuilder::new();
    errb.put("k", "v");
    let (err, line) = (errb.to_error(), line!());
    let err = err.expect("builder should produce an error");
    assert_eq!(err.stacktrace().location().line(), line);
}

#[test]
fn test_message_rewrap_keeps_original_capture() {
    let (err, line) = (new_io("first"), line!());
    let rewrapped = ClassifiedError::wrap(err, Kind::Io, "second");
    assert_eq!(rewrapped.stacktrace().location().line(), line);
}

#[test]
fn test_depth_is_bounded() {
    fn nested(depth: usize) -> ClassifiedError {
        if depth == 0 {
            ClassifiedError::new(Kind::Domain, "deep")
        } else {
            nested(depth - 1)
        }
    }
    let err = nested(64);
    assert!(err.stacktrace().depth() <= MAX_FRAMES);
    assert_eq!(err.stacktrace().frames().len(), err.stacktrace().depth());
}

#[cfg(feature = "full-backtrace")]
#[test]
fn test_frames_include_calling_function() {
    let err = ClassifiedError::new(Kind::Io, "x");
    assert!(err.stacktrace().depth() > 0);
    let frames = err.stacktrace().frames();
    assert!(frames
        .iter()
        .any(|frame| frame.function.contains("test_frames_include_calling_function")));
}
