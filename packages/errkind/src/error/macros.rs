//! Macros for error creation and early return

/// Create a [`ClassifiedError`](crate::ClassifiedError) of the named kind
/// with a formatted message.
///
/// ```
/// let err = errkind::err!(NotExist, "no user {}", 42);
/// assert_eq!(err.kind(), errkind::Kind::NotExist);
/// assert_eq!(err.to_string(), "no user 42");
/// ```
#[macro_export]
macro_rules! err {
    ($kind:ident) => {
        $crate::ClassifiedError::new($crate::Kind::$kind, "")
    };
    ($kind:ident, $($arg:tt)+) => {
        $crate::ClassifiedError::new($crate::Kind::$kind, format!($($arg)+))
    };
}

/// Return early with an error built by [`err!`](crate::err)
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return Err($crate::err!($($arg)+).into())
    };
}

/// Return early with an error unless the condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
