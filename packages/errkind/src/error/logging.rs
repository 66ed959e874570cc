//! Error logging sinks and helpers
//!
//! Logging happens in-process, so sinks print the full error text together
//! with the kind and creation stacktrace of classified errors. The client
//! redaction of [`ClassifiedError`]'s JSON form does not apply here.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::Once;

use tokio::task::JoinHandle;

use super::types::ClassifiedError;

static INIT_LOGGER: Once = Once::new();

/// Install the `env_logger` backend for the [`log`] facade.
///
/// Call once at application startup; later calls are no-ops. Verbosity comes
/// from `RUST_LOG`, e.g. `RUST_LOG=errkind=debug`.
pub fn init() {
    INIT_LOGGER.call_once(|| {
        let installed = env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .try_init();
        if installed.is_ok() {
            log::debug!("errkind logging initialized");
        }
    });
}

/// Logging setup for tests; safe to call from every test
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// A sink for errors nobody else is going to handle
pub trait Logger {
    /// Record `err` with a short description of where it surfaced
    fn error(&self, message: &str, err: &(dyn StdError + 'static));
}

impl<L: Logger + ?Sized> Logger for &L {
    fn error(&self, message: &str, err: &(dyn StdError + 'static)) {
        (**self).error(message, err);
    }
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn error(&self, message: &str, err: &(dyn StdError + 'static)) {
        (**self).error(message, err);
    }
}

/// Logs through the [`log`] facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn error(&self, message: &str, err: &(dyn StdError + 'static)) {
        match err.downcast_ref::<ClassifiedError>() {
            Some(classified) => {
                log::error!("{message}: [{:?}] {classified:#}", classified.kind());
            }
            None => log::error!("{message}: {err}"),
        }
    }
}

/// Emits structured [`tracing`] events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str, err: &(dyn StdError + 'static)) {
        match err.downcast_ref::<ClassifiedError>() {
            Some(classified) => tracing::error!(
                kind = ?classified.kind(),
                error = %classified,
                stacktrace = %classified.stacktrace(),
                "{message}"
            ),
            None => tracing::error!(error = %err, "{message}"),
        }
    }
}

/// Log `err` as unhandled when there is one
pub fn log_error<L, E>(logger: &L, err: Option<&E>)
where
    L: Logger + ?Sized,
    E: StdError + 'static,
{
    if let Some(err) = err {
        logger.error("Unhandled error", err);
    }
}

/// Run `f` and log its error, if any.
///
/// Meant for cleanup calls whose failure cannot be propagated.
pub fn call_and_log<L, T, E, F>(logger: &L, f: F) -> Option<T>
where
    L: Logger + ?Sized,
    E: StdError + 'static,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Some(value),
        Err(err) => {
            logger.error("Unhandled error", &err);
            None
        }
    }
}

/// Spawn `future` on the tokio runtime and log its error, if any.
///
/// Must be called from within a runtime.
pub fn spawn_and_log<L, E, F>(logger: L, future: F) -> JoinHandle<()>
where
    L: Logger + Send + 'static,
    E: StdError + Send + 'static,
    F: Future<Output = Result<(), E>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = future.await {
            logger.error("Unhandled error in task", &err);
        }
    })
}
