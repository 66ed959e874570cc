//! Creation-site stacktrace capture
//!
//! Frames are recorded unresolved when an error is built and symbolized only
//! when the trace is rendered. With the `full-backtrace` feature disabled the
//! trace holds just the caller location.

use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

#[cfg(feature = "full-backtrace")]
use backtrace::{Backtrace, BacktraceFrame};

/// Maximum number of frames kept per capture
pub const MAX_FRAMES: usize = 32;

#[cfg(feature = "full-backtrace")]
const WALK_LIMIT: usize = 256;

/// Call stack captured where an error was created.
#[derive(Clone)]
pub struct Stacktrace {
    location: &'static Location<'static>,
    #[cfg(feature = "full-backtrace")]
    frames: Backtrace,
}

/// One symbolized frame of a [`Stacktrace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Demangled function name, `<unknown>` when symbols are missing
    pub function: String,
    /// Source file, when debug info is available
    pub file: Option<PathBuf>,
    /// Source line, when debug info is available
    pub line: Option<u32>,
}

impl Stacktrace {
    /// Capture the current call stack.
    ///
    /// `skip` is the number of frames above the caller of this function to
    /// drop, so that a constructor `skip` levels deep reports its own caller
    /// as the first frame. `location` is the `#[track_caller]` location of the
    /// public entry point.
    #[inline(never)]
    #[must_use]
    pub fn capture(skip: usize, location: &'static Location<'static>) -> Self {
        #[cfg(not(feature = "full-backtrace"))]
        let _ = skip;
        Self {
            location,
            #[cfg(feature = "full-backtrace")]
            frames: walk(Self::capture as usize, skip),
        }
    }

    /// Source location of the public call that created the error
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Number of captured frames
    #[must_use]
    pub fn depth(&self) -> usize {
        #[cfg(feature = "full-backtrace")]
        {
            self.frames.frames().len()
        }
        #[cfg(not(feature = "full-backtrace"))]
        {
            0
        }
    }

    /// Symbolize and return the captured frames, innermost first
    #[must_use]
    pub fn frames(&self) -> Vec<StackFrame> {
        #[cfg(feature = "full-backtrace")]
        {
            let mut resolved = self.frames.clone();
            resolved.resolve();
            resolved
                .frames()
                .iter()
                .map(|frame| match frame.symbols().first() {
                    Some(symbol) => StackFrame {
                        function: symbol
                            .name()
                            .map_or_else(|| "<unknown>".to_string(), |name| name.to_string()),
                        file: symbol.filename().map(PathBuf::from),
                        line: symbol.lineno(),
                    },
                    None => StackFrame {
                        function: "<unknown>".to_string(),
                        file: None,
                        line: None,
                    },
                })
                .collect()
        }
        #[cfg(not(feature = "full-backtrace"))]
        {
            Vec::new()
        }
    }
}

#[cfg(feature = "full-backtrace")]
fn walk(anchor: usize, skip: usize) -> Backtrace {
    let mut raw = Vec::new();
    backtrace::trace(|frame| {
        raw.push(frame.clone());
        raw.len() < WALK_LIMIT
    });

    // Without a match on the anchor (no symbol info) keep the whole walk.
    let start = raw
        .iter()
        .position(|frame| frame.symbol_address() as usize == anchor)
        .map_or(0, |idx| idx + 1 + skip);

    let frames: Vec<BacktraceFrame> = raw
        .into_iter()
        .skip(start)
        .take(MAX_FRAMES)
        .map(BacktraceFrame::from)
        .collect();
    Backtrace::from(frames)
}

impl fmt::Display for Stacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "created at {}", self.location)?;
        for (idx, frame) in self.frames().iter().enumerate() {
            write!(f, "\n{idx:>4}: {}", frame.function)?;
            if let Some(file) = &frame.file {
                write!(f, "\n        at {}", file.display())?;
                if let Some(line) = frame.line {
                    write!(f, ":{line}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Stacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stacktrace")
            .field("location", &format_args!("{}", self.location))
            .field("depth", &self.depth())
            .finish()
    }
}
