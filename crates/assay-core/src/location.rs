//! Source locations for assertion failures
//!
//! Every assertion failure points at the line in the test that made the
//! failing claim. Locations are captured eagerly with `#[track_caller]`, so
//! adapters that defer the comparison until an effect completes still report
//! the caller's position rather than their own.

use std::fmt;

/// Position of the call that produced an assertion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file path, as reported by the compiler
    pub file: &'static str,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

impl SourceLocation {
    /// Capture the location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(std::panic::Location::caller())
    }
}

impl From<&'static std::panic::Location<'static>> for SourceLocation {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
