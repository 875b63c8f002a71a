//! Error classification for interception
//!
//! Intercepting an expected error needs two things from the error type of the
//! effect under test: a description of any raised error ([`Throwable`]) and a
//! way to decide whether it is of the expected kind ([`ErrorKind`]). Kinds are
//! ordinary types implementing a capability check, so the set of
//! distinguishable kinds is closed and known at compile time.
//!
//! ```rust
//! use assay_core::{AssertionFailure, ErrorKind, Throwable};
//! use std::borrow::Cow;
//!
//! #[derive(Debug)]
//! enum AppError {
//!     Parse(String),
//!     Assertion(AssertionFailure),
//! }
//!
//! impl Throwable for AppError {
//!     fn kind_name(&self) -> Cow<'_, str> {
//!         match self {
//!             AppError::Parse(_) => "Parse".into(),
//!             AppError::Assertion(_) => "AssertionFailure".into(),
//!         }
//!     }
//!
//!     fn message(&self) -> Option<Cow<'_, str>> {
//!         match self {
//!             AppError::Parse(message) => Some(message.as_str().into()),
//!             AppError::Assertion(failure) => Some(failure.message.as_str().into()),
//!         }
//!     }
//!
//!     fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
//!         match self {
//!             AppError::Assertion(failure) => Some(failure),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! struct ParseKind;
//!
//! impl ErrorKind<AppError> for ParseKind {
//!     type Caught = String;
//!     const NAME: &'static str = "Parse";
//!
//!     fn narrow(error: AppError) -> Result<String, AppError> {
//!         match error {
//!             AppError::Parse(message) => Ok(message),
//!             other => Err(other),
//!         }
//!     }
//! }
//! ```

use crate::errors::{AssayError, AssertionFailure, FixtureError};
use std::borrow::Cow;
use std::fmt;

/// Non-recoverable conditions of the host runtime
///
/// Errors reporting one of these are never intercepted: every adapter
/// re-raises them unchanged. Panics are not errors and are not listed here;
/// they unwind through the adapters untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fatality {
    /// Memory could not be allocated
    OutOfMemory,
    /// The stack was exhausted
    StackOverflow,
    /// The executing thread or task was interrupted
    Interrupted,
}

impl fmt::Display for Fatality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Fatality::OutOfMemory => "out of memory",
            Fatality::StackOverflow => "stack overflow",
            Fatality::Interrupted => "interrupted",
        };
        f.write_str(text)
    }
}

/// Description of an error raised by an effect under test
pub trait Throwable: fmt::Debug {
    /// Name of the error's kind, used in interception failure messages
    fn kind_name(&self) -> Cow<'_, str>;

    /// Error message, if the error carries one
    fn message(&self) -> Option<Cow<'_, str>>;

    /// The fatal condition this error reports, if any
    fn fatality(&self) -> Option<Fatality> {
        None
    }

    /// View of this error as an assertion failure raised inside the body
    fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        None
    }
}

/// A named kind of error that interception can expect
pub trait ErrorKind<E> {
    /// Value yielded when an error of this kind is intercepted
    type Caught;

    /// Kind name used in failure messages
    const NAME: &'static str;

    /// Narrow `error` to this kind, handing it back unchanged if it is not
    fn narrow(error: E) -> Result<Self::Caught, E>;
}

/// Matches every error; the caught value is the error itself
#[derive(Debug, Clone, Copy)]
pub struct AnyError;

impl<E> ErrorKind<E> for AnyError {
    type Caught = E;
    const NAME: &'static str = "Error";

    fn narrow(error: E) -> Result<E, E> {
        Ok(error)
    }
}

/// Matches assertion failures raised inside the body
#[derive(Debug, Clone, Copy)]
pub struct AssertionFailed;

impl<E: Throwable> ErrorKind<E> for AssertionFailed {
    type Caught = AssertionFailure;
    const NAME: &'static str = "AssertionFailure";

    fn narrow(error: E) -> Result<AssertionFailure, E> {
        if let Some(failure) = error.as_assertion_failure() {
            return Ok(failure.clone());
        }
        Err(error)
    }
}

/// Matches fixture misuse reported through [`AssayError`]
#[derive(Debug, Clone, Copy)]
pub struct FixtureMisuse;

impl ErrorKind<AssayError> for FixtureMisuse {
    type Caught = FixtureError;
    const NAME: &'static str = "FixtureError";

    fn narrow(error: AssayError) -> Result<FixtureError, AssayError> {
        match error {
            AssayError::Fixture(fixture) => Ok(fixture),
            other => Err(other),
        }
    }
}

impl Throwable for AssertionFailure {
    fn kind_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("AssertionFailure")
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.message.as_str()))
    }

    fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        Some(self)
    }
}

impl Throwable for AssayError {
    fn kind_name(&self) -> Cow<'_, str> {
        match self {
            AssayError::Assertion(_) => Cow::Borrowed("AssertionFailure"),
            AssayError::Fixture(_) => Cow::Borrowed("FixtureError"),
            AssayError::TimedOut { .. } => Cow::Borrowed("TimedOut"),
            AssayError::Fatal(_) => Cow::Borrowed("Fatal"),
            AssayError::Raised { kind, .. } => Cow::Borrowed(kind.as_str()),
            AssayError::Config(_) => Cow::Borrowed("ConfigError"),
        }
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        match self {
            AssayError::Assertion(failure) => Some(Cow::Borrowed(failure.message.as_str())),
            AssayError::Raised { message, .. } => message.as_deref().map(Cow::Borrowed),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn fatality(&self) -> Option<Fatality> {
        match self {
            AssayError::Fatal(fatality) => Some(*fatality),
            _ => None,
        }
    }

    fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            AssayError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}
