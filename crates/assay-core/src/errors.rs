//! Unified error system for Assay
//!
//! Three error families exist: the assertion failure raised by every
//! comparison helper, the fixture-misuse errors raised by the fixture cache,
//! and [`AssayError`], which unifies them with timeouts, fatal conditions and
//! errors raised by code under test.

use crate::location::SourceLocation;
use crate::throwable::Fatality;

/// Structured "assertion failed" error
///
/// This is the error every assertion helper raises. It is lifted into the
/// error type of the effect under test through `From<AssertionFailure>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {message}{}", render_clues(.clues))]
pub struct AssertionFailure {
    /// Failure description
    pub message: String,
    /// Extra context rendered below the message, one entry per line
    pub clues: Vec<String>,
    /// Call site of the failing assertion
    pub location: SourceLocation,
}

impl AssertionFailure {
    /// Create a failure without extra clues
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            clues: Vec::new(),
            location,
        }
    }

    /// Attach an additional clue line
    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clues.push(clue.into());
        self
    }
}

fn render_clues(clues: &[String]) -> String {
    clues.iter().map(|clue| format!("\n{clue}")).collect()
}

/// Fixture misuse and lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixtureError {
    /// The fixture was read before acquisition, after release, or was never
    /// registered with the suite
    #[error(
        "The fixture `{name}` was not instantiated. Register it with `SuiteBuilder::fixture` and include a reference to this fixture."
    )]
    NotInstantiated {
        /// Fixture name
        name: String,
    },

    /// Two fixtures with the same name were registered with one suite
    #[error("The fixture `{name}` is registered more than once in this suite.")]
    DuplicateName {
        /// Fixture name
        name: String,
    },

    /// Acquisition was requested while a value is still held
    #[error("The fixture `{name}` was acquired twice without being released.")]
    AlreadyAcquired {
        /// Fixture name
        name: String,
    },

    /// The acquisition procedure failed
    #[error("Failed to acquire fixture `{name}`: {message}")]
    AcquireFailed {
        /// Fixture name
        name: String,
        /// Error reported by the acquisition procedure
        message: String,
    },

    /// The release procedure failed
    #[error("Failed to release fixture `{name}`: {message}")]
    ReleaseFailed {
        /// Fixture name
        name: String,
        /// Error reported by the release procedure
        message: String,
    },

    /// Lookup by name found a fixture holding a different value type
    #[error("The fixture `{name}` does not hold a value of type `{expected}`.")]
    TypeMismatch {
        /// Fixture name
        name: String,
        /// Requested value type
        expected: &'static str,
    },

    /// A test-local fixture was read outside a running test
    #[error("The test fixture `{name}` can only be read while a test is running.")]
    OutsideTest {
        /// Fixture name
        name: String,
    },
}

impl FixtureError {
    /// Create a not-instantiated error
    pub fn not_instantiated(name: impl Into<String>) -> Self {
        Self::NotInstantiated { name: name.into() }
    }

    /// Create an acquisition failure
    pub fn acquire_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AcquireFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a release failure
    pub fn release_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReleaseFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Name of the fixture this error is about
    pub fn fixture_name(&self) -> &str {
        match self {
            Self::NotInstantiated { name }
            | Self::DuplicateName { name }
            | Self::AlreadyAcquired { name }
            | Self::AcquireFailed { name, .. }
            | Self::ReleaseFailed { name, .. }
            | Self::TypeMismatch { name, .. }
            | Self::OutsideTest { name } => name,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A setting has an unusable value
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Description of the invalid setting
        message: String,
    },

    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    Read {
        /// File path
        path: String,
        /// Underlying I/O error
        message: String,
    },

    /// The configuration text is not valid TOML for this schema
    #[error("Failed to parse configuration: {message}")]
    Parse {
        /// Parser error
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-setting error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Unified error type for test bodies and suites
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssayError {
    /// An assertion did not hold
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// A fixture was misused or its lifecycle failed
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// A test body exceeded the suite's IO timeout
    #[error("test `{test}` timed out after {timeout_ms}ms")]
    TimedOut {
        /// Test name
        test: String,
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// A non-recoverable condition of the host runtime
    #[error("fatal: {0}")]
    Fatal(Fatality),

    /// Any other error raised by code under test
    #[error("{kind}{}", render_message(.message))]
    Raised {
        /// Kind name used when classifying the error
        kind: String,
        /// Optional error message
        message: Option<String>,
    },

    /// Suite configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn render_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

impl AssayError {
    /// Create a raised error of the given kind with a message
    pub fn raised(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Raised {
            kind: kind.into(),
            message: Some(message.into()),
        }
    }

    /// Create a raised error of the given kind without a message
    pub fn raised_bare(kind: impl Into<String>) -> Self {
        Self::Raised {
            kind: kind.into(),
            message: None,
        }
    }

    /// Create a timeout error
    pub fn timed_out(test: impl Into<String>, timeout_ms: u64) -> Self {
        Self::TimedOut {
            test: test.into(),
            timeout_ms,
        }
    }
}

impl From<Fatality> for AssayError {
    fn from(fatality: Fatality) -> Self {
        Self::Fatal(fatality)
    }
}

/// Standard Result type for Assay operations
pub type Result<T> = std::result::Result<T, AssayError>;
