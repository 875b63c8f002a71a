//! Assay Core - Assertion Foundation
//!
//! This crate provides the foundational types every Assay test helper is built
//! on. It contains no test-runner logic: only the assertion-failure error, the
//! primitives that raise it, the capability used to classify errors raised by
//! code under test, and the synchronous deferred effect.
//!
//! # Contents
//!
//! ## Assertion engine
//! - [`AssertionFailure`]: the structured "assertion failed" error, carrying a
//!   message, clues and the [`SourceLocation`] of the failing call
//! - [`assert_equals`], [`assert_true`], [`fail`]: the comparison and
//!   unconditional-failure primitives
//!
//! ## Error classification
//! - [`Throwable`]: what the adapters need to know about a raised error
//! - [`ErrorKind`]: a named, closed capability check narrowing an error
//! - [`Fatality`]: the closed list of conditions that are never intercepted
//!
//! ## Effects and configuration
//! - [`SyncIo`]: a lazily evaluated, run-once synchronous computation
//! - [`SuiteConfig`]: suite-level settings (IO timeout, log filter)

#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Assertion and comparison primitives
pub mod assert;

/// Caller-supplied diagnostic context
pub mod clue;

/// Suite configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Call-site capture for assertion failures
pub mod location;

/// Synchronous deferred effect
pub mod sync_io;

/// Error classification for interception
pub mod throwable;

pub use assert::{assert_equals, assert_true, fail};
pub use clue::Clue;
pub use config::SuiteConfig;
pub use errors::{AssayError, AssertionFailure, ConfigError, FixtureError, Result};
pub use location::SourceLocation;
pub use sync_io::SyncIo;
pub use throwable::{AnyError, AssertionFailed, ErrorKind, Fatality, FixtureMisuse, Throwable};
