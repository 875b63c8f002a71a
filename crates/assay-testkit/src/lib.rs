//! Assay Testing Infrastructure
//!
//! Assertion and fixture helpers for test suites whose bodies are effects:
//! fallible futures driven by tokio, or [`SyncIo`] computations.
//!
//! - [`assertions`]: deferred assertions that run once the effect produces
//!   its outcome, without re-running it
//! - [`fixtures`]: named resources acquired and released around a suite or
//!   around each test
//! - [`Suite`]: lifecycle hooks, lookup by name and per-test execution
//!
//! # Usage
//!
//! ```rust,no_run
//! use assay_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn fetches_user() -> Result<(), AssayError> {
//!     let users = ResourceFixture::new(
//!         "users",
//!         || async { Ok(vec!["ada".to_string()]) },
//!         |_users| async { Ok(()) },
//!     );
//!     let suite = Suite::builder("users").fixture(&users).build()?;
//!     suite.before_suite().await?;
//!
//!     let result = suite
//!         .run_test("first user", || async move {
//!             let users = users.value()?;
//!             async { Ok::<_, AssayError>(users.first().cloned()) }
//!                 .assert_returns(Some("ada".to_string()))
//!                 .await
//!         })
//!         .await;
//!
//!     suite.after_suite().await?;
//!     result
//! }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod assertions;
pub mod fixtures;
pub mod logging;
mod macros;
pub mod suite;

pub use assertions::{FutureAssertExt, SyncIoAssertExt};
pub use fixtures::{Fixture, ResourceFixture, TestFixture};
pub use suite::{Suite, SuiteBuilder};

// Re-export the foundation so tests need a single dependency
pub use assay_core::{
    AnyError, AssayError, AssertionFailed, AssertionFailure, Clue, ConfigError, ErrorKind,
    Fatality, FixtureError, FixtureMisuse, SourceLocation, SuiteConfig, SyncIo, Throwable,
};

/// Everything a test module usually needs
pub mod prelude {
    pub use crate::assertions::{FutureAssertExt, SyncIoAssertExt};
    pub use crate::clue;
    pub use crate::fixtures::{Fixture, ResourceFixture, TestFixture};
    pub use crate::suite::{Suite, SuiteBuilder};
    pub use assay_core::{
        AnyError, AssayError, AssertionFailed, AssertionFailure, Clue, ErrorKind, Fatality,
        FixtureError, FixtureMisuse, SuiteConfig, SyncIo, Throwable,
    };
}
