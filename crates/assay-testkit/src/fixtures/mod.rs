//! Suite-scoped and test-scoped fixtures
//!
//! A fixture is a named resource with an acquire/release lifecycle. The
//! [`Suite`](crate::Suite) that registers it drives the lifecycle through the
//! [`Fixture`] hooks; tests only read the current value.
//!
//! - [`ResourceFixture`]: acquired once before any test in the suite runs and
//!   released once after all of them complete
//! - [`TestFixture`]: acquired before and released after every single test
//!
//! Reading a fixture outside its lifecycle window fails with a
//! [`FixtureError`](assay_core::FixtureError) naming the fixture; there is no
//! default or stale value.

mod resource;
mod slot;
mod test_local;

pub use resource::ResourceFixture;
pub use test_local::TestFixture;

use assay_core::FixtureError;
use async_trait::async_trait;
use std::any::Any;

/// Lifecycle hooks a suite invokes on each registered fixture
///
/// Hooks run in registration order. Every hook has a no-op default so a
/// fixture only implements the scopes it cares about.
#[async_trait]
pub trait Fixture: Send + Sync + 'static {
    /// Unique name within the suite
    fn name(&self) -> &str;

    /// Runs once before any test in the suite
    async fn before_all(&self) -> Result<(), FixtureError> {
        Ok(())
    }

    /// Runs before each test
    async fn before_each(&self, _test: &str) -> Result<(), FixtureError> {
        Ok(())
    }

    /// Runs after each test, whether or not the test passed
    async fn after_each(&self, _test: &str) -> Result<(), FixtureError> {
        Ok(())
    }

    /// Runs once after every test in the suite has completed
    async fn after_all(&self) -> Result<(), FixtureError> {
        Ok(())
    }

    /// Used by name-based lookup to recover the concrete fixture type
    fn as_any(&self) -> &dyn Any;
}
