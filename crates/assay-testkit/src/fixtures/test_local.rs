//! Test-local fixtures

use super::slot::ResourceSlot;
use super::Fixture;
use assay_core::FixtureError;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A resource acquired before and released after every test of a suite
///
/// Tests run through [`Suite::run_test`](crate::Suite::run_test) see a fresh
/// value. Suites using test-local fixtures must run their tests one at a
/// time.
pub struct TestFixture<T> {
    slot: ResourceSlot<T>,
}

impl<T: Send + Sync + 'static> TestFixture<T> {
    /// Create a fixture from async acquire and release procedures
    pub fn new<A, AFut, R, RFut>(name: impl Into<String>, acquire: A, release: R) -> Arc<Self>
    where
        A: Fn() -> AFut + Send + Sync + 'static,
        AFut: Future<Output = anyhow::Result<T>> + Send + 'static,
        R: Fn(Arc<T>) -> RFut + Send + Sync + 'static,
        RFut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Arc::new(Self {
            slot: ResourceSlot::new(
                name.into(),
                Box::new(move || acquire().boxed()),
                Box::new(move |value| release(value).boxed()),
            ),
        })
    }

    /// The value acquired for the running test
    pub fn value(&self) -> Result<Arc<T>, FixtureError> {
        self.slot.current().ok_or_else(|| FixtureError::OutsideTest {
            name: self.slot.name().to_string(),
        })
    }

    /// Fixture name
    pub fn name(&self) -> &str {
        self.slot.name()
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Fixture for TestFixture<T> {
    fn name(&self) -> &str {
        self.slot.name()
    }

    async fn before_each(&self, test: &str) -> Result<(), FixtureError> {
        tracing::trace!(fixture = %self.slot.name(), test, "per-test setup");
        self.slot.acquire().await
    }

    async fn after_each(&self, test: &str) -> Result<(), FixtureError> {
        tracing::trace!(fixture = %self.slot.name(), test, "per-test teardown");
        self.slot.release().await.map(|_| ())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for TestFixture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFixture")
            .field("name", &self.slot.name())
            .field("ready", &self.slot.current().is_some())
            .finish()
    }
}
