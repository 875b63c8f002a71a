//! Suite-local resource fixtures

use super::slot::ResourceSlot;
use super::Fixture;
use assay_core::{FixtureError, SyncIo};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;

/// A resource acquired once per suite and shared by every test in it
///
/// ```rust,no_run
/// use assay_testkit::prelude::*;
///
/// # async fn example() -> Result<(), AssayError> {
/// let pool = ResourceFixture::new(
///     "pool",
///     || async { Ok(vec!["conn-1", "conn-2"]) },
///     |_pool| async { Ok(()) },
/// );
/// let suite = Suite::builder("pool suite").fixture(&pool).build()?;
///
/// suite.before_suite().await?;
/// assert_eq!(pool.value()?.len(), 2);
/// suite.after_suite().await?;
/// # Ok(())
/// # }
/// ```
pub struct ResourceFixture<T> {
    slot: ResourceSlot<T>,
}

impl<T: Send + Sync + 'static> ResourceFixture<T> {
    /// Create a fixture from async acquire and release procedures
    ///
    /// `release` receives the value produced by `acquire`.
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

    /// Create a fixture whose procedures are blocking [`SyncIo`] effects
    ///
    /// The effects are built and run when the suite hook fires.
    pub fn from_sync<A, R, E>(name: impl Into<String>, acquire: A, release: R) -> Arc<Self>
    where
        A: Fn() -> SyncIo<T, E> + Send + Sync + 'static,
        R: Fn(Arc<T>) -> SyncIo<(), E> + Send + Sync + 'static,
        E: Display + 'static,
    {
        Arc::new(Self {
            slot: ResourceSlot::new(
                name.into(),
                Box::new(move || {
                    let outcome = acquire().run().map_err(|e| anyhow::anyhow!("{e}"));
                    async move { outcome }.boxed()
                }),
                Box::new(move |value| {
                    let outcome = release(value).run().map_err(|e| anyhow::anyhow!("{e}"));
                    async move { outcome }.boxed()
                }),
            ),
        })
    }

    /// The acquired value
    ///
    /// Fails with [`FixtureError::NotInstantiated`] before the suite's
    /// `before_suite` completes, after `after_suite` runs, or when the fixture
    /// was never registered with a suite.
    pub fn value(&self) -> Result<Arc<T>, FixtureError> {
        self.slot
            .current()
            .ok_or_else(|| FixtureError::not_instantiated(self.slot.name()))
    }

    /// Fixture name
    pub fn name(&self) -> &str {
        self.slot.name()
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Fixture for ResourceFixture<T> {
    fn name(&self) -> &str {
        self.slot.name()
    }

    async fn before_all(&self) -> Result<(), FixtureError> {
        self.slot.acquire().await
    }

    async fn after_all(&self) -> Result<(), FixtureError> {
        self.slot.release().await.map(|_| ())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for ResourceFixture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceFixture")
            .field("name", &self.slot.name())
            .field("ready", &self.slot.current().is_some())
            .finish()
    }
}
