//! Suite lifecycle
//!
//! A [`Suite`] owns the fixtures registered with it and exposes the hooks an
//! external runner calls around its tests:
//!
//! 1. [`Suite::before_suite`] once, before any test
//! 2. [`Suite::run_test`] for each test (or any other way of running them)
//! 3. [`Suite::after_suite`] once, after every test, even if step 1 failed
//!
//! Fixtures can only be registered on the [`SuiteBuilder`], so registering
//! one after the hooks have run is not expressible.

use crate::fixtures::{Fixture, ResourceFixture, TestFixture};
use crate::logging::init_test_tracing;
use assay_core::{AssayError, FixtureError, SuiteConfig};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

/// Collects fixtures and configuration for a [`Suite`]
pub struct SuiteBuilder {
    name: String,
    config: SuiteConfig,
    fixtures: Vec<Arc<dyn Fixture>>,
}

impl SuiteBuilder {
    /// Use `config` instead of [`SuiteConfig::default`]
    pub fn config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a fixture; lifecycle hooks follow registration order
    pub fn fixture<F: Fixture>(mut self, fixture: &Arc<F>) -> Self {
        let fixture: Arc<dyn Fixture> = fixture.clone();
        self.fixtures.push(fixture);
        self
    }

    /// Finish construction, rejecting duplicate fixture names and invalid
    /// configuration
    pub fn build(self) -> Result<Suite, AssayError> {
        let mut seen = HashSet::new();
        for fixture in &self.fixtures {
            if !seen.insert(fixture.name()) {
                return Err(FixtureError::DuplicateName {
                    name: fixture.name().to_string(),
                }
                .into());
            }
        }

        self.config.validate()?;
        init_test_tracing(&self.config)?;
        tracing::debug!(
            suite = %self.name,
            fixtures = self.fixtures.len(),
            "suite constructed"
        );
        Ok(Suite {
            name: self.name,
            config: self.config,
            fixtures: self.fixtures,
        })
    }
}

/// A named group of tests sharing fixtures
pub struct Suite {
    name: String,
    config: SuiteConfig,
    fixtures: Vec<Arc<dyn Fixture>>,
}

impl Suite {
    /// Start building a suite
    pub fn builder(name: impl Into<String>) -> SuiteBuilder {
        SuiteBuilder {
            name: name.into(),
            config: SuiteConfig::default(),
            fixtures: Vec::new(),
        }
    }

    /// Suite name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective configuration
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Names of the registered fixtures, in registration order
    pub fn fixture_names(&self) -> Vec<&str> {
        self.fixtures.iter().map(|fixture| fixture.name()).collect()
    }

    /// Acquire every suite-local fixture, in registration order
    ///
    /// Stops at the first failure. Fixtures acquired before it are still
    /// released by [`after_suite`](Self::after_suite).
    pub async fn before_suite(&self) -> Result<(), FixtureError> {
        let span = tracing::debug_span!("before_suite", suite = %self.name);
        async {
            for fixture in &self.fixtures {
                fixture.before_all().await?;
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Release every acquired suite-local fixture, in registration order
    ///
    /// Each value is cleared before its release procedure runs, so a failed
    /// release never leaves a readable value behind. The first failure is
    /// reported after the remaining fixtures are released, unless
    /// `fail_fast_release` is configured.
    pub async fn after_suite(&self) -> Result<(), FixtureError> {
        let span = tracing::debug_span!("after_suite", suite = %self.name);
        async {
            let mut first_error = None;
            for fixture in &self.fixtures {
                if let Err(err) = fixture.after_all().await {
                    tracing::warn!(fixture = %fixture.name(), error = %err, "fixture release failed");
                    if self.config.fail_fast_release {
                        return Err(err);
                    }
                    first_error.get_or_insert(err);
                }
            }
            first_error.map_or(Ok(()), Err)
        }
        .instrument(span)
        .await
    }

    /// Look up a fixture's current value by name
    ///
    /// Fails with [`FixtureError::NotInstantiated`] when no fixture of that
    /// name is registered or it is not ready, and with
    /// [`FixtureError::TypeMismatch`] when it holds a different type.
    pub fn value<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, FixtureError> {
        let fixture = self
            .fixtures
            .iter()
            .find(|fixture| fixture.name() == name)
            .ok_or_else(|| FixtureError::not_instantiated(name))?;

        let any = fixture.as_any();
        if let Some(resource) = any.downcast_ref::<ResourceFixture<T>>() {
            return resource.value();
        }
        if let Some(local) = any.downcast_ref::<TestFixture<T>>() {
            return local.value();
        }
        Err(FixtureError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Run one test body with per-test fixtures and the configured IO timeout
    ///
    /// Per-test teardown runs whether the body passed, failed or timed out.
    /// A body failure takes precedence over a teardown failure.
    pub async fn run_test<F, Fut, E>(&self, test: &str, body: F) -> Result<(), AssayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<AssayError>,
    {
        let span = tracing::debug_span!("test", suite = %self.name, test);
        async {
            let outcome = match self.setup(test).await {
                Ok(()) => self.run_body(test, body).await,
                Err(err) => Err(err.into()),
            };
            let teardown = self.teardown(test).await;
            if let Err(err) = &outcome {
                tracing::debug!(error = %err, "test failed");
            }
            outcome.and(teardown.map_err(AssayError::from))
        }
        .instrument(span)
        .await
    }

    async fn setup(&self, test: &str) -> Result<(), FixtureError> {
        for fixture in &self.fixtures {
            fixture.before_each(test).await?;
        }
        Ok(())
    }

    async fn run_body<F, Fut, E>(&self, test: &str, body: F) -> Result<(), AssayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<AssayError>,
    {
        match tokio::time::timeout(self.config.io_timeout(), body()).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(AssayError::timed_out(test, self.config.io_timeout_ms)),
        }
    }

    async fn teardown(&self, test: &str) -> Result<(), FixtureError> {
        let mut first_error = None;
        for fixture in &self.fixtures {
            if let Err(err) = fixture.after_each(test).await {
                tracing::warn!(fixture = %fixture.name(), error = %err, "per-test release failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("fixtures", &self.fixture_names())
            .finish()
    }
}
