//! Synchronous deferred effect
//!
//! [`SyncIo`] describes a blocking computation without running it. Nothing
//! happens until [`SyncIo::run`] is called, and a value can only be run once,
//! so composing assertions onto a `SyncIo` never executes the computation
//! twice.

use std::fmt;

type Thunk<T, E> = Box<dyn FnOnce() -> Result<T, E>>;

/// A lazily evaluated, run-once synchronous computation
#[must_use = "a SyncIo does nothing until it is run"]
pub struct SyncIo<T, E> {
    thunk: Thunk<T, E>,
}

impl<T: 'static, E: 'static> SyncIo<T, E> {
    /// Defer a fallible computation
    pub fn delay<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'static,
    {
        Self { thunk: Box::new(f) }
    }

    /// An effect that succeeds with `value`
    pub fn pure(value: T) -> Self {
        Self::delay(move || Ok(value))
    }

    /// An effect that fails with `error`
    pub fn raise_error(error: E) -> Self {
        Self::delay(move || Err(error))
    }

    /// Lift an already produced outcome
    pub fn from_result(outcome: Result<T, E>) -> Self {
        Self::delay(move || outcome)
    }

    /// Run the computation
    pub fn run(self) -> Result<T, E> {
        (self.thunk)()
    }

    /// Transform the success value
    pub fn map<U: 'static, F>(self, f: F) -> SyncIo<U, E>
    where
        F: FnOnce(T) -> U + 'static,
    {
        SyncIo::delay(move || self.run().map(f))
    }

    /// Sequence a dependent effect after this one succeeds
    pub fn and_then<U: 'static, F>(self, f: F) -> SyncIo<U, E>
    where
        F: FnOnce(T) -> SyncIo<U, E> + 'static,
    {
        SyncIo::delay(move || self.run().and_then(|value| f(value).run()))
    }

    /// Transform the outcome as a whole once the computation has run
    pub fn transform<U: 'static, E2: 'static, F>(self, f: F) -> SyncIo<U, E2>
    where
        F: FnOnce(Result<T, E>) -> Result<U, E2> + 'static,
    {
        SyncIo::delay(move || f(self.run()))
    }

    /// Capture the outcome as a value instead of failing
    pub fn attempt(self) -> SyncIo<Result<T, E>, E> {
        SyncIo::delay(move || Ok(self.run()))
    }
}

impl<T, E> fmt::Debug for SyncIo<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncIo(<deferred>)")
    }
}
