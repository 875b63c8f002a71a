//! Deferred assertions for async effects
//!
//! Any `Future<Output = Result<T, E>>` gains the assertion methods of
//! [`FutureAssertExt`]. Each method returns a new future: nothing is awaited
//! until the caller drives it, the wrapped future is awaited exactly once, and
//! dropping the returned future cancels the assertion without reporting
//! anything.
//!
//! ```rust,no_run
//! use assay_testkit::prelude::*;
//!
//! # async fn lookup(_id: u32) -> Result<Option<u32>, AssayError> { Ok(Some(1)) }
//! # async fn example() -> Result<(), AssayError> {
//! lookup(7).assert_returns(Some(1)).await?;
//! lookup(8)
//!     .assert_returns_with_clue(None::<u32>, "id 8 must be missing")
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::outcome::{check_defined, check_intercept, check_returns};
use assay_core::{AssertionFailure, Clue, ErrorKind, SourceLocation, Throwable};
use std::fmt::Debug;
use std::future::Future;

/// Assertion combinators for fallible futures
pub trait FutureAssertExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Succeed with `()` if the future yields a value equal to `expected`
    #[track_caller]
    fn assert_returns<B>(self, expected: B) -> impl Future<Output = Result<(), E>>
    where
        T: PartialEq<B> + Debug,
        B: Debug,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue(expected, Clue::default())
    }

    /// Like [`assert_returns`](Self::assert_returns), reporting `clue` on mismatch
    #[track_caller]
    fn assert_returns_with_clue<B>(
        self,
        expected: B,
        clue: impl Into<Clue>,
    ) -> impl Future<Output = Result<(), E>>
    where
        T: PartialEq<B> + Debug,
        B: Debug,
        E: From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let clue = clue.into();
        async move { check_returns(self.await, &expected, &clue, location) }
    }

    /// Assert the future yields `()`
    #[track_caller]
    fn assert_returns_unit(self, clue: impl Into<Clue>) -> impl Future<Output = Result<(), E>>
    where
        T: PartialEq<()> + Debug,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue((), clue)
    }

    /// Assert the future yields `true`
    #[track_caller]
    fn assert_returns_boolean(self, clue: impl Into<Clue>) -> impl Future<Output = Result<(), E>>
    where
        T: PartialEq<bool> + Debug,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue(true, clue)
    }

    /// Expect the future to fail with an error of kind `K`, yielding the caught value
    #[track_caller]
    fn intercept<K>(self) -> impl Future<Output = Result<K::Caught, E>>
    where
        K: ErrorKind<E>,
        T: Debug,
        E: Throwable + From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        async move { check_intercept::<K, T, E>(self.await, None, location) }
    }

    /// Expect the future to fail with an error of kind `K` carrying exactly `message`
    #[track_caller]
    fn intercept_message<K>(
        self,
        message: impl Into<String>,
    ) -> impl Future<Output = Result<K::Caught, E>>
    where
        K: ErrorKind<E>,
        T: Debug,
        E: Throwable + From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let message = message.into();
        async move { check_intercept::<K, T, E>(self.await, Some(message.as_str()), location) }
    }

    /// Map the success value with a partial function, failing with `clue`
    /// where it is undefined
    #[track_caller]
    fn map_or_fail<U, F>(self, mapping: F, clue: impl Into<Clue>) -> impl Future<Output = Result<U, E>>
    where
        F: FnOnce(&T) -> Option<U>,
        T: Debug,
        E: From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let clue = clue.into();
        async move { check_defined(self.await, mapping, &clue, location) }
    }
}

impl<Fut, T, E> FutureAssertExt<T, E> for Fut where Fut: Future<Output = Result<T, E>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::{AnyError, AssayError, Fatality};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn answer() -> Result<Option<i32>, AssayError> {
        Ok(Some(1))
    }

    #[tokio::test]
    async fn test_assert_returns_equal() {
        assert_eq!(answer().assert_returns(Some(1)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_assert_returns_reports_call_site() {
        let line = line!() + 1;
        let err = answer().assert_returns(None::<i32>).await.unwrap_err();
        let failure = err.as_assertion_failure().unwrap();
        assert_eq!(failure.location.line, line);
        assert!(failure.location.file.ends_with("future.rs"));
        assert_eq!(failure.message, "values are not the same");
    }

    #[tokio::test]
    async fn test_wrapped_future_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let effect = async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, AssayError>(3)
        };
        let assertion = effect.assert_returns(3);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assertion.await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_boolean_and_unit() {
        async { Ok::<_, AssayError>(true) }
            .assert_returns_boolean("flag")
            .await
            .unwrap();
        async { Ok::<_, AssayError>(()) }
            .assert_returns_unit("unit")
            .await
            .unwrap();
        let err = async { Ok::<_, AssayError>(false) }
            .assert_returns_boolean("flag must be set")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("flag must be set"));
    }

    #[tokio::test]
    async fn test_intercept_yields_error() {
        let caught = async { Err::<(), _>(AssayError::raised("Parse", "bad digit")) }
            .intercept_message::<AnyError>("bad digit")
            .await
            .unwrap();
        assert_eq!(caught, AssayError::raised("Parse", "bad digit"));
    }

    #[tokio::test]
    async fn test_intercept_never_catches_fatal() {
        let err = async { Err::<(), _>(AssayError::Fatal(Fatality::OutOfMemory)) }
            .intercept::<AnyError>()
            .await
            .unwrap_err();
        assert_eq!(err, AssayError::Fatal(Fatality::OutOfMemory));
    }

    #[tokio::test]
    async fn test_map_or_fail_chains() {
        let value = async { Ok::<_, AssayError>("42") }
            .map_or_fail(|s| s.parse::<u32>().ok(), "not a number")
            .await
            .unwrap();
        assert_eq!(value, 42);
    }
}
