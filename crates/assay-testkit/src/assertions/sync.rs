//! Deferred assertions for synchronous effects
//!
//! The [`SyncIo`] counterpart of [`FutureAssertExt`](super::FutureAssertExt).
//! Every method returns a new `SyncIo`; the assertion runs when that value is
//! run, after the original computation.

use super::outcome::{check_defined, check_intercept, check_returns};
use assay_core::{AssertionFailure, Clue, ErrorKind, SourceLocation, SyncIo, Throwable};
use std::fmt::Debug;

/// Assertion combinators for [`SyncIo`]
pub trait SyncIoAssertExt<T, E> {
    /// Succeed with `()` if the effect yields a value equal to `expected`
    fn assert_returns<B>(self, expected: B) -> SyncIo<(), E>
    where
        T: PartialEq<B> + Debug,
        B: Debug + 'static,
        E: From<AssertionFailure>;

    /// Like [`assert_returns`](Self::assert_returns), reporting `clue` on mismatch
    fn assert_returns_with_clue<B>(self, expected: B, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<B> + Debug,
        B: Debug + 'static,
        E: From<AssertionFailure>;

    /// Assert the effect yields `()`
    fn assert_returns_unit(self, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<()> + Debug,
        E: From<AssertionFailure>;

    /// Assert the effect yields `true`
    fn assert_returns_boolean(self, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<bool> + Debug,
        E: From<AssertionFailure>;

    /// Expect the effect to fail with an error of kind `K`
    fn intercept<K>(self) -> SyncIo<K::Caught, E>
    where
        K: ErrorKind<E> + 'static,
        K::Caught: 'static,
        T: Debug,
        E: Throwable + From<AssertionFailure>;

    /// Expect the effect to fail with an error of kind `K` carrying exactly `message`
    fn intercept_message<K>(self, message: impl Into<String>) -> SyncIo<K::Caught, E>
    where
        K: ErrorKind<E> + 'static,
        K::Caught: 'static,
        T: Debug,
        E: Throwable + From<AssertionFailure>;

    /// Map the success value with a partial function, failing with `clue`
    /// where it is undefined
    fn map_or_fail<U, F>(self, mapping: F, clue: impl Into<Clue>) -> SyncIo<U, E>
    where
        U: 'static,
        F: FnOnce(&T) -> Option<U> + 'static,
        T: Debug,
        E: From<AssertionFailure>;
}

impl<T: 'static, E: 'static> SyncIoAssertExt<T, E> for SyncIo<T, E> {
    #[track_caller]
    fn assert_returns<B>(self, expected: B) -> SyncIo<(), E>
    where
        T: PartialEq<B> + Debug,
        B: Debug + 'static,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue(expected, Clue::default())
    }

    #[track_caller]
    fn assert_returns_with_clue<B>(self, expected: B, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<B> + Debug,
        B: Debug + 'static,
        E: From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let clue = clue.into();
        self.transform(move |outcome| check_returns(outcome, &expected, &clue, location))
    }

    #[track_caller]
    fn assert_returns_unit(self, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<()> + Debug,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue((), clue)
    }

    #[track_caller]
    fn assert_returns_boolean(self, clue: impl Into<Clue>) -> SyncIo<(), E>
    where
        T: PartialEq<bool> + Debug,
        E: From<AssertionFailure>,
    {
        self.assert_returns_with_clue(true, clue)
    }

    #[track_caller]
    fn intercept<K>(self) -> SyncIo<K::Caught, E>
    where
        K: ErrorKind<E> + 'static,
        K::Caught: 'static,
        T: Debug,
        E: Throwable + From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        self.transform(move |outcome| check_intercept::<K, T, E>(outcome, None, location))
    }

    #[track_caller]
    fn intercept_message<K>(self, message: impl Into<String>) -> SyncIo<K::Caught, E>
    where
        K: ErrorKind<E> + 'static,
        K::Caught: 'static,
        T: Debug,
        E: Throwable + From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let message = message.into();
        self.transform(move |outcome| {
            check_intercept::<K, T, E>(outcome, Some(message.as_str()), location)
        })
    }

    #[track_caller]
    fn map_or_fail<U, F>(self, mapping: F, clue: impl Into<Clue>) -> SyncIo<U, E>
    where
        U: 'static,
        F: FnOnce(&T) -> Option<U> + 'static,
        T: Debug,
        E: From<AssertionFailure>,
    {
        let location = SourceLocation::caller();
        let clue = clue.into();
        self.transform(move |outcome| check_defined(outcome, mapping, &clue, location))
    }
}
