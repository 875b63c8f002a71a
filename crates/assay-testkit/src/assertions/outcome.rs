//! Outcome classification shared by every effect shape
//!
//! Each function here receives the already produced outcome of an effect and
//! decides, synchronously, whether the assertion holds. The effect-specific
//! adapters only arrange for these to run after the effect completes.

use assay_core::assert::{assert_equals, fail};
use assay_core::{AssertionFailure, Clue, ErrorKind, SourceLocation, Throwable};
use std::borrow::Cow;
use std::fmt::Debug;

/// Rendering of an intercepted error that carries no message
pub const NO_MESSAGE: &str = "<none>";

/// Compare the success value with `expected`
///
/// Errors raised by the effect itself are returned unchanged.
pub fn check_returns<T, B, E>(
    outcome: Result<T, E>,
    expected: &B,
    clue: &Clue,
    location: SourceLocation,
) -> Result<(), E>
where
    T: PartialEq<B> + Debug,
    B: Debug + ?Sized,
    E: From<AssertionFailure>,
{
    let actual = outcome?;
    assert_equals(&actual, expected, clue, location).map_err(E::from)
}

/// Classify an outcome that is expected to be an error of kind `K`
///
/// With `expected_message` set, the intercepted error's message must equal it
/// exactly.
pub fn check_intercept<K, T, E>(
    outcome: Result<T, E>,
    expected_message: Option<&str>,
    location: SourceLocation,
) -> Result<K::Caught, E>
where
    K: ErrorKind<E>,
    T: Debug,
    E: Throwable + From<AssertionFailure>,
{
    let error = match outcome {
        Ok(value) => {
            return Err(E::from(fail(
                format!(
                    "expected exception of type '{}' but body evaluated successfully",
                    K::NAME
                ),
                [format!("{value:?}")],
                location,
            )));
        }
        Err(error) => error,
    };

    if let Some(fatality) = error.fatality() {
        tracing::debug!(%fatality, "fatal error is never intercepted");
        return Err(error);
    }

    let actual_kind = error.kind_name().into_owned();
    let actual_message = error.message().map(Cow::into_owned);
    tracing::trace!(expected = K::NAME, actual = %actual_kind, "classifying intercepted error");

    match K::narrow(error) {
        Ok(caught) => match expected_message {
            Some(expected) if actual_message.as_deref() != Some(expected) => Err(E::from(fail(
                format!(
                    "intercept failed, exception '{actual_kind}' had message '{}', which was different from expected message '{expected}'",
                    actual_message.as_deref().unwrap_or(NO_MESSAGE)
                ),
                std::iter::empty::<String>(),
                location,
            ))),
            _ => Ok(caught),
        },
        Err(error) if error.as_assertion_failure().is_some() => Err(error),
        Err(error) => Err(E::from(fail(
            format!(
                "intercept failed, exception '{actual_kind}' is not a subtype of '{}",
                K::NAME
            ),
            [format!("{error:?}")],
            location,
        ))),
    }
}

/// Apply a partial mapping to the success value, failing where it is undefined
pub fn check_defined<T, U, E, F>(
    outcome: Result<T, E>,
    mapping: F,
    clue: &Clue,
    location: SourceLocation,
) -> Result<U, E>
where
    F: FnOnce(&T) -> Option<U>,
    T: Debug,
    E: From<AssertionFailure>,
{
    let value = outcome?;
    match mapping(&value) {
        Some(mapped) => Ok(mapped),
        None => Err(E::from(fail(
            clue.as_str(),
            [format!("unmapped value: {value:?}")],
            location,
        ))),
    }
}
