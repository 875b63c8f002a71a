//! Assertion primitives
//!
//! The comparison-and-report and unconditional-failure operations every
//! higher-level helper is written in terms of. They return the failure rather
//! than panicking so that callers can raise it into whatever effect they are
//! composing with.

use crate::clue::Clue;
use crate::errors::AssertionFailure;
use crate::location::SourceLocation;
use std::fmt::Debug;

/// Compare `actual` with `expected`, failing with `clue` if they differ
///
/// The failure lists the obtained and expected values as extra clue lines.
pub fn assert_equals<A, B>(
    actual: &A,
    expected: &B,
    clue: &Clue,
    location: SourceLocation,
) -> Result<(), AssertionFailure>
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if actual == expected {
        return Ok(());
    }
    Err(fail(
        clue.as_str(),
        [
            format!("obtained: {actual:?}"),
            format!("expected: {expected:?}"),
        ],
        location,
    ))
}

/// Fail with `clue` unless `condition` holds
pub fn assert_true(
    condition: bool,
    clue: &Clue,
    location: SourceLocation,
) -> Result<(), AssertionFailure> {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure::new(clue.as_str(), location))
    }
}

/// Build an unconditional failure with a message and extra context lines
pub fn fail<I, S>(message: impl Into<String>, clues: I, location: SourceLocation) -> AssertionFailure
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AssertionFailure {
        message: message.into(),
        clues: clues.into_iter().map(Into::into).collect(),
        location,
    }
}
