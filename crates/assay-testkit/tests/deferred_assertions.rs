#![allow(clippy::unwrap_used)]
//! Deferred assertions against a domain error type
//!
//! Exercises both effect shapes with an application error enum that declares
//! its own interceptable kinds.

use assay_testkit::prelude::*;
use futures::executor::block_on;
use proptest::prelude::*;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
enum AppError {
    Parse { message: String },
    Io { message: String },
    Assertion(AssertionFailure),
    Fatal(Fatality),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Parse { message } | AppError::Io { message } => f.write_str(message),
            AppError::Assertion(failure) => write!(f, "{failure}"),
            AppError::Fatal(fatality) => write!(f, "fatal: {fatality}"),
        }
    }
}

impl From<AssertionFailure> for AppError {
    fn from(failure: AssertionFailure) -> Self {
        AppError::Assertion(failure)
    }
}

impl Throwable for AppError {
    fn kind_name(&self) -> Cow<'_, str> {
        match self {
            AppError::Parse { .. } => "ParseError".into(),
            AppError::Io { .. } => "IoError".into(),
            AppError::Assertion(_) => "AssertionFailure".into(),
            AppError::Fatal(_) => "Fatal".into(),
        }
    }

    fn message(&self) -> Option<Cow<'_, str>> {
        match self {
            AppError::Parse { message } | AppError::Io { message } => Some(message.as_str().into()),
            AppError::Assertion(failure) => Some(failure.message.as_str().into()),
            AppError::Fatal(_) => None,
        }
    }

    fn fatality(&self) -> Option<Fatality> {
        match self {
            AppError::Fatal(fatality) => Some(*fatality),
            _ => None,
        }
    }

    fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            AppError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Parse errors, caught as their message
struct ParseKind;

impl ErrorKind<AppError> for ParseKind {
    type Caught = String;
    const NAME: &'static str = "ParseError";

    fn narrow(error: AppError) -> Result<String, AppError> {
        match error {
            AppError::Parse { message } => Ok(message),
            other => Err(other),
        }
    }
}

fn parse(input: &str) -> SyncIo<i64, AppError> {
    let input = input.to_string();
    SyncIo::delay(move || {
        input.parse().map_err(|_| AppError::Parse {
            message: format!("invalid digit in `{input}`"),
        })
    })
}

async fn parse_async(input: &str) -> Result<i64, AppError> {
    parse(input).run()
}

fn failure_message(error: &AppError) -> &str {
    &error.as_assertion_failure().unwrap().message
}

#[tokio::test]
async fn test_option_values() {
    async { Ok::<_, AppError>(Some(1)) }
        .assert_returns(Some(1))
        .await
        .unwrap();
    let err = async { Ok::<_, AppError>(Some(1)) }
        .assert_returns(None::<i32>)
        .await
        .unwrap_err();
    assert_eq!(failure_message(&err), "values are not the same");

    SyncIo::<_, AppError>::pure(Some(1))
        .assert_returns(Some(1))
        .run()
        .unwrap();
    assert!(SyncIo::<_, AppError>::pure(Some(1))
        .assert_returns(None::<i32>)
        .run()
        .is_err());
}

#[tokio::test]
async fn test_upstream_error_is_not_masked() {
    let err = parse_async("x1").assert_returns(1i64).await.unwrap_err();
    assert_eq!(
        err,
        AppError::Parse {
            message: "invalid digit in `x1`".to_string()
        }
    );
}

#[tokio::test]
async fn test_intercept_message_match() {
    let message = parse_async("abc")
        .intercept_message::<ParseKind>("invalid digit in `abc`")
        .await
        .unwrap();
    assert_eq!(message, "invalid digit in `abc`");
}

#[tokio::test]
async fn test_intercept_wrong_message() {
    let err = parse_async("abc")
        .intercept_message::<ParseKind>("empty input")
        .await
        .unwrap_err();
    assert_eq!(
        failure_message(&err),
        "intercept failed, exception 'ParseError' had message 'invalid digit in `abc`', which was different from expected message 'empty input'"
    );
}

#[tokio::test]
async fn test_intercept_wrong_kind() {
    let err = async {
        Err::<(), _>(AppError::Io {
            message: "disk full".to_string(),
        })
    }
    .intercept::<ParseKind>()
    .await
    .unwrap_err();
    assert_eq!(
        failure_message(&err),
        "intercept failed, exception 'IoError' is not a subtype of 'ParseError"
    );
}

#[tokio::test]
async fn test_intercept_unexpected_success() {
    let err = parse_async("12").intercept::<ParseKind>().await.unwrap_err();
    let failure = err.as_assertion_failure().unwrap();
    assert_eq!(
        failure.message,
        "expected exception of type 'ParseError' but body evaluated successfully"
    );
    assert!(err.to_string().contains("12"));
}

#[tokio::test]
async fn test_fatal_errors_are_never_intercepted() {
    for fatality in [
        Fatality::OutOfMemory,
        Fatality::StackOverflow,
        Fatality::Interrupted,
    ] {
        let err = async { Err::<(), _>(AppError::Fatal(fatality)) }
            .intercept::<AnyError>()
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Fatal(fatality));
    }
}

#[tokio::test]
async fn test_chained_validation() {
    let doubled = parse_async("21")
        .map_or_fail(|n| n.checked_mul(2), "overflow")
        .await
        .unwrap();
    assert_eq!(doubled, 42);

    let even = parse(&doubled.to_string())
        .map_or_fail(|n| (n % 2 == 0).then_some(*n), "expected an even number")
        .map(|n| n > 0)
        .assert_returns_boolean("expected a positive number")
        .run();
    assert_eq!(even, Ok(()));

    let err = parse("7")
        .map_or_fail(|n| (n % 2 == 0).then_some(*n), "expected an even number")
        .run()
        .unwrap_err();
    assert_eq!(failure_message(&err), "expected an even number");
    assert!(err.to_string().contains("unmapped value: 7"));
}

proptest! {
    #[test]
    fn prop_assert_returns_matches_equality(v in any::<i64>(), expected in any::<i64>(), clue in "[a-z]{4,12}") {
        let outcome = SyncIo::<_, AppError>::pure(v)
            .assert_returns_with_clue(expected, clue.clone())
            .run();
        if v == expected {
            prop_assert_eq!(outcome, Ok(()));
        } else {
            let err = outcome.unwrap_err();
            prop_assert!(err.to_string().contains(&clue));
        }

        let outcome = block_on(async { Ok::<_, AppError>(v) }.assert_returns(v));
        prop_assert_eq!(outcome, Ok(()));
    }

    #[test]
    fn prop_intercept_message_exact(m in "[a-z ]{1,20}", m2 in "[a-z ]{1,20}") {
        let raise = |message: String| SyncIo::<(), _>::raise_error(AppError::Parse { message });

        let caught = raise(m.clone()).intercept_message::<ParseKind>(m.clone()).run();
        prop_assert_eq!(caught, Ok(m.clone()));

        let outcome = raise(m.clone()).intercept_message::<ParseKind>(m2.clone()).run();
        if m == m2 {
            prop_assert!(outcome.is_ok());
        } else {
            let err = outcome.unwrap_err();
            let text = failure_message(&err).to_string();
            let actual = format!("'{m}'");
            let expected = format!("'{m2}'");
            prop_assert!(text.contains(&actual));
            prop_assert!(text.contains(&expected));
        }
    }

    #[test]
    fn prop_intercept_fails_on_success(v in any::<u32>()) {
        let err = block_on(async { Ok::<_, AppError>(v) }.intercept::<AnyError>()).unwrap_err();
        prop_assert!(err.to_string().contains(&v.to_string()));
    }

    #[test]
    fn prop_assertion_failures_pass_through(a in any::<u8>(), b in any::<u8>()) {
        prop_assume!(a != b);
        let inner = SyncIo::<_, AppError>::pure(a).assert_returns(b).run().unwrap_err();
        let rethrown = SyncIo::<_, AppError>::pure(a)
            .assert_returns(b)
            .intercept::<ParseKind>()
            .run()
            .unwrap_err();
        prop_assert_eq!(&rethrown.as_assertion_failure().unwrap().message, &inner.as_assertion_failure().unwrap().message);
        prop_assert_eq!(&rethrown.as_assertion_failure().unwrap().clues, &inner.as_assertion_failure().unwrap().clues);
    }
}
