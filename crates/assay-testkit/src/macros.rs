//! Assertion macros

/// Build a [`Clue`](crate::Clue) rendering an expression next to its value
///
/// ```rust
/// use assay_testkit::clue;
///
/// let retries = 3;
/// assert_eq!(clue!(retries).as_str(), "retries = 3");
/// ```
#[macro_export]
macro_rules! clue {
    ($value:expr) => {
        $crate::Clue::expression(stringify!($value), &$value)
    };
}
