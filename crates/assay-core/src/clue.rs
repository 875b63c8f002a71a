//! Clues attached to assertion failures

use std::borrow::Cow;
use std::fmt;

/// Default clue used when a comparison fails without caller context
pub const VALUES_NOT_SAME: &str = "values are not the same";

/// Human-readable context attached to a failure message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clue(Cow<'static, str>);

impl Clue {
    /// Create a clue from any string-like value
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    /// Clue rendering an expression and its value, as produced by `clue!`
    pub fn expression(source: &str, value: &impl fmt::Debug) -> Self {
        Self(Cow::Owned(format!("{source} = {value:?}")))
    }

    /// The clue text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Clue {
    fn default() -> Self {
        Self(Cow::Borrowed(VALUES_NOT_SAME))
    }
}

impl From<&'static str> for Clue {
    fn from(text: &'static str) -> Self {
        Self(Cow::Borrowed(text))
    }
}

impl From<String> for Clue {
    fn from(text: String) -> Self {
        Self(Cow::Owned(text))
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
