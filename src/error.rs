//! Error handling for host name parsing.
//!
//! There is exactly one failure kind at this layer: a string did not parse
//! as the requested domain part. Callers routinely try a parse and fall
//! back to an alternate interpretation (for example an IP-address literal),
//! so failures are ordinary values, never panics.

use std::fmt;

/// Failure to parse a string as a domain, second-level domain, top-level
/// domain, or mail address.
///
/// Carries the offending input and a human-readable reason. No further
/// sub-classification is needed: every failure is recoverable and callers
/// only ever branch on success versus failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    reason: String,
}

impl ParseError {
    /// Create a new parse error for the given input.
    pub fn new<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why the input was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_input_and_reason() {
        let err = ParseError::new("999", "purely numeric input is not a host name");
        let rendered = err.to_string();
        assert!(rendered.contains("999"));
        assert!(rendered.contains("purely numeric"));
    }

    #[test]
    fn test_accessors() {
        let err = ParseError::new("a..b", "empty interior label");
        assert_eq!(err.input(), "a..b");
        assert_eq!(err.reason(), "empty interior label");
    }
}
