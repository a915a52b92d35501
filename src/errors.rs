//! Error types for reading problem input, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each variant has a unique code (E001-E007) for documentation lookup:
//!
//! - E001: `EmptyInput` (No pattern-count line)
//! - E002: `InvalidPatternCount` (Pattern count is not a non-negative integer)
//! - E003: `MissingTarget` (No target-text line)
//! - E004: `MissingPattern` (Fewer pattern lines than announced)
//! - E005: `InvalidSymbolName` (Expansion symbol is not A-Z)
//! - E006: `MalformedExpansion` (Expansion line could not be parsed)
//! - E007: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use swe::errors::ParseError;
//!
//! let err = ParseError::MissingPattern { expected: 3, found: 1 };
//! assert_eq!(err.code(), "E004");
//! eprintln!("{}", err.display_detailed());
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};
use std::num::ParseIntError;

/// Custom error type for parsing problem input
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Input is empty (expected the pattern count on the first line)")]
    EmptyInput,

    #[error("Invalid pattern count \"{line}\": {source}")]
    InvalidPatternCount {
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Missing target text (expected it on the second line)")]
    MissingTarget,

    #[error("Expected {expected} pattern lines but found {found}")]
    MissingPattern { expected: usize, found: usize },

    #[error("Invalid symbol name '{symbol}' (must be A-Z)")]
    InvalidSymbolName { symbol: String },

    #[error("Malformed expansion line: \"{line}\"")]
    MalformedExpansion { line: String },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "E001",
            ParseError::InvalidPatternCount { .. } => "E002",
            ParseError::MissingTarget => "E003",
            ParseError::MissingPattern { .. } => "E004",
            ParseError::InvalidSymbolName { .. } => "E005",
            ParseError::MalformedExpansion { .. } => "E006",
            ParseError::NomError(_) => "E007",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyInput => Some("The first line must hold the number of patterns, e.g. '2'"),
            ParseError::InvalidPatternCount { .. } => Some("The first line must be a non-negative whole number, e.g. '2'"),
            ParseError::MissingTarget => Some("The second line must hold the target text the patterns are matched against"),
            ParseError::MissingPattern { .. } => Some("Add one line per pattern after the target text, or lower the count on the first line"),
            ParseError::InvalidSymbolName { .. } => Some("Symbols are single uppercase letters A-Z, e.g. 'X:ab,abc'"),
            ParseError::MalformedExpansion { .. } => Some("Expansion lines look like 'X:opt1,opt2,opt3'"),
            ParseError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<ParseError> {
        vec![
            ParseError::EmptyInput,
            ParseError::InvalidPatternCount {
                line: "two".to_string(),
                source: "two".parse::<usize>().unwrap_err(),
            },
            ParseError::MissingTarget,
            ParseError::MissingPattern { expected: 3, found: 1 },
            ParseError::InvalidSymbolName { symbol: "ab".to_string() },
            ParseError::MalformedExpansion { line: "X:".to_string() },
            ParseError::NomError(ErrorKind::Char),
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::EmptyInput;
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("number of patterns"));
    }

    /// Test that all `ParseError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in sample_errors() {
            let code = err.code();
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 7);
    }

    /// Test that all error codes follow the format E0XX
    #[test]
    fn test_error_code_format() {
        for err in sample_errors() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"), "Error code '{}' should start with 'E0'", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_adds_information() {
        for err in sample_errors() {
            if let Some(help_text) = err.help() {
                assert!(help_text.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help_text, err.to_string());
            }
        }
    }

    #[test]
    fn test_missing_pattern_message_includes_counts() {
        let detailed = ParseError::MissingPattern { expected: 3, found: 1 }.display_detailed();
        assert!(detailed.contains('3') && detailed.contains('1'));
        assert!(detailed.contains("E004"));
    }

    #[test]
    fn test_invalid_pattern_count_keeps_source() {
        let err = ParseError::InvalidPatternCount {
            line: "-1".to_string(),
            source: "-1".parse::<usize>().unwrap_err(),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("\"-1\""));
    }

    #[test]
    fn test_nom_error_has_no_help() {
        let err = ParseError::NomError(ErrorKind::Char);
        assert!(err.help().is_none());
        assert_eq!(err.display_detailed(), format!("{err} (E007)"));
    }
}
