//! Error types for share URL parsing and access URL construction.
//!
//! Messages follow the What/Why/Suggestion layout used across the crate so the
//! CLI can print them to users unchanged.

use thiserror::Error;

/// Errors raised while turning a share URL into an access URL.
#[derive(Debug, Clone, Error)]
pub enum LocateError {
    /// The input does not match any known share URL shape
    #[error("unrecognized share URL '{input}': {reason}\n  Suggestion: {suggestion}")]
    ParseFailure {
        /// The input that failed to parse
        input: String,
        /// Why parsing failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// An explicitly supplied identifier has invalid syntax
    #[error(
        "invalid document id '{id}': ids contain only letters, digits, '-' and '_'\n  Suggestion: Copy the id from the share URL"
    )]
    InvalidId {
        /// The rejected identifier
        id: String,
    },

    /// An access URL was requested while the hosting category is unresolved
    #[error(
        "cannot build an access URL for '{id}': hosting category is {category}\n  Suggestion: Resolve the category before building the access URL"
    )]
    InvalidCategory {
        /// Identifier of the resource
        id: String,
        /// The offending category
        category: String,
    },

    /// No probed hosting category answered with a success status
    #[error(
        "could not determine hosting category for '{id}': tried {tried}\n  Suggestion: Pass the category explicitly or check that the document is shared publicly"
    )]
    GuessFailure {
        /// Identifier of the resource
        id: String,
        /// Comma separated list of probed categories
        tried: String,
    },
}

impl LocateError {
    /// Creates a `ParseFailure` for input matching no known share URL shape.
    #[must_use]
    pub fn unrecognized(input: &str) -> Self {
        Self::ParseFailure {
            input: input.to_string(),
            reason: "no known share URL pattern matches".to_string(),
            suggestion: "Use a link copied from the Drive share dialog, e.g. https://drive.google.com/file/d/<id>/view".to_string(),
        }
    }

    /// Creates a `ParseFailure` for a pattern match with an empty capture.
    #[must_use]
    pub fn empty_capture(input: &str, field: &str) -> Self {
        Self::ParseFailure {
            input: input.to_string(),
            reason: format!("matched a share URL pattern but the {field} is empty"),
            suggestion: "Check that the link was copied completely".to_string(),
        }
    }

    /// Creates an `InvalidId` error.
    #[must_use]
    pub fn invalid_id(id: &str) -> Self {
        Self::InvalidId { id: id.to_string() }
    }

    /// Creates an `InvalidCategory` error.
    #[must_use]
    pub fn invalid_category(id: &str, category: impl std::fmt::Display) -> Self {
        Self::InvalidCategory {
            id: id.to_string(),
            category: category.to_string(),
        }
    }

    /// Creates a `GuessFailure` error listing the categories that were probed.
    #[must_use]
    pub fn guess_failed(id: &str, tried: &[impl std::fmt::Display]) -> Self {
        let tried = if tried.is_empty() {
            "no categories".to_string()
        } else {
            tried
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self::GuessFailure {
            id: id.to_string(),
            tried,
        }
    }
}

/// Error returned when a category or export format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownNameError {
    /// What was being parsed ("category" or "export format")
    pub kind: &'static str,
    /// The rejected value
    pub value: String,
    /// Accepted values
    pub expected: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_error_unrecognized_message() {
        let err = LocateError::unrecognized("https://example.com/nope");
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/nope"), "should contain input");
        assert!(msg.contains("Suggestion"), "should have suggestion");
    }

    #[test]
    fn test_locate_error_empty_capture_names_field() {
        let err = LocateError::empty_capture("https://drive.google.com/open?id=", "id");
        assert!(err.to_string().contains("the id is empty"));
        assert!(matches!(err, LocateError::ParseFailure { .. }));
    }

    #[test]
    fn test_locate_error_guess_failed_lists_categories() {
        let err = LocateError::guess_failed("abc", &["document", "spreadsheets"]);
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("document, spreadsheets"));
    }

    #[test]
    fn test_locate_error_guess_failed_with_nothing_tried() {
        let empty: [&str; 0] = [];
        let err = LocateError::guess_failed("abc", &empty);
        assert!(err.to_string().contains("no categories"));
    }

    #[test]
    fn test_locate_error_invalid_category_message() {
        let err = LocateError::invalid_category("abc", "unknown");
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("category is unknown"));
    }

    #[test]
    fn test_unknown_name_error_message() {
        let err = UnknownNameError {
            kind: "export format",
            value: "bmp".to_string(),
            expected: "pdf, docx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown export format 'bmp' (expected one of: pdf, docx)"
        );
    }
}
