//! Catalog domain model: authors, books and their write-side inputs.
//!
//! # Responsibility
//! - Define the read models returned by queries (`Author`, `Book`).
//! - Define producer inputs (`NewAuthor`, `NewBook`) and their validation.
//!
//! # Invariants
//! - Identity (`AuthorId`, `BookId`) is assigned by storage and never changes.
//! - Required text fields are non-blank; optional labels are normalized.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author;
pub mod book;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Validation failure for producer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text field is empty after trimming.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(
    value: &str,
    entity: &'static str,
    field: &'static str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Trims a free-form label and collapses internal whitespace runs.
///
/// Blank labels normalize to `None`.
pub fn normalize_label(value: Option<&str>) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(value?.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.into_owned())
}

/// Renders an optional field the way the catalog report prints it.
pub(crate) fn display_opt<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "None".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::{normalize_label, require_text, ModelValidationError};

    #[test]
    fn normalize_label_collapses_whitespace() {
        assert_eq!(
            normalize_label(Some("  Science \t  Fiction ")),
            Some("Science Fiction".to_string())
        );
    }

    #[test]
    fn normalize_label_maps_blank_to_none() {
        assert_eq!(normalize_label(Some("   ")), None);
        assert_eq!(normalize_label(None), None);
    }

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text(" \n", "book", "title").unwrap_err();
        assert_eq!(
            err,
            ModelValidationError::BlankField {
                entity: "book",
                field: "title"
            }
        );
        assert_eq!(err.to_string(), "book.title must not be blank");
    }
}
