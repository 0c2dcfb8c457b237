//! Author domain model.

use super::{display_opt, normalize_label, require_text, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned author identity.
pub type AuthorId = i64;

/// Persisted author as returned by catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    /// Later date means younger author.
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Author(name={}, birth_date={}, birth_place={})",
            self.full_name(),
            display_opt(self.birth_date.as_ref()),
            display_opt(self.birth_place.as_ref())
        )
    }
}

/// Producer input for one author. Identity is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
}

impl NewAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            birth_place: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_birth_place(mut self, birth_place: impl Into<String>) -> Self {
        self.birth_place = Some(birth_place.into());
        self
    }

    /// Checks required fields. Plausibility (dates, places) is not checked.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.first_name, "author", "first_name")?;
        require_text(&self.last_name, "author", "last_name")
    }

    /// Returns the persisted shape: trimmed names, normalized birth place.
    pub(crate) fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            birth_date: self.birth_date,
            birth_place: normalize_label(self.birth_place.as_deref()),
        }
    }
}
