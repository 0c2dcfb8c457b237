//! Book domain model.

use super::author::AuthorId;
use super::{display_opt, normalize_label, require_text, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned book identity.
pub type BookId = i64;

/// Persisted book as returned by catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Free label from an open set (`Fiction`, `History`, ...).
    pub category: Option<String>,
    /// Expected to be non-negative; not enforced.
    pub page_count: Option<i64>,
    pub publish_date: Option<NaiveDate>,
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Book(name={}, category={}, publish_date={})",
            self.title,
            display_opt(self.category.as_ref()),
            display_opt(self.publish_date.as_ref())
        )
    }
}

/// Producer input for one book and the authors it is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub category: Option<String>,
    pub page_count: Option<i64>,
    pub publish_date: Option<NaiveDate>,
    /// Already-persisted authors. Repeated ids collapse into one association.
    pub author_ids: Vec<AuthorId>,
}

impl NewBook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            page_count: None,
            publish_date: None,
            author_ids: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_page_count(mut self, page_count: i64) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn with_publish_date(mut self, publish_date: NaiveDate) -> Self {
        self.publish_date = Some(publish_date);
        self
    }

    pub fn with_authors(mut self, author_ids: impl IntoIterator<Item = AuthorId>) -> Self {
        self.author_ids.extend(author_ids);
        self
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text(&self.title, "book", "title")
    }

    pub(crate) fn normalized_title(&self) -> &str {
        self.title.trim()
    }

    pub(crate) fn normalized_category(&self) -> Option<String> {
        normalize_label(self.category.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, NewBook};

    #[test]
    fn display_omits_page_count_and_prints_missing_fields_as_none() {
        let book = Book {
            id: 3,
            title: "Dune".to_string(),
            category: Some("Science Fiction".to_string()),
            page_count: Some(412),
            publish_date: None,
        };

        assert_eq!(
            book.to_string(),
            "Book(name=Dune, category=Science Fiction, publish_date=None)"
        );
    }

    #[test]
    fn builder_accumulates_authors() {
        let book = NewBook::new("Good Omens")
            .with_authors([1, 2])
            .with_authors([2]);
        assert_eq!(book.author_ids, vec![1, 2, 2]);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(NewBook::new(" ").validate().is_err());
    }
}
