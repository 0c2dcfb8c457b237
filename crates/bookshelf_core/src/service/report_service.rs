//! Catalog report service: the fail-isolated query engine.
//!
//! # Responsibility
//! - Expose the named analytical operations to consumers.
//! - Turn query failures into logged diagnostics plus a safe default.
//!
//! # Invariants
//! - A failing operation returns `None` / an empty list, never a partial or
//!   wrong value, and never affects the next operation.
//! - `authors_with_more_than_three_books` returns at most
//!   `MORE_THAN_BOOKS_LIMIT` authors.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::repo::query_repo::{CatalogQueries, QueryResult};
use log::{debug, error};
use serde::Serialize;
use std::time::Instant;

/// Association count an author must strictly exceed.
pub const MORE_THAN_BOOKS_THRESHOLD: u32 = 3;
/// Maximum authors returned by the threshold query.
pub const MORE_THAN_BOOKS_LIMIT: u32 = 5;

/// All report results computed over one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub book_with_most_pages: Option<Book>,
    pub average_page_count: Option<f64>,
    pub youngest_author: Option<Author>,
    pub authors_with_no_books: Vec<Author>,
    pub authors_with_more_than_three_books: Vec<Author>,
}

/// Use-case wrapper that applies the per-operation failure policy.
pub struct ReportService<Q: CatalogQueries> {
    queries: Q,
}

impl<Q: CatalogQueries> ReportService<Q> {
    pub fn new(queries: Q) -> Self {
        Self { queries }
    }

    pub fn book_with_most_pages(&self) -> Option<Book> {
        self.run("book_with_most_pages", |queries| {
            queries.book_with_most_pages()
        })
        .flatten()
    }

    pub fn average_page_count(&self) -> Option<f64> {
        self.run("average_page_count", |queries| queries.average_page_count())
            .flatten()
    }

    /// Author with the latest birth date.
    pub fn youngest_author(&self) -> Option<Author> {
        self.run("youngest_author", |queries| queries.youngest_author())
            .flatten()
    }

    pub fn authors_with_no_books(&self) -> Vec<Author> {
        self.run("authors_with_no_books", |queries| {
            queries.authors_with_no_books()
        })
        .unwrap_or_default()
    }

    pub fn authors_with_more_than_three_books(&self) -> Vec<Author> {
        self.run("authors_with_more_than_three_books", |queries| {
            queries.authors_with_more_than(MORE_THAN_BOOKS_THRESHOLD, MORE_THAN_BOOKS_LIMIT)
        })
        .unwrap_or_default()
    }

    /// Runs every operation in order; each one fails independently.
    pub fn full_report(&self) -> CatalogReport {
        CatalogReport {
            book_with_most_pages: self.book_with_most_pages(),
            average_page_count: self.average_page_count(),
            youngest_author: self.youngest_author(),
            authors_with_no_books: self.authors_with_no_books(),
            authors_with_more_than_three_books: self.authors_with_more_than_three_books(),
        }
    }

    fn run<T>(&self, name: &'static str, query: impl FnOnce(&Q) -> QueryResult<T>) -> Option<T> {
        let started_at = Instant::now();
        match query(&self.queries) {
            Ok(value) => {
                debug!(
                    "event=query module=service status=ok name={} duration_ms={}",
                    name,
                    started_at.elapsed().as_millis()
                );
                Some(value)
            }
            Err(err) => {
                error!(
                    "event=query module=service status=error name={} duration_ms={} error={}",
                    name,
                    started_at.elapsed().as_millis(),
                    err
                );
                None
            }
        }
    }
}
