//! Catalog import service for data producers.
//!
//! # Responsibility
//! - Accept lists of producer entities and persist them through a repository.
//! - Emit `catalog_import` events with row counts and duration.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::author::{AuthorId, NewAuthor};
use crate::model::book::{BookId, NewBook};
use crate::repo::catalog_repo::{CatalogCounts, CatalogRepository, RepoResult};
use log::{error, info};
use std::time::Instant;

/// Use-case wrapper for producer-side writes.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists `authors` as one batch and returns their ids in input order.
    pub fn import_authors(&mut self, authors: &[NewAuthor]) -> RepoResult<Vec<AuthorId>> {
        let started_at = Instant::now();
        let outcome = self.repo.insert_authors(authors);
        log_import("author", authors.len(), started_at, &outcome);
        outcome
    }

    /// Persists `books` and their author associations as one batch.
    pub fn import_books(&mut self, books: &[NewBook]) -> RepoResult<Vec<BookId>> {
        let started_at = Instant::now();
        let outcome = self.repo.insert_books(books);
        log_import("book", books.len(), started_at, &outcome);
        outcome
    }

    /// Associates an author with a book; `false` means the pair existed.
    pub fn link(&mut self, author_id: AuthorId, book_id: BookId) -> RepoResult<bool> {
        self.repo.link_author_book(author_id, book_id)
    }

    pub fn counts(&self) -> RepoResult<CatalogCounts> {
        self.repo.counts()
    }
}

fn log_import<T>(
    entity: &'static str,
    requested: usize,
    started_at: Instant,
    outcome: &RepoResult<Vec<T>>,
) {
    match outcome {
        Ok(ids) => info!(
            "event=catalog_import module=service status=ok entity={} rows={} duration_ms={}",
            entity,
            ids.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=catalog_import module=service status=error entity={} requested={} duration_ms={} error={}",
            entity,
            requested,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}
