//! Producer-side persistence for authors, books and their associations.
//!
//! # Responsibility
//! - Persist lists of new entities handed over by a data producer.
//! - Own the association insert and its pair-uniqueness contract.
//!
//! # Invariants
//! - Each batch runs in one immediate transaction: all rows or none.
//! - Inputs are validated before any SQL runs.
//! - A repeated `(author_id, book_id)` pair is a no-op, never a second row.
//! - Existing rows are never updated or deleted.

use crate::model::author::{AuthorId, NewAuthor};
use crate::model::book::{BookId, NewBook};
use crate::model::ModelValidationError;
use crate::repo::date_to_db;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Write-side repository error.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(rusqlite::Error),
    UnknownAuthor(AuthorId),
    UnknownBook(BookId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownAuthor(id) => write!(f, "author not found: {id}"),
            Self::UnknownBook(id) => write!(f, "book not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UnknownAuthor(_) | Self::UnknownBook(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// Row counts of the three catalog relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CatalogCounts {
    pub authors: u64,
    pub books: u64,
    pub links: u64,
}

/// Repository interface for producer-side inserts.
pub trait CatalogRepository {
    /// Inserts all authors and returns their ids in input order.
    fn insert_authors(&mut self, authors: &[NewAuthor]) -> RepoResult<Vec<AuthorId>>;
    /// Inserts all books with their associations and returns book ids in
    /// input order.
    fn insert_books(&mut self, books: &[NewBook]) -> RepoResult<Vec<BookId>>;
    /// Associates an existing author with an existing book.
    ///
    /// Returns `false` when the pair was already present.
    fn link_author_book(&mut self, author_id: AuthorId, book_id: BookId) -> RepoResult<bool>;
    fn counts(&self) -> RepoResult<CatalogCounts>;
}

/// SQLite-backed producer repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn insert_authors(&mut self, authors: &[NewAuthor]) -> RepoResult<Vec<AuthorId>> {
        for author in authors {
            author.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(authors.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO author (first_name, last_name, birth_date, birth_place)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for author in authors {
                let author = author.normalized();
                stmt.execute(params![
                    author.first_name,
                    author.last_name,
                    date_to_db(author.birth_date),
                    author.birth_place,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        Ok(ids)
    }

    fn insert_books(&mut self, books: &[NewBook]) -> RepoResult<Vec<BookId>> {
        for book in books {
            book.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(books.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO book (title, category, page_count, publish_date)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for book in books {
                stmt.execute(params![
                    book.normalized_title(),
                    book.normalized_category(),
                    book.page_count,
                    date_to_db(book.publish_date),
                ])?;
                let book_id = tx.last_insert_rowid();
                for &author_id in &book.author_ids {
                    if !author_exists_in_tx(&tx, author_id)? {
                        return Err(RepoError::UnknownAuthor(author_id));
                    }
                    insert_link_in_tx(&tx, author_id, book_id)?;
                }
                ids.push(book_id);
            }
        }
        tx.commit()?;

        Ok(ids)
    }

    fn link_author_book(&mut self, author_id: AuthorId, book_id: BookId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !author_exists_in_tx(&tx, author_id)? {
            return Err(RepoError::UnknownAuthor(author_id));
        }
        if !book_exists_in_tx(&tx, book_id)? {
            return Err(RepoError::UnknownBook(book_id));
        }
        let inserted = insert_link_in_tx(&tx, author_id, book_id)?;
        tx.commit()?;

        Ok(inserted)
    }

    fn counts(&self) -> RepoResult<CatalogCounts> {
        Ok(CatalogCounts {
            authors: count_rows(self.conn, "author")?,
            books: count_rows(self.conn, "book")?,
            links: count_rows(self.conn, "author_book")?,
        })
    }
}

fn insert_link_in_tx(
    tx: &Transaction<'_>,
    author_id: AuthorId,
    book_id: BookId,
) -> RepoResult<bool> {
    // `uix_author_book` turns a repeated pair into an ignored insert.
    let changed = tx.execute(
        "INSERT OR IGNORE INTO author_book (author_id, book_id) VALUES (?1, ?2);",
        params![author_id, book_id],
    )?;
    Ok(changed == 1)
}

fn author_exists_in_tx(tx: &Transaction<'_>, author_id: AuthorId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM author WHERE id = ?1);",
        [author_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn book_exists_in_tx(tx: &Transaction<'_>, book_id: BookId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM book WHERE id = ?1);",
        [book_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn count_rows(conn: &Connection, table: &'static str) -> RepoResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or_default())
}
