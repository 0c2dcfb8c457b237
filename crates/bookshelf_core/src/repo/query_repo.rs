//! Read-only catalog queries and their SQLite implementation.
//!
//! # Responsibility
//! - Express each analytical query as a single SQL statement.
//! - Surface every failure as `QueryError`; defaulting happens in the service.
//!
//! # Invariants
//! - No statement here writes.
//! - Every multi-row or single-row pick has an explicit, stable tie-break.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::repo::date_from_db;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AUTHOR_COLUMNS: &str = "a.id, a.first_name, a.last_name, a.birth_date, a.birth_place";
const BOOK_SELECT_SQL: &str = "SELECT id, title, category, page_count, publish_date FROM book";

pub type QueryResult<T> = Result<T, QueryError>;

/// Failure of one analytical query.
#[derive(Debug)]
pub enum QueryError {
    Db(rusqlite::Error),
    InvalidData(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// Analytical read operations over the catalog.
pub trait CatalogQueries {
    /// Book with the highest page count; ties resolve to the lowest id.
    fn book_with_most_pages(&self) -> QueryResult<Option<Book>>;
    /// Mean of all non-NULL page counts, `None` when there is none.
    fn average_page_count(&self) -> QueryResult<Option<f64>>;
    /// Author with the latest birth date; ties resolve to the lowest id.
    fn youngest_author(&self) -> QueryResult<Option<Author>>;
    /// Authors with zero associations, ordered by id.
    fn authors_with_no_books(&self) -> QueryResult<Vec<Author>>;
    /// Up to `limit` authors (lowest ids first) with more than `threshold`
    /// associated books.
    fn authors_with_more_than(&self, threshold: u32, limit: u32) -> QueryResult<Vec<Author>>;
}

/// SQLite-backed catalog queries.
pub struct SqliteCatalogQueries<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogQueries<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CatalogQueries for SqliteCatalogQueries<'_> {
    fn book_with_most_pages(&self) -> QueryResult<Option<Book>> {
        // NULL sorts lowest in SQLite, so books without a page count come last.
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             ORDER BY page_count DESC, id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn average_page_count(&self) -> QueryResult<Option<f64>> {
        let average = self
            .conn
            .query_row("SELECT AVG(page_count) FROM book;", [], |row| {
                row.get::<_, Option<f64>>(0)
            })?;
        Ok(average)
    }

    fn youngest_author(&self) -> QueryResult<Option<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM author a
             ORDER BY a.birth_date DESC, a.id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn authors_with_no_books(&self) -> QueryResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM author a
             WHERE NOT EXISTS (
                SELECT 1
                FROM author_book ab
                WHERE ab.author_id = a.id
             )
             ORDER BY a.id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn authors_with_more_than(&self, threshold: u32, limit: u32) -> QueryResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM author a
             INNER JOIN author_book ab ON ab.author_id = a.id
             GROUP BY a.id
             HAVING COUNT(ab.book_id) > ?1
             ORDER BY a.id ASC
             LIMIT ?2;"
        ))?;

        let mut rows = stmt.query(params![i64::from(threshold), i64::from(limit)])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }
}

fn parse_author_row(row: &Row<'_>) -> QueryResult<Author> {
    let birth_date = date_from_db(row.get("birth_date")?, "author.birth_date")
        .map_err(QueryError::InvalidData)?;

    Ok(Author {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        birth_date,
        birth_place: row.get("birth_place")?,
    })
}

fn parse_book_row(row: &Row<'_>) -> QueryResult<Book> {
    let publish_date = date_from_db(row.get("publish_date")?, "book.publish_date")
        .map_err(QueryError::InvalidData)?;

    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        category: row.get("category")?,
        page_count: row.get("page_count")?,
        publish_date,
    })
}
