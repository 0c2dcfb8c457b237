//! Core domain logic for the Bookshelf catalog.
//! Authors, books, their many-to-many association, and the read-only
//! analytical queries over them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ConnectionError, ConnectionResult, Database, DbTarget, Session};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::author::{Author, AuthorId, NewAuthor};
pub use model::book::{Book, BookId, NewBook};
pub use model::ModelValidationError;
pub use repo::catalog_repo::{
    CatalogCounts, CatalogRepository, RepoError, RepoResult, SqliteCatalogRepository,
};
pub use repo::query_repo::{CatalogQueries, QueryError, QueryResult, SqliteCatalogQueries};
pub use service::catalog_service::CatalogService;
pub use service::report_service::{
    CatalogReport, ReportService, MORE_THAN_BOOKS_LIMIT, MORE_THAN_BOOKS_THRESHOLD,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
