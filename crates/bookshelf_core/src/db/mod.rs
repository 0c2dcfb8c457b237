//! SQLite storage bootstrap, schema creation and unit-of-work sessions.
//!
//! # Responsibility
//! - Own the session factory for one storage location (`Database`).
//! - Create the catalog schema idempotently.
//! - Hand out independent `Session`s that release their connection exactly once.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Every connection handed out has `foreign_keys=ON` and a busy timeout.
//! - Connection-level failures are fatal and never retried.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod session;

pub use open::{Database, DbTarget};
pub use session::Session;

pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Fatal storage-level failure: the store cannot be reached, bootstrapped or
/// used any more.
#[derive(Debug)]
pub enum ConnectionError {
    /// The storage location could not be opened or created.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// The private directory backing a throwaway store could not be created.
    Scratch {
        target: String,
        source: std::io::Error,
    },
    /// SQLite failure while configuring a connection or creating the schema.
    Sqlite(rusqlite::Error),
    /// The store was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The session was already released.
    SessionClosed { session_id: u64 },
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open database `{target}`: {source}")
            }
            Self::Scratch { target, source } => {
                write!(f, "failed to create scratch storage for `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SessionClosed { session_id } => {
                write!(f, "session {session_id} is already closed")
            }
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Scratch { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::SessionClosed { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for ConnectionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionError;
    use std::error::Error;

    #[test]
    fn open_error_names_target_and_keeps_source() {
        let err = ConnectionError::Open {
            target: "/missing/dir/catalog.db".to_string(),
            source: rusqlite::Error::InvalidQuery,
        };

        assert!(err.to_string().contains("/missing/dir/catalog.db"));
        assert!(err.source().is_some());
    }

    #[test]
    fn session_closed_has_no_source() {
        let err = ConnectionError::SessionClosed { session_id: 7 };
        assert_eq!(err.to_string(), "session 7 is already closed");
        assert!(err.source().is_none());
    }
}
