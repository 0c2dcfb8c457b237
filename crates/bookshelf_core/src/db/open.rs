//! Database handle: one owner of the session factory per storage location.
//!
//! # Responsibility
//! - Resolve a `DbTarget` into SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Issue independent sessions and run the idempotent schema step.
//!
//! # Invariants
//! - `Database::open` fails fast when the location cannot be reached.
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Throwaway targets live in a directory owned by the handle and are
//!   removed when the handle drops.

use super::schema::ensure_schema;
use super::session::Session;
use super::{ConnectionError, ConnectionResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use uuid::Uuid;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const SCRATCH_FILE_NAME: &str = "catalog.db";

/// Storage location a `Database` is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    /// SQLite database file, created on first open.
    File(PathBuf),
    /// Throwaway store private to one handle. Every session opened from the
    /// same handle sees the same data; nothing survives the handle.
    ///
    /// Backed by a file in a handle-owned temporary directory rather than a
    /// shared-cache `:memory:` database, so sessions get SQLite file locking
    /// and the busy timeout applies to them.
    Memory(String),
}

impl DbTarget {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn memory(name: impl Into<String>) -> Self {
        Self::Memory(name.into())
    }

    /// Throwaway target with a process-unique name, used in logs and errors.
    pub fn unique_memory() -> Self {
        Self::Memory(format!("bookshelf-{}", Uuid::new_v4()))
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory(_) => "memory",
        }
    }
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory(name) => write!(f, "memory:{name}"),
        }
    }
}

/// Owner of the session factory for one storage location.
///
/// Construct one per location and pass it to consumers; sessions borrow
/// nothing from it, so they can be moved to other threads.
pub struct Database {
    target: DbTarget,
    location: PathBuf,
    next_session_id: AtomicU64,
    // Must outlive every connection to `location`; dropped after them.
    _scratch: Option<TempDir>,
}

impl Database {
    /// Opens (or creates) the store behind `target`.
    ///
    /// # Side effects
    /// - Touches the store once so unreachable locations fail here.
    /// - Emits `db_open` logging events with duration and status.
    ///
    /// # Errors
    /// - `ConnectionError::Open` when the location cannot be opened or created.
    /// - `ConnectionError::Scratch` when a throwaway store has nowhere to live.
    pub fn open(target: DbTarget) -> ConnectionResult<Self> {
        let started_at = Instant::now();
        info!(
            "event=db_open module=db status=start mode={} target={}",
            target.mode(),
            target
        );

        let resolved = resolve_location(&target).and_then(|(location, scratch)| {
            connect(&target, &location)?;
            Ok((location, scratch))
        });
        let (location, scratch) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                    target.mode(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            target.mode(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            target,
            location,
            next_session_id: AtomicU64::new(0),
            _scratch: scratch,
        })
    }

    /// Creates the catalog tables if they are absent. No-op otherwise.
    pub fn ensure_schema(&self) -> ConnectionResult<()> {
        let mut conn = connect(&self.target, &self.location)?;
        ensure_schema(&mut conn)
    }

    /// Returns a fresh unit of work bound to this handle.
    ///
    /// Each session owns its own connection; sessions never share state
    /// beyond the underlying store.
    pub fn session(&self) -> ConnectionResult<Session> {
        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed) + 1;
        let conn = connect(&self.target, &self.location)?;
        debug!(
            "event=session_open module=db status=ok session_id={} mode={}",
            session_id,
            self.target.mode()
        );
        Ok(Session::new(session_id, conn))
    }

    /// Runs `work` on a new session and releases it on every exit path.
    pub fn with_session<T, E>(
        &self,
        work: impl FnOnce(&mut Session) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<ConnectionError>,
    {
        let mut session = self.session()?;
        let outcome = work(&mut session);
        session.close();
        outcome
    }

    pub fn target(&self) -> &DbTarget {
        &self.target
    }
}

fn resolve_location(target: &DbTarget) -> ConnectionResult<(PathBuf, Option<TempDir>)> {
    match target {
        DbTarget::File(path) => Ok((path.clone(), None)),
        DbTarget::Memory(_) => {
            let scratch = tempfile::Builder::new()
                .prefix("bookshelf-")
                .tempdir()
                .map_err(|source| ConnectionError::Scratch {
                    target: target.to_string(),
                    source,
                })?;
            Ok((scratch.path().join(SCRATCH_FILE_NAME), Some(scratch)))
        }
    }
}

fn connect(target: &DbTarget, location: &Path) -> ConnectionResult<Connection> {
    let conn = Connection::open(location)
        .and_then(|conn| configure_connection(&conn).map(|()| conn))
        .map_err(|source| ConnectionError::Open {
            target: target.to_string(),
            source,
        })?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    // Forces SQLite to read the file header; open alone is lazy for some errors.
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(())
}
