//! Scoped unit of work over one SQLite connection.
//!
//! # Invariants
//! - The connection is released exactly once: by `close()` or on drop.
//! - A closed session refuses further use with `ConnectionError::SessionClosed`.

use super::{ConnectionError, ConnectionResult};
use log::{debug, warn};
use rusqlite::Connection;

/// Independent unit of work issued by `Database::session`.
pub struct Session {
    id: u64,
    conn: Option<Connection>,
}

impl Session {
    pub(crate) fn new(id: u64, conn: Connection) -> Self {
        Self {
            id,
            conn: Some(conn),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Borrows the live connection for read-side repositories.
    pub fn connection(&self) -> ConnectionResult<&Connection> {
        self.conn.as_ref().ok_or(ConnectionError::SessionClosed {
            session_id: self.id,
        })
    }

    /// Borrows the live connection for repositories that open transactions.
    pub fn connection_mut(&mut self) -> ConnectionResult<&mut Connection> {
        self.conn.as_mut().ok_or(ConnectionError::SessionClosed {
            session_id: self.id,
        })
    }

    /// Releases the connection. Safe to call any number of times.
    pub fn close(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };

        match conn.close() {
            Ok(()) => debug!(
                "event=session_close module=db status=ok session_id={}",
                self.id
            ),
            // The connection handle is dropped here, which closes it anyway.
            Err((_conn, err)) => warn!(
                "event=session_close module=db status=error session_id={} error={}",
                self.id, err
            ),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}
