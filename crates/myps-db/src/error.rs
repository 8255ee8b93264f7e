//! Database error types for myps-db.

use std::time::Duration;

use thiserror::Error;

/// Errors from talking to the server.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection could not be established.
    #[error("Connection failed to {dsn}: {source}")]
    Connect {
        dsn: String,
        #[source]
        source: mysql_async::Error,
    },

    /// Connection establishment exceeded the configured timeout.
    #[error("Connection to {dsn} timed out after {timeout:?}")]
    ConnectTimeout { dsn: String, timeout: Duration },

    /// The session listing query failed.
    #[error("Query failed: {0}")]
    Query(#[source] mysql_async::Error),

    /// A terminate command failed for a reason other than "already gone".
    #[error("KILL {id} failed: {source}")]
    Terminate {
        id: u64,
        #[source]
        source: mysql_async::Error,
    },
}
