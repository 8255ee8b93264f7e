//! # myps-db
//!
//! Live session listing and termination over a single MySQL connection.
//!
//! [`MySqlSessionTable`] implements [`myps_core::SessionTable`]: one
//! connection, opened with the descriptor's connect timeout, used for the
//! listing query and each `KILL` in turn. Uses `mysql_async`; callers run it on
//! a current-thread runtime and await every call in sequence.

pub mod error;
pub mod processlist;
pub mod terminate;

use mysql_async::{Conn, Opts, OptsBuilder};
use myps_config::ConnectionDescriptor;
use myps_core::{CompiledFilter, SessionRecord, SessionTable, Termination};
use tracing::debug;

pub use error::DatabaseError;

/// The server's live session table, reached through one connection.
pub struct MySqlSessionTable {
    conn: Conn,
}

impl MySqlSessionTable {
    /// Open the connection described by `descriptor`.
    ///
    /// The descriptor's timeout bounds establishment only; later queries are
    /// not time-limited.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConnectTimeout` if establishment exceeds the
    /// timeout and `DatabaseError::Connect` if the server refuses or is
    /// unreachable.
    pub async fn connect(descriptor: &ConnectionDescriptor) -> Result<Self, DatabaseError> {
        let dsn = descriptor.redacted();
        let timeout = descriptor.connect_timeout;
        debug!(%dsn, ?timeout, "connecting");

        let conn = tokio::time::timeout(timeout, Conn::new(connection_opts(descriptor)))
            .await
            .map_err(|_| DatabaseError::ConnectTimeout {
                dsn: dsn.clone(),
                timeout,
            })?
            .map_err(|source| DatabaseError::Connect { dsn, source })?;

        Ok(Self { conn })
    }
}

impl SessionTable for MySqlSessionTable {
    type Error = DatabaseError;

    async fn list(&mut self, filter: &CompiledFilter) -> Result<Vec<SessionRecord>, DatabaseError> {
        processlist::list(&mut self.conn, filter).await
    }

    async fn terminate(&mut self, id: u64) -> Result<Termination, DatabaseError> {
        terminate::terminate(&mut self.conn, id).await
    }

    /// A failed goodbye is logged, not surfaced.
    async fn close(self) {
        if let Err(error) = self.conn.disconnect().await {
            debug!(%error, "disconnect failed");
        }
    }
}

fn connection_opts(descriptor: &ConnectionDescriptor) -> Opts {
    OptsBuilder::default()
        .ip_or_hostname(descriptor.host.clone())
        .tcp_port(descriptor.port)
        .user(Some(descriptor.user.clone()))
        .pass(descriptor.password.clone())
        .socket(
            descriptor
                .socket
                .as_ref()
                .map(|path| path.display().to_string()),
        )
        .into()
}
