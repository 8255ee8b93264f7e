//! `KILL <id>` and the "already gone" classification rule.

use mysql_async::Conn;
use mysql_async::prelude::Queryable;
use myps_core::Termination;
use tracing::debug;

use crate::error::DatabaseError;

/// Server error `ER_NO_SUCH_THREAD`: "Unknown thread id".
pub const ER_NO_SUCH_THREAD: u16 = 1094;

/// Whether a server error code means the target session no longer exists.
#[must_use]
pub const fn is_unknown_session_code(code: u16) -> bool {
    code == ER_NO_SUCH_THREAD
}

/// Whether a terminate failure is the benign listing/kill race.
#[must_use]
pub fn is_already_gone(error: &mysql_async::Error) -> bool {
    matches!(error, mysql_async::Error::Server(server) if is_unknown_session_code(server.code))
}

/// Map the raw outcome of a terminate call onto [`Termination`].
///
/// # Errors
///
/// Returns `DatabaseError::Terminate` for every failure that is not
/// [`is_already_gone`].
pub fn classify(id: u64, result: Result<(), mysql_async::Error>) -> Result<Termination, DatabaseError> {
    match result {
        Ok(()) => Ok(Termination::Terminated),
        Err(error) if is_already_gone(&error) => {
            debug!(id, "session already gone");
            Ok(Termination::AlreadyGone)
        }
        Err(source) => Err(DatabaseError::Terminate { id, source }),
    }
}

pub(crate) async fn terminate(conn: &mut Conn, id: u64) -> Result<Termination, DatabaseError> {
    // `id` is a typed integer from the listing, so it is formatted directly.
    let statement = format!("KILL {id}");
    debug!(%statement, "terminating session");
    classify(id, conn.query_drop(statement).await)
}
