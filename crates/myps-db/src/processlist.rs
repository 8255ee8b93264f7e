//! Listing query over `information_schema.PROCESSLIST`.

use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Params, Value};
use myps_core::{CompiledFilter, SessionRecord};
use tracing::debug;

use crate::error::DatabaseError;

/// Nullable text columns are coalesced here so row mapping never sees NULL.
const SELECT_COLS: &str = "ID, IFNULL(USER, '') USER, IFNULL(HOST, '') HOST, \
     IFNULL(DB, '') DB, IFNULL(COMMAND, '') COMMAND, TIME, \
     IFNULL(STATE, '') STATE, IFNULL(INFO, '') INFO";

/// Text columns arrive as raw bytes: `INFO` carries query text verbatim and
/// need not be valid UTF-8.
type ProcessRow = (u64, Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>, i64, Vec<u8>, Vec<u8>);

/// Build the listing statement for `filter`.
#[must_use]
pub fn listing_query(filter: &CompiledFilter) -> String {
    format!(
        "SELECT /* SHOW PROCESSLIST */ {SELECT_COLS} FROM information_schema.PROCESSLIST WHERE {}",
        filter.where_clause()
    )
}

fn listing_params(filter: &CompiledFilter) -> Params {
    Params::Positional(filter.arguments().iter().cloned().map(Value::from).collect())
}

fn row_to_session(row: ProcessRow) -> SessionRecord {
    let (id, user, host, db, command, elapsed_seconds, state, info) = row;
    SessionRecord {
        id,
        user: text(&user),
        host: text(&host),
        db: text(&db),
        command: text(&command),
        elapsed_seconds,
        state: text(&state),
        info: text(&info),
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Run the listing and collect rows in server order.
///
/// A row that does not decode into [`ProcessRow`] panics inside the driver:
/// the query coalesces every nullable column, so a decoding failure means the
/// server or driver broke its contract.
pub(crate) async fn list(
    conn: &mut Conn,
    filter: &CompiledFilter,
) -> Result<Vec<SessionRecord>, DatabaseError> {
    let query = listing_query(filter);
    debug!(%query, args = ?filter.arguments(), "listing sessions");

    conn.exec_map(query.as_str(), listing_params(filter), row_to_session)
        .await
        .map_err(DatabaseError::Query)
}
