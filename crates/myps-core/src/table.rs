//! The seam between the action executors and the live session table.

use crate::filter::CompiledFilter;
use crate::session::SessionRecord;

/// Result of a single terminate call that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The server accepted the terminate command.
    Terminated,
    /// The session ended between listing and terminating.
    ///
    /// Implementations map the server's "unknown session id" failure to this
    /// variant; executors treat it as success.
    AlreadyGone,
}

/// A live, concurrently-changing table of server sessions reachable over one
/// connection.
///
/// Implementations must exclude their own connection from [`SessionTable::list`]
/// (the compiled WHERE clause already does this) and must not reorder rows.
#[allow(async_fn_in_trait)]
pub trait SessionTable {
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the sessions matching `filter`, in server order.
    async fn list(&mut self, filter: &CompiledFilter) -> Result<Vec<SessionRecord>, Self::Error>;

    /// Terminate the session with the given id.
    async fn terminate(&mut self, id: u64) -> Result<Termination, Self::Error>;

    /// Release the underlying connection.
    async fn close(self)
    where
        Self: Sized,
    {
    }
}
