pub mod confirm;
pub mod dispatch;
pub mod grep;
pub mod kill;

use myps_core::CompiledFilter;
use myps_db::MySqlSessionTable;

use crate::cli::{ConnectionArgs, SessionArgs};

/// How an invocation ended, short of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `grep` printed this many sessions.
    Reported(usize),
    /// `grep` matched nothing.
    NoMatches,
    /// `kill` acted on this many sessions (already-gone ones included).
    Killed(usize),
    /// `kill` was not confirmed.
    Declined,
}

impl Outcome {
    /// Process exit status. Only an empty `grep` is non-zero.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::NoMatches => 1,
            Self::Reported(_) | Self::Killed(_) | Self::Declined => 0,
        }
    }
}

/// Compile the filter before anything touches the server.
fn compile_filter(args: &SessionArgs, command: &str) -> anyhow::Result<CompiledFilter> {
    args.criteria().compile().map_err(|error| {
        anyhow::anyhow!("{error}.\n try 'myps {command} --help' for more information")
    })
}

async fn open_table(args: &ConnectionArgs) -> anyhow::Result<MySqlSessionTable> {
    let descriptor = args.resolver().resolve()?;
    Ok(MySqlSessionTable::connect(&descriptor).await?)
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory session table for executor tests.

    use myps_core::{CompiledFilter, SessionRecord, SessionTable, Termination};

    #[derive(Debug, thiserror::Error)]
    pub enum FakeError {
        #[error("listing failed")]
        List,
        #[error("You are not owner of thread {0}")]
        Denied(u64),
    }

    #[derive(Debug, Default)]
    pub struct FakeTable {
        pub sessions: Vec<SessionRecord>,
        pub fail_list: bool,
        /// Ids whose terminate reports the already-gone race.
        pub gone: Vec<u64>,
        /// Id whose terminate fails outright.
        pub deny: Option<u64>,
        pub listed: Vec<CompiledFilter>,
        pub terminate_calls: Vec<u64>,
    }

    impl FakeTable {
        pub fn with_sessions(ids: impl IntoIterator<Item = u64>) -> Self {
            Self {
                sessions: ids.into_iter().map(session).collect(),
                ..Default::default()
            }
        }
    }

    pub fn session(id: u64) -> SessionRecord {
        SessionRecord {
            id,
            user: "app".into(),
            host: "10.0.0.7:51514".into(),
            db: "shop".into(),
            command: "Query".into(),
            elapsed_seconds: 5,
            state: "executing".into(),
            info: format!("SELECT {id}"),
        }
    }

    // Implemented on `&mut` so tests can inspect the table after an executor
    // consumes and closes it.
    impl SessionTable for &mut FakeTable {
        type Error = FakeError;

        async fn list(&mut self, filter: &CompiledFilter) -> Result<Vec<SessionRecord>, FakeError> {
            self.listed.push(filter.clone());
            if self.fail_list {
                return Err(FakeError::List);
            }
            Ok(self.sessions.clone())
        }

        async fn terminate(&mut self, id: u64) -> Result<Termination, FakeError> {
            self.terminate_calls.push(id);
            if self.deny == Some(id) {
                return Err(FakeError::Denied(id));
            }
            if self.gone.contains(&id) {
                return Ok(Termination::AlreadyGone);
            }
            Ok(Termination::Terminated)
        }
    }
}
