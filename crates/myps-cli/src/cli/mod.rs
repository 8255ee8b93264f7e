use clap::{Parser, Subcommand};

pub mod args;

pub use args::{ConnectionArgs, KillArgs, SessionArgs};

/// Top-level CLI parser for the `myps` binary.
#[derive(Debug, Parser)]
#[command(
    name = "myps",
    version,
    about = "Grep and kill MySQL sessions (SHOW PROCESSLIST / KILL) by filter"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Display sessions matching the filter. Exits 1 when nothing matches.
    Grep(SessionArgs),
    /// Kill sessions matching the filter.
    Kill(KillArgs),
}

impl Commands {
    #[must_use]
    pub const fn session(&self) -> &SessionArgs {
        match self {
            Self::Grep(args) => args,
            Self::Kill(args) => &args.session,
        }
    }
}
