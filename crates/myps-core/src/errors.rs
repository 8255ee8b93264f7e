//! Cross-cutting error types for myps.
//!
//! Connection, query and terminate failures live in `myps-db`, credential
//! failures in `myps-config`. They converge in `myps-cli` as `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Every filter criterion was unset and no positional shortcut was given.
    #[error("no matching criteria specified")]
    NoCriteria,
}
