//! # myps-core
//!
//! Core types shared by every myps crate:
//! - [`SessionRecord`], the snapshot of one live server-side session
//! - [`FilterCriteria`] and the filter compiler producing a [`CompiledFilter`]
//! - the [`SessionTable`] seam the action executors drive
//! - cross-cutting error types

pub mod errors;
pub mod filter;
pub mod session;
pub mod table;

pub use errors::CoreError;
pub use filter::{CompiledFilter, Criterion, FilterCriteria};
pub use session::SessionRecord;
pub use table::{SessionTable, Termination};
