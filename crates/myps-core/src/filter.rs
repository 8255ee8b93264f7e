//! Filter compiler: optional criteria → parameterized WHERE clause.
//!
//! Each set criterion contributes exactly one predicate and one bound argument,
//! always in [`Criterion::ALL`] order, so the query shape depends only on which
//! criteria are set. The caller's own session is excluded by a predicate that
//! precedes every compiled one and binds nothing.

use crate::errors::CoreError;

/// Predicate that keeps the querying connection out of its own results.
pub const SELF_EXCLUSION: &str = "ID != CONNECTION_ID()";

/// One filterable column of the live session table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Criterion {
    Time,
    User,
    Db,
    Command,
    State,
    Info,
}

impl Criterion {
    /// Fixed compilation order.
    pub const ALL: [Self; 6] = [
        Self::Time,
        Self::User,
        Self::Db,
        Self::Command,
        Self::State,
        Self::Info,
    ];

    /// SQL predicate with a single positional placeholder.
    ///
    /// `TIME` is a numeric lower bound. Text columns are matched with `LIKE`
    /// against `IFNULL(col, '')` so a NULL column still matches `%`.
    #[must_use]
    pub const fn predicate(self) -> &'static str {
        match self {
            Self::Time => "TIME >= ?",
            Self::User => "IFNULL(USER, '') LIKE ?",
            Self::Db => "IFNULL(DB, '') LIKE ?",
            Self::Command => "IFNULL(COMMAND, '') LIKE ?",
            Self::State => "IFNULL(STATE, '') LIKE ?",
            Self::Info => "IFNULL(INFO, '') LIKE ?",
        }
    }
}

/// User-supplied criteria. `None` is unset; `Some("")` is a real filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub time: Option<String>,
    pub user: Option<String>,
    pub db: Option<String>,
    pub command: Option<String>,
    pub state: Option<String>,
    pub info: Option<String>,
}

impl FilterCriteria {
    /// Use the first positional argument as the `info` criterion when `info`
    /// itself is unset. `myps grep foo` behaves like `myps grep -i foo`.
    #[must_use]
    pub fn with_positional(mut self, positional: Option<String>) -> Self {
        if self.info.is_none() {
            self.info = positional;
        }
        self
    }

    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> Option<&String> {
        match criterion {
            Criterion::Time => self.time.as_ref(),
            Criterion::User => self.user.as_ref(),
            Criterion::Db => self.db.as_ref(),
            Criterion::Command => self.command.as_ref(),
            Criterion::State => self.state.as_ref(),
            Criterion::Info => self.info.as_ref(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        Criterion::ALL.iter().all(|c| self.get(*c).is_none())
    }

    /// Compile the set criteria into predicates and bound arguments.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCriteria` if no criterion is set; an unbounded
    /// listing or kill is never issued.
    pub fn compile(&self) -> Result<CompiledFilter, CoreError> {
        if self.is_empty() {
            return Err(CoreError::NoCriteria);
        }

        let mut predicates = Vec::new();
        let mut arguments = Vec::new();
        for criterion in Criterion::ALL {
            if let Some(value) = self.get(criterion) {
                predicates.push(criterion.predicate());
                arguments.push(value.clone());
            }
        }

        Ok(CompiledFilter {
            predicates,
            arguments,
        })
    }
}

/// Output of [`FilterCriteria::compile`].
///
/// `predicates().len() == arguments().len()`; the self-exclusion predicate is
/// not counted in either.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledFilter {
    predicates: Vec<&'static str>,
    arguments: Vec<String>,
}

impl CompiledFilter {
    #[must_use]
    pub fn predicates(&self) -> &[&'static str] {
        &self.predicates
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Full WHERE clause body, self-exclusion first, joined with `AND`.
    #[must_use]
    pub fn where_clause(&self) -> String {
        std::iter::once(SELF_EXCLUSION)
            .chain(self.predicates.iter().copied())
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
