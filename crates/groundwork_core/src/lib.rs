//! Cross-cutting building blocks for data-access layers: composable
//! specifications (predicates) and a generic repository facade that applies
//! them against a persistent entity store.
//!
//! Callers build predicate trees with the fluent combinators, then hand the
//! root to a repository's query methods. Expression-based predicates are
//! pushed down to the store's native filter form; opaque ones are evaluated
//! in memory over every candidate.

pub mod db;
pub mod domain;
pub mod guard;
pub mod logging;
pub mod repo;
pub mod spec;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use domain::{AggregateRoot, Entity, EventQueue};
pub use guard::{GuardResult, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use repo::{AsyncRepository, RepoError, RepoResult, Repository, SqlRecord, SqliteRepository};
pub use spec::{
    from_fn, CmpOp, FieldAccess, Filter, FilterSpec, FnSpec, ScalarValue, Specification,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
