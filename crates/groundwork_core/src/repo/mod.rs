//! Repository layer: the generic query/CRUD facade over an entity store.
//!
//! # Responsibility
//! - Define the store-agnostic repository contract.
//! - Isolate SQL details inside the SQLite implementation.
//!
//! # Invariants
//! - Read operations accept an optional specification; filtering logic never
//!   leaks into store-specific query text held by callers.
//! - Writes validate the entity before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`, `Translation`,
//!   `Cancelled`) in addition to DB transport errors.

use crate::db::DbError;
use crate::domain::Entity;
use crate::guard::ValidationError;
use crate::spec::Specification;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod nonblocking;
mod sqlite;

pub use nonblocking::AsyncRepository;
pub use sqlite::{SqlRecord, SqliteRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity failed its precondition checks before a write.
    Validation(ValidationError),
    /// Transport-level database failure.
    Db(DbError),
    /// Update/delete target does not exist in the store.
    NotFound(String),
    /// A filter references a field the store mapping does not cover.
    Translation(String),
    /// Operation was cancelled before the store committed it.
    Cancelled,
    /// The non-blocking worker failed outside the store operation itself.
    Worker(String),
    /// Persisted row could not be decoded into the entity type.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::Translation(field) => {
                write!(f, "filter field `{field}` has no store translation")
            }
            Self::Cancelled => write!(f, "operation cancelled before commit"),
            Self::Worker(message) => write!(f, "worker task failed: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generic CRUD and query facade over an entity store.
///
/// # Contract
/// - `find`/`find_one` with `None` return every entity / the first one;
///   an empty result is `Ok`, never an error.
/// - `create` stages a new row and echoes the entity's key; commit is the
///   caller's concern (run inside a caller-held transaction to batch).
/// - `update`/`delete` fail with `NotFound` when the identity is absent.
pub trait Repository<E: Entity> {
    fn find(&self, spec: Option<&dyn Specification<E>>) -> RepoResult<Vec<E>>;
    fn find_one(&self, spec: Option<&dyn Specification<E>>) -> RepoResult<Option<E>>;
    fn find_by_id(&self, id: &E::Key) -> RepoResult<Option<E>>;
    fn create(&self, entity: &E) -> RepoResult<E::Key>;
    fn update(&self, entity: &E) -> RepoResult<()>;
    fn delete(&self, entity: &E) -> RepoResult<()>;
}
