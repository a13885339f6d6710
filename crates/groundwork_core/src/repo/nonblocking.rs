//! Non-blocking, cancellable repository facade.
//!
//! # Responsibility
//! - Expose each repository operation in an async, cancellable form.
//!
//! # Invariants
//! - The cancellation token is honored up to the point the store operation
//!   starts; after that the call is atomic at store granularity.
//! - A cancellation observed first yields `Cancelled` with no store mutation.

use crate::repo::{RepoError, RepoResult, Repository, SqlRecord, SqliteRepository};
use crate::spec::{Filter, Specification};
use rusqlite::Connection;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::task;
use tokio_util::sync::CancellationToken;

/// Async wrapper that owns a connection and runs repository operations on
/// the blocking thread pool.
///
/// Operations serialize on the connection lock; concurrent calls on
/// different entities carry no ordering guarantee between each other.
pub struct AsyncRepository<E> {
    conn: Arc<Mutex<Connection>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> AsyncRepository<E>
where
    E: SqlRecord + Send + 'static,
    E::Key: Send + 'static,
{
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            _entity: PhantomData,
        }
    }

    pub async fn find<S>(&self, spec: Option<S>, cancel: &CancellationToken) -> RepoResult<Vec<E>>
    where
        S: Specification<E> + Send + 'static,
    {
        self.run(cancel, move |repo| {
            repo.find(spec.as_ref().map(|s| s as &dyn Specification<E>))
        })
        .await
    }

    pub async fn find_one<S>(
        &self,
        spec: Option<S>,
        cancel: &CancellationToken,
    ) -> RepoResult<Option<E>>
    where
        S: Specification<E> + Send + 'static,
    {
        self.run(cancel, move |repo| {
            repo.find_one(spec.as_ref().map(|s| s as &dyn Specification<E>))
        })
        .await
    }

    pub async fn find_by_id(&self, id: E::Key, cancel: &CancellationToken) -> RepoResult<Option<E>> {
        self.run(cancel, move |repo| repo.find_by_id(&id)).await
    }

    /// Runs a filter natively, without an in-memory fallback.
    pub async fn find_native(&self, filter: Filter, cancel: &CancellationToken) -> RepoResult<Vec<E>> {
        self.run(cancel, move |repo| repo.find_native(&filter)).await
    }

    /// Stages the entity and hands it back once the store acknowledged it.
    pub async fn create(&self, entity: E, cancel: &CancellationToken) -> RepoResult<E> {
        self.run(cancel, move |repo| {
            repo.create(&entity)?;
            Ok(entity)
        })
        .await
    }

    pub async fn update(&self, entity: E, cancel: &CancellationToken) -> RepoResult<()> {
        self.run(cancel, move |repo| repo.update(&entity)).await
    }

    pub async fn delete(&self, entity: E, cancel: &CancellationToken) -> RepoResult<()> {
        self.run(cancel, move |repo| repo.delete(&entity)).await
    }

    async fn run<T, F>(&self, cancel: &CancellationToken, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteRepository<'_, E>) -> RepoResult<T> + Send + 'static,
    {
        if cancel.is_cancelled() {
            return Err(RepoError::Cancelled);
        }

        let conn = Arc::clone(&self.conn);
        let cancel = cancel.clone();
        let handle = task::spawn_blocking(move || {
            // Last chance to abort: once the statement runs, the operation
            // completes at store granularity.
            if cancel.is_cancelled() {
                return Err(RepoError::Cancelled);
            }
            let guard = conn
                .lock()
                .map_err(|_| RepoError::Worker("connection lock poisoned".to_string()))?;
            op(&SqliteRepository::new(&guard))
        });

        match handle.await {
            Ok(result) => result,
            Err(err) => Err(RepoError::Worker(err.to_string())),
        }
    }
}
