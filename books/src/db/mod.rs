// Bookshelf
// Copyright 2026 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Persistence layer for the book store.
//!
//! Every operation takes an `Executor`, which is either a connection checked out of a pool or an
//! open transaction, so that callers decide whether a group of operations must be atomic.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Database, Transaction};

mod books;
pub(crate) use books::*;
#[cfg(feature = "postgres")]
pub(crate) mod postgres;
#[cfg(any(feature = "sqlite", test))]
pub(crate) mod sqlite;

/// Database errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum DbError {
    /// The database rejected or failed to run an operation.
    #[error("Database error: {0}")]
    BackendError(String),

    /// A value read from the database does not satisfy the model's rules.
    #[error("Invalid data in database: {0}")]
    DataIntegrityError(String),

    /// No connection to the database could be obtained.
    #[error("Database unavailable")]
    Unavailable,
}

impl From<crate::model::ModelError> for DbError {
    fn from(e: crate::model::ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub(crate) type DbResult<T> = Result<T, DbError>;

/// Converts a `sqlx` error from any backend into a `DbError`.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DbError::Unavailable
        }
        e => DbError::BackendError(e.to_string()),
    }
}

/// A place to run queries on for a specific backend `DB`.
pub(crate) enum Handle<DB: Database> {
    /// A connection from the pool.  Every statement commits on its own.
    Pooled(PoolConnection<DB>),

    /// An open transaction.  Rolled back on drop unless committed.
    Tx(Transaction<'static, DB>),
}

impl<DB: Database> Handle<DB> {
    /// Returns the raw connection to pass to `sqlx` queries.
    pub(crate) fn conn(&mut self) -> &mut DB::Connection {
        match self {
            Handle::Pooled(conn) => &mut **conn,
            Handle::Tx(tx) => &mut **tx,
        }
    }

    /// Commits the transaction, if any.
    async fn commit(self) -> DbResult<()> {
        match self {
            Handle::Pooled(_) => Ok(()),
            Handle::Tx(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A place to run queries on, for whichever backend the store is using.
pub(crate) enum Executor {
    /// An executor for a PostgreSQL database.
    #[cfg(feature = "postgres")]
    Postgres(Handle<sqlx::Postgres>),

    /// An executor for a SQLite database.
    #[cfg(any(feature = "sqlite", test))]
    Sqlite(Handle<sqlx::Sqlite>),
}

/// An executor bound to a transaction that must be committed explicitly.
pub(crate) struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor to run queries within the transaction.
    pub(crate) fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.  Dropping a `TxExecutor` without calling this rolls it back.
    pub(crate) async fn commit(self) -> DbResult<()> {
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(handle) => handle.commit().await,

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(handle) => handle.commit().await,
        }
    }
}

/// A connection pool to one of the supported databases.
#[async_trait]
pub(crate) trait Db {
    /// Checks out a connection to run individual statements on.
    async fn ex(&self) -> DbResult<Executor>;

    /// Starts a new transaction.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the pool, waiting for checked-out connections to be returned.
    async fn close(&self);
}
