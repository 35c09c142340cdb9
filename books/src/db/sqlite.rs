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

//! SQLite backend.

use crate::db::{Db, DbResult, Executor, Handle, TxExecutor, map_sqlx_error};
use async_trait::async_trait;
use log::warn;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Options to open a SQLite database.
#[derive(Debug, PartialEq)]
pub struct SqliteOptions {
    /// Path to the database file, created if missing, or `:memory:`.
    pub path: String,

    /// Upper bound on the number of pooled connections.  Uses the `sqlx` default if unset.
    pub max_connections: Option<u32>,
}

/// A book store backed by a SQLite database.
pub(crate) struct SqliteDb {
    /// Pool of connections to the database file.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Opens the database described by `opts`.
    pub(crate) async fn connect(opts: &SqliteOptions) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&opts.path)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if let Some(max_connections) = opts.max_connections {
            pool_options = pool_options.max_connections(max_connections);
        }

        let pool = pool_options.connect_with(options).await.map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("SQLite pool dropped without calling close()");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Sqlite(Handle::Pooled(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(Handle::Tx(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
