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

//! PostgreSQL backend.

use crate::config::{required_var, var};
use crate::db::{Db, DbResult, Executor, Handle, TxExecutor, map_sqlx_error};
use async_trait::async_trait;
use derivative::Derivative;
use log::warn;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

/// How long to wait for a pooled connection before reporting the database as unavailable.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Options to connect to a PostgreSQL server.
#[derive(Derivative)]
#[derivative(Debug, PartialEq)]
pub struct PostgresOptions {
    /// Host name of the server.
    pub host: String,

    /// Port of the server.
    pub port: u16,

    /// Name of the database holding the `books` table.
    pub database: String,

    /// User to log in as.
    pub username: String,

    /// Password of `username`.
    #[derivative(Debug = "ignore")]
    pub password: String,

    /// Number of connections the pool keeps open even when idle.
    pub min_connections: Option<u32>,

    /// Upper bound on the number of pooled connections.
    pub max_connections: Option<u32>,
}

impl PostgresOptions {
    /// Reads the options from `<prefix>_HOST`, `<prefix>_PORT`, `<prefix>_DATABASE`,
    /// `<prefix>_USERNAME` and `<prefix>_PASSWORD`, which are required, and from
    /// `<prefix>_MIN_CONNECTIONS` and `<prefix>_MAX_CONNECTIONS`, which are not.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let name = |suffix: &str| format!("{}_{}", prefix, suffix);
        Ok(Self {
            host: required_var(&name("HOST"))?,
            port: required_var(&name("PORT"))?,
            database: required_var(&name("DATABASE"))?,
            username: required_var(&name("USERNAME"))?,
            password: required_var(&name("PASSWORD"))?,
            min_connections: var(&name("MIN_CONNECTIONS"))?,
            max_connections: var(&name("MAX_CONNECTIONS"))?,
        })
    }

    /// Converts these options into the pool and connection settings of `sqlx`.
    fn split(&self) -> (PgPoolOptions, PgConnectOptions) {
        let mut pool_options = PgPoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
        if let Some(min_connections) = self.min_connections {
            pool_options = pool_options.min_connections(min_connections);
        }
        if let Some(max_connections) = self.max_connections {
            pool_options = pool_options.max_connections(max_connections);
        }

        let connect_options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .password(&self.password);

        (pool_options, connect_options)
    }
}

/// A book store backed by a PostgreSQL database.
pub(crate) struct PostgresDb {
    /// Pool of connections to the server.
    pool: PgPool,
}

impl PostgresDb {
    /// Connects to the server described by `opts`.
    pub(crate) async fn connect(opts: &PostgresOptions) -> DbResult<Self> {
        let (pool_options, connect_options) = opts.split();
        let pool = pool_options.connect_with(connect_options).await.map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }
}

impl Drop for PostgresDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("PostgreSQL pool dropped without calling close()");
        }
    }
}

#[async_trait]
impl Db for PostgresDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Postgres(Handle::Pooled(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Postgres(Handle::Tx(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod testutils {
    use super::*;

    /// Connects to the server configured in the `PGSQL_TEST_*` variables.
    ///
    /// The pool holds a single connection whose `search_path` points at its temporary schema, so
    /// every table the test creates vanishes when the pool closes.
    pub(crate) async fn setup() -> PostgresDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let opts = PostgresOptions::from_env("PGSQL_TEST").unwrap();
        let (pool_options, connect_options) = opts.split();
        let pool = pool_options
            .max_connections(1)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("SET search_path TO pg_temp").execute(conn).await?;
                    Ok(())
                })
            })
            .connect_with(connect_options)
            .await
            .unwrap();
        PostgresDb { pool }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let opts = PostgresOptions {
            host: "localhost".to_owned(),
            port: 5432,
            database: "books".to_owned(),
            username: "reader".to_owned(),
            password: "do not print".to_owned(),
            min_connections: None,
            max_connections: None,
        };
        let debug = format!("{:?}", opts);
        assert!(debug.contains("reader"));
        assert!(!debug.contains("do not print"));
    }

    #[test]
    fn test_from_env_invalid_port() {
        temp_env::with_vars(
            [
                ("PREFIX_HOST", Some("localhost")),
                ("PREFIX_PORT", Some("not-a-port")),
                ("PREFIX_DATABASE", Some("books")),
                ("PREFIX_USERNAME", Some("reader")),
                ("PREFIX_PASSWORD", Some("secret")),
            ],
            || {
                let err = PostgresOptions::from_env("PREFIX").unwrap_err();
                assert!(err.contains("PREFIX_PORT"), "{}", err);
            },
        );
    }

    #[tokio::test]
    #[ignore = "Requires a PostgreSQL server configured via PGSQL_TEST_*"]
    async fn test_tx_rolled_back_on_drop() {
        let db = testutils::setup().await;

        let mut tx = db.begin().await.unwrap();
        match tx.ex() {
            Executor::Postgres(handle) => {
                sqlx::query("CREATE TABLE t (i INTEGER)").execute(handle.conn()).await.unwrap();
            }
            #[allow(unreachable_patterns)]
            _ => unreachable!(),
        }
        drop(tx);

        match db.ex().await.unwrap() {
            Executor::Postgres(mut handle) => {
                let err = sqlx::query("SELECT * FROM t").execute(handle.conn()).await.unwrap_err();
                assert!(err.to_string().contains("does not exist"));
            }
            #[allow(unreachable_patterns)]
            _ => unreachable!(),
        }

        db.close().await;
    }
}
