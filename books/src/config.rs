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

//! Runtime configuration read from environment variables.

#[cfg(feature = "postgres")]
use crate::db::postgres::PostgresOptions;
#[cfg(feature = "sqlite")]
use crate::db::sqlite::SqliteOptions;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Path to the SQLite database when `<prefix>_SQLITE_PATH` is not set.
#[cfg(feature = "sqlite")]
const DEFAULT_SQLITE_PATH: &str = "books.db";

/// Reads the variable `name` and parses it as a `T`, returning `None` if it is not set.
pub(crate) fn var<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(format!("Invalid value '{}' in {}: {}", value, name, e)),
        },
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(format!("{} is not valid UTF-8", name)),
    }
}

/// Same as `var` but fails if the variable is not set.
pub(crate) fn required_var<T>(name: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    var(name)?.ok_or_else(|| format!("{} must be set", name))
}

/// Where to store the books.
#[derive(Debug)]
pub enum DbOptions {
    /// Store the books in a PostgreSQL database.
    #[cfg(feature = "postgres")]
    Postgres(PostgresOptions),

    /// Store the books in a SQLite database.
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteOptions),
}

impl DbOptions {
    /// Reads the database configuration from variables whose names start with `prefix`.
    ///
    /// `<prefix>_BACKEND` picks the backend and defaults to `sqlite`.  SQLite is configured with
    /// `<prefix>_SQLITE_PATH` and `<prefix>_SQLITE_MAX_CONNECTIONS`, and PostgreSQL with the
    /// `<prefix>_PGSQL_*` variables.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let backend_var = format!("{}_BACKEND", prefix);
        let backend = var::<String>(&backend_var)?;
        match backend.as_deref() {
            #[cfg(feature = "sqlite")]
            None | Some("sqlite") => Ok(DbOptions::Sqlite(SqliteOptions {
                path: var(&format!("{}_SQLITE_PATH", prefix))?
                    .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_owned()),
                max_connections: var(&format!("{}_SQLITE_MAX_CONNECTIONS", prefix))?,
            })),

            #[cfg(feature = "postgres")]
            Some("postgres") => {
                Ok(DbOptions::Postgres(PostgresOptions::from_env(&format!("{}_PGSQL", prefix))?))
            }

            Some(other) => Err(format!("Unsupported backend '{}' in {}", other, backend_var)),

            #[allow(unreachable_patterns)]
            None => Err(format!("{} must be set", backend_var)),
        }
    }
}
