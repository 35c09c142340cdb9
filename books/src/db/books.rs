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

//! Operations on the `books` table.

use crate::db::{DbError, DbResult, Executor, map_sqlx_error};
use crate::model::{Author, Book, BookId, Title};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

/// Creates the `books` table if it does not exist yet.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    let result = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(handle) => {
            sqlx::raw_sql(include_str!("postgres.sql")).execute(handle.conn()).await.map(|_| ())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(handle) => {
            sqlx::raw_sql(include_str!("sqlite.sql")).execute(handle.conn()).await.map(|_| ())
        }
    };
    result.map_err(map_sqlx_error)
}

/// Builds a book out of a row's raw columns, checking that they are still valid.
fn row_to_book(id: i64, title: String, author: String) -> DbResult<Book> {
    Ok(Book::new(BookId::new(id), Title::new(title)?, Author::new(author)?))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        row_to_book(
            row.try_get("id").map_err(map_sqlx_error)?,
            row.try_get("title").map_err(map_sqlx_error)?,
            row.try_get("author").map_err(map_sqlx_error)?,
        )
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        row_to_book(
            row.try_get("id").map_err(map_sqlx_error)?,
            row.try_get("title").map_err(map_sqlx_error)?,
            row.try_get("author").map_err(map_sqlx_error)?,
        )
    }
}

/// Turns `keyword` into a `LIKE` pattern that matches it anywhere in a string.
///
/// Wildcards in `keyword` are escaped with `\`, so the query must use `ESCAPE '\'`.
pub(super) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Runs a query that returns `id`, `title` and `author` columns, binding `arg` as its only
/// parameter if present.  The two queries must only differ in their placeholder syntax.
pub(super) async fn query_books(
    ex: &mut Executor,
    postgres_query: &str,
    sqlite_query: &str,
    arg: Option<&str>,
) -> DbResult<Vec<Book>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(handle) => {
            let mut query = sqlx::query(postgres_query);
            if let Some(arg) = arg {
                query = query.bind(arg);
            }
            let rows = query.fetch_all(handle.conn()).await.map_err(map_sqlx_error)?;
            rows.into_iter().map(Book::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(handle) => {
            let mut query = sqlx::query(sqlite_query);
            if let Some(arg) = arg {
                query = query.bind(arg);
            }
            let rows = query.fetch_all(handle.conn()).await.map_err(map_sqlx_error)?;
            rows.into_iter().map(Book::try_from).collect()
        }
    }
}

/// Inserts a new book and returns it with the identifier the database assigned to it.
///
/// Nothing prevents inserting the same book more than once.
pub(crate) async fn create_book(ex: &mut Executor, title: Title, author: Author) -> DbResult<Book> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(handle) => {
            sqlx::query_scalar("INSERT INTO books (title, author) VALUES ($1, $2) RETURNING id")
                .bind(title.as_str())
                .bind(author.as_str())
                .fetch_one(handle.conn())
                .await
                .map_err(map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(handle) => {
            let done = sqlx::query("INSERT INTO books (title, author) VALUES (?, ?)")
                .bind(title.as_str())
                .bind(author.as_str())
                .execute(handle.conn())
                .await
                .map_err(map_sqlx_error)?;
            if done.rows_affected() != 1 {
                return Err(DbError::BackendError(format!(
                    "Insertion did not affect exactly one row: {} rows affected",
                    done.rows_affected()
                )));
            }
            done.last_insert_rowid()
        }
    };

    Ok(Book::new(BookId::new(id), title, author))
}

/// Gets all books in insertion order.
pub(crate) async fn get_all_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let query_str = "SELECT id, title, author FROM books ORDER BY id";
    query_books(ex, query_str, query_str, None).await
}

/// Gets all books written by exactly `author`.  The comparison is case-sensitive.
pub(crate) async fn get_books_by_author(ex: &mut Executor, author: &str) -> DbResult<Vec<Book>> {
    query_books(
        ex,
        "SELECT id, title, author FROM books WHERE author = $1 ORDER BY id",
        "SELECT id, title, author FROM books WHERE author = ? ORDER BY id",
        Some(author),
    )
    .await
}

/// Gets all books whose title contains `keyword`, ignoring case.
///
/// SQLite only folds ASCII letters whereas PostgreSQL folds according to the database locale.
pub(crate) async fn get_books_by_title_keyword(
    ex: &mut Executor,
    keyword: &str,
) -> DbResult<Vec<Book>> {
    let pattern = contains_pattern(keyword);
    query_books(
        ex,
        "SELECT id, title, author FROM books WHERE title ILIKE $1 ESCAPE '\\' ORDER BY id",
        "SELECT id, title, author FROM books WHERE title LIKE ? ESCAPE '\\' ORDER BY id",
        Some(&pattern),
    )
    .await
}

/// Gets all books sorted by title with the database's default collation.
pub(crate) async fn get_books_ordered_by_title(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let query_str = "SELECT id, title, author FROM books ORDER BY title, id";
    query_books(ex, query_str, query_str, None).await
}
