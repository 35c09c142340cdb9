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

//! Book record store with a handful of canned queries, exposed via a command line and a REST API.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("At least one of the postgres and sqlite features must be enabled");

use log::info;
use std::error::Error;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
pub use config::DbOptions;
pub(crate) mod db;
#[cfg(feature = "postgres")]
pub use db::postgres::PostgresOptions;
#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteOptions;
use db::Db;
mod driver;
use driver::Driver;
pub(crate) mod model;
use model::{Author, Book, Title};
mod rest;

/// Prints one line per book in `books` into `out`.
fn write_books(out: &mut dyn Write, books: &[Book]) -> Result<(), Box<dyn Error>> {
    for book in books {
        writeln!(out, "{}", book)?;
    }
    Ok(())
}

/// An open book store.  Must be closed with `close` once done.
pub struct Store {
    /// Database holding the books.
    db: Arc<dyn Db + Send + Sync>,
}

impl Store {
    /// Opens the database described by `opts` and creates the `books` table if needed.
    pub async fn connect(opts: DbOptions) -> Result<Self, Box<dyn Error>> {
        let db: Arc<dyn Db + Send + Sync> = match opts {
            #[cfg(feature = "postgres")]
            DbOptions::Postgres(opts) => Arc::from(db::postgres::PostgresDb::connect(&opts).await?),

            #[cfg(feature = "sqlite")]
            DbOptions::Sqlite(opts) => Arc::from(db::sqlite::SqliteDb::connect(&opts).await?),
        };

        let result = match db.ex().await {
            Ok(mut ex) => db::init_schema(&mut ex).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            db.close().await;
            return Err(e.into());
        }
        info!("Database schema is ready");

        Ok(Self { db })
    }

    /// Returns a driver for a single operation.
    fn driver(&self) -> Driver {
        Driver::new(self.db.clone())
    }

    /// Inserts the sample books and reports success into `out`.
    pub async fn seed(&self, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        self.driver().seed_books().await?;
        writeln!(out, "Sample books inserted!")?;
        Ok(())
    }

    /// Adds a single book and prints the stored record into `out`.
    pub async fn add(
        &self,
        title: String,
        author: String,
        out: &mut dyn Write,
    ) -> Result<(), Box<dyn Error>> {
        let title = Title::new(title)?;
        let author = Author::new(author)?;
        let book = self.driver().create_book(title, author).await?;
        writeln!(out, "Added book {}: {}", book.id().as_i64(), book)?;
        Ok(())
    }

    /// Runs the four canned queries and prints their results into `out`.
    pub async fn demo(
        &self,
        author: &str,
        keyword: &str,
        out: &mut dyn Write,
    ) -> Result<(), Box<dyn Error>> {
        writeln!(out, "All books:")?;
        write_books(out, &self.driver().get_all_books().await?)?;

        writeln!(out)?;
        writeln!(out, "Books by {}:", author)?;
        write_books(out, &self.driver().get_books_by_author(author).await?)?;

        writeln!(out)?;
        writeln!(out, "Books whose title contains '{}':", keyword)?;
        write_books(out, &self.driver().get_books_by_title_keyword(keyword).await?)?;

        writeln!(out)?;
        writeln!(out, "Books ordered by title:")?;
        write_books(out, &self.driver().get_books_ordered_by_title().await?)?;

        Ok(())
    }

    /// Serves the REST API on `bind_addr` until the server fails.
    pub async fn serve(&self, bind_addr: impl Into<SocketAddr>) -> Result<(), Box<dyn Error>> {
        let app = rest::app(self.driver());

        let bind_addr = bind_addr.into();
        let listener = TcpListener::bind(bind_addr).await?;
        info!("Listening on {}", bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Closes the database.
    pub async fn close(self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opens a store over an empty in-memory database.
    async fn setup() -> Store {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Store { db }
    }

    /// Reads all books directly from the database.
    async fn all_books(store: &Store) -> Vec<Book> {
        db::get_all_books(&mut store.db.ex().await.unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_initializes_schema() {
        let opts = SqliteOptions { path: ":memory:".to_owned(), max_connections: Some(1) };
        let store = Store::connect(DbOptions::Sqlite(opts)).await.unwrap();

        assert!(all_books(&store).await.is_empty());

        store.close().await;
    }

    #[tokio::test]
    async fn test_seed() {
        let store = setup().await;

        let mut out = vec![];
        store.seed(&mut out).await.unwrap();
        assert_eq!("Sample books inserted!\n", String::from_utf8(out).unwrap());
        assert_eq!(3, all_books(&store).await.len());

        store.close().await;
    }

    #[tokio::test]
    async fn test_add() {
        let store = setup().await;

        let mut out = vec![];
        store.add("1984".to_owned(), "George Orwell".to_owned(), &mut out).await.unwrap();
        assert_eq!("Added book 1: 1984 by George Orwell\n", String::from_utf8(out).unwrap());

        store.close().await;
    }

    #[tokio::test]
    async fn test_add_title_too_long() {
        let store = setup().await;

        let mut out = vec![];
        let err =
            store.add("x".repeat(201), "George Orwell".to_owned(), &mut out).await.unwrap_err();
        assert!(err.to_string().starts_with("Title is too long"), "{}", err);
        assert!(out.is_empty());
        assert!(all_books(&store).await.is_empty());

        store.close().await;
    }

    #[tokio::test]
    async fn test_demo_after_seed() {
        let store = setup().await;

        store.seed(&mut vec![]).await.unwrap();

        let mut out = vec![];
        store.demo("George Orwell", "new", &mut out).await.unwrap();
        let exp_out = "All books:
1984 by George Orwell
Brave New World by Aldous Huxley
Fahrenheit 451 by Ray Bradbury

Books by George Orwell:
1984 by George Orwell

Books whose title contains 'new':
Brave New World by Aldous Huxley

Books ordered by title:
1984 by George Orwell
Brave New World by Aldous Huxley
Fahrenheit 451 by Ray Bradbury
";
        assert_eq!(exp_out, String::from_utf8(out).unwrap());

        store.close().await;
    }

    #[tokio::test]
    async fn test_demo_empty() {
        let store = setup().await;

        let mut out = vec![];
        store.demo("Nobody", "nothing", &mut out).await.unwrap();
        let exp_out = "All books:

Books by Nobody:

Books whose title contains 'nothing':

Books ordered by title:
";
        assert_eq!(exp_out, String::from_utf8(out).unwrap());

        store.close().await;
    }
}
