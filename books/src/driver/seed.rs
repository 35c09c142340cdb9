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

//! Population of the database with sample data.

use crate::db;
use crate::driver::{Driver, DriverResult};
use crate::model::{Author, Book, Title};
use log::info;

/// Title and author pairs of the books inserted by `Driver::seed_books`.
///
/// These use the standard spellings `Fahrenheit 451` and `Ray Bradbury`, so the seeded records can
/// be found with `get_books_by_author("Ray Bradbury")`.
pub(crate) const SAMPLE_BOOKS: &[(&str, &str)] = &[
    ("1984", "George Orwell"),
    ("Brave New World", "Aldous Huxley"),
    ("Fahrenheit 451", "Ray Bradbury"),
];

impl Driver {
    /// Inserts the sample books into the database and returns them.
    ///
    /// All books are inserted in a single transaction.  Nothing checks if the books already
    /// exist, so seeding twice stores every sample book twice.
    pub(crate) async fn seed_books(self) -> DriverResult<Vec<Book>> {
        let mut tx = self.db.begin().await?;
        let mut books = Vec::with_capacity(SAMPLE_BOOKS.len());
        for (title, author) in SAMPLE_BOOKS {
            let book = db::create_book(tx.ex(), Title::new(*title)?, Author::new(*author)?).await?;
            books.push(book);
        }
        tx.commit().await?;

        info!("Inserted {} sample books", books.len());
        Ok(books)
    }
}
