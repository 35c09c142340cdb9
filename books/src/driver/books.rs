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

//! Operations on the collection of books.

use crate::db;
use crate::driver::{Driver, DriverResult};
use crate::model::{Author, Book, Title};

impl Driver {
    /// Stores a new book.  Storing the same book twice yields two separate records.
    pub(crate) async fn create_book(self, title: Title, author: Author) -> DriverResult<Book> {
        let book = db::create_book(&mut self.db.ex().await?, title, author).await?;
        Ok(book)
    }

    /// Gets all existing books.
    pub(crate) async fn get_all_books(self) -> DriverResult<Vec<Book>> {
        let books = db::get_all_books(&mut self.db.ex().await?).await?;
        Ok(books)
    }

    /// Gets all books written by exactly `author`.
    pub(crate) async fn get_books_by_author(self, author: &str) -> DriverResult<Vec<Book>> {
        let books = db::get_books_by_author(&mut self.db.ex().await?, author).await?;
        Ok(books)
    }

    /// Gets all books whose title contains `keyword`, ignoring case.
    pub(crate) async fn get_books_by_title_keyword(
        self,
        keyword: &str,
    ) -> DriverResult<Vec<Book>> {
        let books = db::get_books_by_title_keyword(&mut self.db.ex().await?, keyword).await?;
        Ok(books)
    }

    /// Gets all books sorted by title.
    pub(crate) async fn get_books_ordered_by_title(self) -> DriverResult<Vec<Book>> {
        let books = db::get_books_ordered_by_title(&mut self.db.ex().await?).await?;
        Ok(books)
    }
}
