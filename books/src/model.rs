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

//! High-level data types.

use derive_getters::Getters;
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value does not satisfy the rules of the model.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct ModelError(pub(crate) String);

/// Result type for this module.
pub(crate) type ModelResult<T> = Result<T, ModelError>;

/// Maximum length of a book title, in characters, as specified in the schema.
pub(crate) const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of an author name, in characters, as specified in the schema.
pub(crate) const MAX_AUTHOR_LENGTH: usize = 100;

/// Validates that `s` has at most `max_length` characters, using `what` to describe the value in
/// the error message.
fn check_length(what: &str, s: &str, max_length: usize) -> ModelResult<()> {
    let length = s.chars().count();
    if length > max_length {
        return Err(ModelError(format!(
            "{} is too long: {} characters exceeds the maximum of {}",
            what, length, max_length
        )));
    }
    Ok(())
}

/// Identifier assigned by the database to every stored book.
#[derive(Clone, Constructor, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct BookId(i64);

impl BookId {
    /// Returns the identifier as the `i64` that the database backends store.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// The title of a book.  Titles are free-form text, possibly empty, but have a maximum length.
#[derive(Clone, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct Title(String);

impl Title {
    /// Creates a new title from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        check_length("Title", &s, MAX_TITLE_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the title.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl TryFrom<String> for Title {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Title::new(s)
    }
}

/// The name of the author of a book.  Names are compared exactly, including case.
#[derive(Clone, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct Author(String);

impl Author {
    /// Creates a new author name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        check_length("Author", &s, MAX_AUTHOR_LENGTH)?;
        Ok(Self(s))
    }

    /// Returns a string view of the author name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Author> for String {
    fn from(value: Author) -> Self {
        value.0
    }
}

impl TryFrom<String> for Author {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        Author::new(s)
    }
}

/// A book stored in the database.
#[derive(Clone, Constructor, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
pub(crate) struct Book {
    /// Identifier assigned by the database.
    id: BookId,

    /// Title of the book.
    title: Title,

    /// Author of the book.
    author: Author,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}
