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

//! API to add a book to the collection.

use crate::driver::Driver;
use crate::model::{Author, Title};
use crate::rest::RestError;
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;

/// Message sent to the server to create a book.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct BookRequest {
    /// Title of the new book.
    pub(crate) title: String,

    /// Author of the new book.
    pub(crate) author: String,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<BookRequest>,
) -> Result<impl IntoResponse, RestError> {
    let title = Title::new(request.title)?;
    let author = Author::new(request.author)?;

    let book = driver.create_book(title, author).await?;

    Ok((http::StatusCode::CREATED, Json(book)))
}
