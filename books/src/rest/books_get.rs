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

//! API to query the collection of books.

use crate::driver::Driver;
use crate::rest::{EmptyBody, RestError};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

/// Ordering of the results that the API supports.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "snake_case")]
pub(crate) enum OrderBy {
    /// Ascending order by title.
    Title,
}

/// Query parameters for this API.  At most one of them can be given.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct BooksQuery {
    /// Exact name of the author whose books to return.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    author: Option<String>,

    /// Keyword that the returned books must contain in their title, ignoring case.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    title_contains: Option<String>,

    /// How to sort the returned books.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    order_by: Option<OrderBy>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<BooksQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let books = match (query.author, query.title_contains, query.order_by) {
        (None, None, None) => driver.get_all_books().await?,
        (Some(author), None, None) => driver.get_books_by_author(&author).await?,
        (None, Some(keyword), None) => driver.get_books_by_title_keyword(&keyword).await?,
        (None, None, Some(OrderBy::Title)) => driver.get_books_ordered_by_title().await?,
        _ => {
            return Err(RestError::InvalidRequest(
                "At most one of author, title_contains and order_by can be given".to_owned(),
            ));
        }
    };

    Ok(Json(books))
}
