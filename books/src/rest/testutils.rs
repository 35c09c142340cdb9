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

//! Test utilities for the REST API.

use crate::db;
use crate::db::Db;
use crate::db::sqlite::testutils::setup;
use crate::driver::Driver;
use crate::model::{Author, Book, Title};
use crate::rest::{ErrorResponse, app};
use axum::Router;
use axum::body::Body;
use axum::http::request::Builder;
use axum::http::{Method, Request, StatusCode, header};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceExt;

/// Path to the books collection.
const BOOKS_PATH: &str = "/api/v1/books";

/// State of a running test.
pub(crate) struct TestContext {
    /// Database behind the app, for direct access to it.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Sets up the app against an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let app = app(Driver::new(db.clone()));
        Self { db, app }
    }

    /// Sends `request` to the app and returns the response status and body.
    pub(crate) async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Inserts a book directly into the database.
    pub(crate) async fn create_book(&self, title: &str, author: &str) -> Book {
        db::create_book(
            &mut self.db.ex().await.unwrap(),
            Title::new(title).unwrap(),
            Author::new(author).unwrap(),
        )
        .await
        .unwrap()
    }

    /// Reads all books directly from the database.
    pub(crate) async fn get_all_books(&self) -> Vec<Book> {
        db::get_all_books(&mut self.db.ex().await.unwrap()).await.unwrap()
    }

    /// Releases the database.
    pub(crate) async fn close(self) {
        self.db.close().await;
    }
}

/// Builds a request for the books collection with `query` as the query string.
pub(crate) fn books_request<Q: Serialize>(method: Method, query: &Q) -> Builder {
    let query = serde_urlencoded::to_string(query).unwrap();
    let uri =
        if query.is_empty() { BOOKS_PATH.to_owned() } else { format!("{}?{}", BOOKS_PATH, query) };
    Request::builder().method(method).uri(uri)
}

/// Builds a request for the books collection carrying `json` as its body.
pub(crate) fn json_request(method: Method, json: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(BOOKS_PATH)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(json.to_owned()))
        .unwrap()
}

/// Parses `body` as an error response and returns its message.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body).unwrap().message
}
