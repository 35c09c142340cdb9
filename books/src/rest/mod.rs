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

//! REST API of the book store.
//!
//! Every API lives in its own `<entity>_<method>.rs` file whose tests obtain the method and path
//! under test from a local `route` function.

use crate::driver::{Driver, DriverError};
use crate::model::ModelError;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

mod books_get;
mod books_post;
#[cfg(test)]
mod testutils;

/// Errors returned to API clients.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum RestError {
    /// The server failed to handle a valid request.
    #[error("{0}")]
    InternalError(String),

    /// The request is malformed or carries invalid values.
    #[error("{0}")]
    InvalidRequest(String),

    /// The request carries a body but the API does not take one.
    #[error("Request body must be empty")]
    PayloadNotEmpty,
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::Backend(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InvalidRequest(e.to_string()),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

/// Body of every error response.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ErrorResponse {
    /// Description of the error.
    pub(crate) message: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = match self {
            RestError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RestError::PayloadNotEmpty => StatusCode::PAYLOAD_TOO_LARGE,
        };
        (status, Json(ErrorResponse { message: self.to_string() })).into_response()
    }
}

/// Extractor for APIs that take no request body.  Rejects requests that carry one.
pub(crate) struct EmptyBody;

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestError::InvalidRequest(e.body_text()))?;
        if body.is_empty() { Ok(EmptyBody) } else { Err(RestError::PayloadNotEmpty) }
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/api/v1/books", get(books_get::handler).post(books_post::handler))
        .with_state(driver)
}
