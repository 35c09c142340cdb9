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

//! Business logic for the service.

use crate::db::{Db, DbError};
use crate::model::ModelError;
use std::sync::Arc;

mod books;
mod seed;
#[cfg(test)]
mod testutils;

/// Errors of the business logic layer.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum DriverError {
    /// The database failed to carry out the operation.
    #[error(transparent)]
    Backend(#[from] DbError),

    /// The caller supplied values that the model rejects.
    #[error(transparent)]
    InvalidInput(#[from] ModelError),
}

/// Result type for this module.
pub(crate) type DriverResult<T> = Result<T, DriverError>;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they run against the database
/// and, if they need more than one statement, start and commit their own transaction.  For this
/// reason, these operations consume the driver in an attempt to minimize the possibility of
/// executing two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        assert_eq!(DriverError::Backend(DbError::Unavailable), DbError::Unavailable.into());
        assert_eq!(
            DriverError::InvalidInput(ModelError("Title is too long".to_owned())),
            ModelError("Title is too long".to_owned()).into()
        );
        assert_eq!("Database unavailable", DriverError::from(DbError::Unavailable).to_string());
    }
}
