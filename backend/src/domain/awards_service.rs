//! Awards record service.
//!
//! Implements the data-access contract for the awards collection: validate
//! before any store call, one store round trip per operation, and map port
//! failures into the domain error taxonomy.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{AwardPersistenceError, AwardRepository};
use crate::domain::{Award, AwardPatch, Error, NewAward};

/// Service wrapping an [`AwardRepository`] with the mutation contract.
pub struct AwardsService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for AwardsService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: ?Sized> AwardsService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_persistence_error(error: AwardPersistenceError) -> Error {
    match error {
        AwardPersistenceError::Connection { message } => {
            Error::unavailable(format!("award store unavailable: {message}"))
        }
        AwardPersistenceError::Query { message } => {
            Error::internal(format!("award store error: {message}"))
        }
    }
}

impl<R> AwardsService<R>
where
    R: AwardRepository + ?Sized,
{
    /// All awards, newest first.
    pub async fn list(&self) -> Result<Vec<Award>, Error> {
        self.repo.list().await.map_err(map_persistence_error)
    }

    /// Insert a validated award and return the stored row.
    pub async fn create(&self, new: NewAward) -> Result<Award, Error> {
        self.repo.create(&new).await.map_err(map_persistence_error)
    }

    /// Apply a partial update by identifier.
    ///
    /// Empty patches are rejected rather than issuing a no-op UPDATE; a
    /// missing row is a [`crate::domain::ErrorCode::NotFound`] failure.
    pub async fn update(&self, id: i32, patch: AwardPatch) -> Result<Award, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request(
                "update must include at least one field",
            )
            .with_details(json!({ "code": "empty_patch" })));
        }
        self.repo
            .update(id, &patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no award with id {id}")))
    }

    /// Whether an award row exists; used for referential probes.
    pub async fn exists(&self, id: i32) -> Result<bool, Error> {
        self.repo.exists(id).await.map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "awards_service_tests.rs"]
mod tests;
