//! Persistence port for award records.

use async_trait::async_trait;

use crate::domain::{Award, AwardPatch, NewAward};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by award repository adapters.
    pub enum AwardPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "award repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "award repository query failed: {message}",
    }
}

/// Persistence port for the awards collection.
///
/// Every operation is a single round trip to the record store. Updates are
/// blind partial writes; the store stamps `updated_at` inside the same
/// statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AwardRepository: Send + Sync {
    /// All awards, newest first.
    async fn list(&self) -> Result<Vec<Award>, AwardPersistenceError>;

    /// Insert a new award and return the fully populated row.
    async fn create(&self, new: &NewAward) -> Result<Award, AwardPersistenceError>;

    /// Apply a partial update by identifier; `None` when no row matches.
    async fn update(
        &self,
        id: i32,
        patch: &AwardPatch,
    ) -> Result<Option<Award>, AwardPersistenceError>;

    /// Whether a row with this identifier exists.
    async fn exists(&self, id: i32) -> Result<bool, AwardPersistenceError>;
}

/// In-memory award store used in fixture mode and by adapter-free tests.
#[derive(Debug, Default)]
pub struct FixtureAwardRepository {
    state: std::sync::Mutex<FixtureAwardState>,
}

#[derive(Debug, Default)]
struct FixtureAwardState {
    rows: Vec<Award>,
    next_id: i32,
}

impl FixtureAwardRepository {
    /// Empty fixture store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, FixtureAwardState>, AwardPersistenceError> {
        self.state
            .lock()
            .map_err(|_| AwardPersistenceError::query("fixture state poisoned"))
    }
}

#[async_trait]
impl AwardRepository for FixtureAwardRepository {
    async fn list(&self) -> Result<Vec<Award>, AwardPersistenceError> {
        let state = self.lock()?;
        let mut rows = state.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, new: &NewAward) -> Result<Award, AwardPersistenceError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let now = chrono::Utc::now();
        let award = Award {
            id: state.next_id,
            name: new.name().to_owned(),
            description: new.description().map(str::to_owned),
            status: new.status(),
            quantity: new.quantity(),
            image_url: new.image_url().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        state.rows.push(award.clone());
        Ok(award)
    }

    async fn update(
        &self,
        id: i32,
        patch: &AwardPatch,
    ) -> Result<Option<Award>, AwardPersistenceError> {
        let mut state = self.lock()?;
        let Some(row) = state.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(description) = &patch.description {
            row.description = description.clone();
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(quantity) = patch.quantity {
            row.quantity = quantity;
        }
        if let Some(image_url) = &patch.image_url {
            row.image_url = image_url.clone();
        }
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }

    async fn exists(&self, id: i32) -> Result<bool, AwardPersistenceError> {
        let state = self.lock()?;
        Ok(state.rows.iter().any(|row| row.id == id))
    }
}
