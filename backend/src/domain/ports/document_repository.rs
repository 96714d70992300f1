//! Persistence port for uploaded document metadata.

use async_trait::async_trait;

use crate::domain::{Document, EntityKind, NewDocument};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by document repository adapters.
    pub enum DocumentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "document repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "document repository query failed: {message}",
    }
}

/// Persistence port for the documents collection.
///
/// Documents are written once per upload and never mutated. Reads are scoped
/// to the (entity kind, entity id) pair they attach to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Documents attached to one record, newest first.
    async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: i32,
    ) -> Result<Vec<Document>, DocumentPersistenceError>;

    /// Record a completed upload and return the stored row.
    async fn create(&self, new: &NewDocument) -> Result<Document, DocumentPersistenceError>;
}

/// In-memory document store used in fixture mode and by adapter-free tests.
#[derive(Debug, Default)]
pub struct FixtureDocumentRepository {
    state: std::sync::Mutex<FixtureDocumentState>,
}

#[derive(Debug, Default)]
struct FixtureDocumentState {
    rows: Vec<Document>,
    next_id: i32,
}

impl FixtureDocumentRepository {
    /// Empty fixture store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, FixtureDocumentState>, DocumentPersistenceError> {
        self.state
            .lock()
            .map_err(|_| DocumentPersistenceError::query("fixture state poisoned"))
    }
}

#[async_trait]
impl DocumentRepository for FixtureDocumentRepository {
    async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: i32,
    ) -> Result<Vec<Document>, DocumentPersistenceError> {
        let state = self.lock()?;
        let mut rows: Vec<Document> = state
            .rows
            .iter()
            .filter(|row| row.entity_kind == kind && row.entity_id == entity_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, new: &NewDocument) -> Result<Document, DocumentPersistenceError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let document = Document {
            id: state.next_id,
            file_name: new.file_name().to_owned(),
            file_url: new.file_url().to_owned(),
            file_type: new.file_type().to_owned(),
            file_size: new.file_size(),
            entity_kind: new.entity_kind(),
            entity_id: new.entity_id(),
            uploaded_at: chrono::Utc::now(),
        };
        state.rows.push(document.clone());
        Ok(document)
    }
}
