//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{DocumentPersistenceError, DocumentRepository};
use crate::domain::{Document, EntityKind, NewDocument};

use super::diesel_helpers::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DocumentRow, NewDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::documents;

/// Diesel-backed implementation of the `DocumentRepository` port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentPersistenceError {
    map_basic_pool_error(error, DocumentPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentPersistenceError {
    map_basic_diesel_error(
        error,
        DocumentPersistenceError::query,
        DocumentPersistenceError::connection,
    )
}

/// Convert a database row to a domain document.
///
/// The kind column carries a CHECK constraint, so an unparseable value only
/// appears when vocabularies drift; the row defaults to an award attachment
/// rather than failing the listing.
fn row_to_document(row: DocumentRow) -> Document {
    let entity_kind = row.entity_kind.parse().unwrap_or_else(|_| {
        warn!(
            value = row.entity_kind,
            id = row.id,
            "unrecognised entity kind, defaulting"
        );
        EntityKind::Award
    });

    Document {
        id: row.id,
        file_name: row.file_name,
        file_url: row.file_url,
        file_type: row.file_type,
        file_size: row.file_size,
        entity_kind,
        entity_id: row.entity_id,
        uploaded_at: row.uploaded_at,
    }
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: i32,
    ) -> Result<Vec<Document>, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DocumentRow> = documents::table
            .filter(documents::entity_kind.eq(kind.as_str()))
            .filter(documents::entity_id.eq(entity_id))
            .order((documents::uploaded_at.desc(), documents::id.desc()))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn create(&self, new: &NewDocument) -> Result<Document, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDocumentRow {
            file_name: new.file_name(),
            file_url: new.file_url(),
            file_type: new.file_type(),
            file_size: new.file_size(),
            entity_kind: new.entity_kind().as_str(),
            entity_id: new.entity_id(),
        };

        let row: DocumentRow = diesel::insert_into(documents::table)
            .values(&new_row)
            .returning(DocumentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_document(row))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn sample_row() -> DocumentRow {
        DocumentRow {
            id: 11,
            file_name: "po-4411.pdf".into(),
            file_url: "https://files.example/heliix-invoices/po-4411.pdf".into(),
            file_type: "application/pdf".into(),
            file_size: 4096,
            entity_kind: "invoice".into(),
            entity_id: 3,
            uploaded_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_decodes_entity_kind() {
        let document = row_to_document(sample_row());
        assert_eq!(document.entity_kind, EntityKind::Invoice);
        assert_eq!(document.entity_id, 3);
    }

    #[rstest]
    fn unknown_entity_kind_defaults_to_award() {
        let mut row = sample_row();
        row.entity_kind = "contract".into();
        assert_eq!(row_to_document(row).entity_kind, EntityKind::Award);
    }
}
