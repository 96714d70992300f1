//! PostgreSQL-backed `AwardRepository` implementation using Diesel ORM.
//!
//! A thin adapter: translates between Diesel row structs and domain award
//! types, delegating ordering and timestamp maintenance to SQL. No
//! operational rules live here.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AwardPersistenceError, AwardRepository};
use crate::domain::{Award, AwardPatch, NewAward};

use super::diesel_helpers::{decode_status, map_basic_diesel_error, map_basic_pool_error};
use super::models::{AwardChangeset, AwardRow, NewAwardRow};
use super::pool::{DbPool, PoolError};
use super::schema::awards;

/// Diesel-backed implementation of the `AwardRepository` port.
#[derive(Clone)]
pub struct DieselAwardRepository {
    pool: DbPool,
}

impl DieselAwardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AwardPersistenceError {
    map_basic_pool_error(error, AwardPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AwardPersistenceError {
    map_basic_diesel_error(
        error,
        AwardPersistenceError::query,
        AwardPersistenceError::connection,
    )
}

/// Convert a database row to a domain award.
fn row_to_award(row: AwardRow) -> Award {
    Award {
        id: row.id,
        name: row.name,
        description: row.description,
        status: decode_status(&row.status, "awards", row.id),
        quantity: row.quantity,
        image_url: row.image_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn patch_to_changeset(patch: &AwardPatch) -> AwardChangeset<'_> {
    AwardChangeset {
        name: patch.name.as_deref(),
        description: patch.description.as_ref().map(Option::as_deref),
        status: patch.status.map(|status| status.as_str()),
        quantity: patch.quantity,
        image_url: patch.image_url.as_ref().map(Option::as_deref),
    }
}

#[async_trait]
impl AwardRepository for DieselAwardRepository {
    async fn list(&self) -> Result<Vec<Award>, AwardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AwardRow> = awards::table
            .order((awards::created_at.desc(), awards::id.desc()))
            .select(AwardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_award).collect())
    }

    async fn create(&self, new: &NewAward) -> Result<Award, AwardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAwardRow {
            name: new.name(),
            description: new.description(),
            status: new.status().as_str(),
            quantity: new.quantity(),
            image_url: new.image_url(),
        };

        let row: AwardRow = diesel::insert_into(awards::table)
            .values(&new_row)
            .returning(AwardRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_award(row))
    }

    async fn update(
        &self,
        id: i32,
        patch: &AwardPatch,
    ) -> Result<Option<Award>, AwardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // updated_at is stamped in the same statement as the field changes.
        let row: Option<AwardRow> = diesel::update(awards::table.filter(awards::id.eq(id)))
            .set((
                patch_to_changeset(patch),
                awards::updated_at.eq(diesel::dsl::now),
            ))
            .returning(AwardRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_award))
    }

    async fn exists(&self, id: i32) -> Result<bool, AwardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            awards::table.filter(awards::id.eq(id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
