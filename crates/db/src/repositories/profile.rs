//! Profile repository for database operations.

use async_trait::async_trait;
use avatar_core::profile::{ProfileError, ProfileRecord, ProfileRepository};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::profiles;

/// Profile repository writing straight to Postgres.
///
/// The connection is expected to belong to the table owner (or another role
/// that row-level security does not apply to).
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    db: DatabaseConnection,
}

impl PgProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or updates the avatar columns of a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert_avatar(
        &self,
        id: Uuid,
        avatar_url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let profile = profiles::ActiveModel {
            id: Set(id),
            avatar_url: Set(Some(avatar_url.to_string())),
            updated_at: Set(Some(updated_at.into())),
        };

        profiles::Entity::insert(profile)
            .on_conflict(
                OnConflict::column(profiles::Column::Id)
                    .update_columns([profiles::Column::AvatarUrl, profiles::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// Finds a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find_by_id(id).one(&self.db).await
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn upsert(&self, profile: &ProfileRecord) -> Result<(), ProfileError> {
        let id = Uuid::parse_str(&profile.id)
            .map_err(|_| ProfileError::InvalidUserId(profile.id.clone()))?;

        self.upsert_avatar(id, &profile.avatar_url, profile.updated_at)
            .await
            .map_err(|e| ProfileError::upstream(e.to_string()))
    }
}
