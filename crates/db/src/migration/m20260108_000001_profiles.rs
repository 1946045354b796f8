//! Profiles migration.
//!
//! Creates the minimal profiles table the avatar service writes to. Existing
//! Supabase projects usually have this table already with extra columns; the
//! `IF NOT EXISTS` guards leave it untouched.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PROFILES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS profiles CASCADE;")
            .await?;
        Ok(())
    }
}

const PROFILES_SQL: &str = r"
-- One row per user, keyed by the identity provider's user ID
CREATE TABLE IF NOT EXISTS profiles (
    id UUID PRIMARY KEY,
    avatar_url TEXT,
    updated_at TIMESTAMPTZ
);

-- Clients go through RLS; the avatar service writes as owner/service role
ALTER TABLE profiles ENABLE ROW LEVEL SECURITY;
";
