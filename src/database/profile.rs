use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::profile::{Identity, Profile};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait ProfileRepository {
    /// Insert the profile for `identity` unless one already exists, then return
    /// the stored row. Existing rows are left untouched.
    async fn ensure_profile(&self, identity: &Identity) -> Result<Profile, AppError>;
    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;
    async fn set_profile_organisation(&self, profile_id: &Uuid, organisation_id: &Uuid) -> Result<Profile, AppError>;
}

#[async_trait::async_trait]
impl ProfileRepository for PostgresRepository {
    async fn ensure_profile(&self, identity: &Identity) -> Result<Profile, AppError> {
        sqlx::query(
            r#"
            INSERT INTO app_users (id, email, role, organisation_id, created_at)
            VALUES ($1, $2, 'org_admin', NULL, now())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(identity.id)
        .bind(&identity.email)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::db("Failed to upsert profile", e))?;

        self.get_profile_by_id(&identity.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, role, organisation_id, created_at
            FROM app_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn set_profile_organisation(&self, profile_id: &Uuid, organisation_id: &Uuid) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE app_users
            SET organisation_id = $1
            WHERE id = $2
            RETURNING id, email, role, organisation_id, created_at
            "#,
        )
        .bind(organisation_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
