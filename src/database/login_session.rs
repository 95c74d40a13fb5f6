use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::login_session::LoginSession;
use crate::models::profile::Profile;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait LoginSessionRepository {
    async fn create_login_session(
        &self,
        user_id: &Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<LoginSession, AppError>;
    async fn get_active_session_profile(&self, session_id: &Uuid, user_id: &Uuid) -> Result<Option<Profile>, AppError>;
    /// Removes the session and returns the deleted row, if there was one.
    async fn delete_login_session(&self, session_id: &Uuid) -> Result<Option<LoginSession>, AppError>;
    async fn delete_login_session_if_expired(&self, session_id: &Uuid) -> Result<(), AppError>;
}

#[async_trait::async_trait]
impl LoginSessionRepository for PostgresRepository {
    async fn create_login_session(
        &self,
        user_id: &Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<LoginSession, AppError> {
        sqlx::query("DELETE FROM login_session WHERE user_id = $1 AND expires_at <= now()")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let session = sqlx::query_as::<_, LoginSession>(
            r#"
            INSERT INTO login_session (user_id, access_token, expires_at, user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, access_token, created_at, expires_at, user_agent
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(expires_at)
        .bind(user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    async fn get_active_session_profile(&self, session_id: &Uuid, user_id: &Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT u.id, u.email, u.role, u.organisation_id, u.created_at
            FROM login_session s
            JOIN app_users u ON u.id = s.user_id
            WHERE s.id = $1
              AND s.user_id = $2
              AND s.expires_at > now()
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn delete_login_session(&self, session_id: &Uuid) -> Result<Option<LoginSession>, AppError> {
        let session = sqlx::query_as::<_, LoginSession>(
            r#"
            DELETE FROM login_session
            WHERE id = $1
            RETURNING id, user_id, access_token, created_at, expires_at, user_agent
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn delete_login_session_if_expired(&self, session_id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM login_session WHERE id = $1 AND expires_at <= now()")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
