use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::name_entry::{NameEntry, NameEntryRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait NameEntryRepository {
    async fn create_name_entry(&self, session_id: &Uuid, request: &NameEntryRequest) -> Result<NameEntry, AppError>;
    /// Oldest unprinted entries of a session first.
    async fn list_unprinted_name_entries(&self, session_id: &Uuid, limit: i64) -> Result<Vec<NameEntry>, AppError>;
    async fn mark_name_entry_printed(&self, id: &Uuid) -> Result<(), AppError>;
}

#[async_trait::async_trait]
impl NameEntryRepository for PostgresRepository {
    async fn create_name_entry(&self, session_id: &Uuid, request: &NameEntryRequest) -> Result<NameEntry, AppError> {
        let entry = sqlx::query_as::<_, NameEntry>(
            r#"
            INSERT INTO name_entries (session_id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, session_id, first_name, last_name, printed, created_at
            "#,
        )
        .bind(session_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_unprinted_name_entries(&self, session_id: &Uuid, limit: i64) -> Result<Vec<NameEntry>, AppError> {
        let entries = sqlx::query_as::<_, NameEntry>(
            r#"
            SELECT id, session_id, first_name, last_name, printed, created_at
            FROM name_entries
            WHERE session_id = $1
              AND printed = FALSE
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn mark_name_entry_printed(&self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE name_entries SET printed = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
