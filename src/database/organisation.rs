use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::organisation::Organisation;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait OrganisationRepository {
    async fn create_organisation(&self, name: &str) -> Result<Organisation, AppError>;
    async fn get_organisation_by_id(&self, id: &Uuid) -> Result<Option<Organisation>, AppError>;
}

#[async_trait::async_trait]
impl OrganisationRepository for PostgresRepository {
    async fn create_organisation(&self, name: &str) -> Result<Organisation, AppError> {
        let organisation = sqlx::query_as::<_, Organisation>(
            r#"
            INSERT INTO organisations (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(organisation)
    }

    async fn get_organisation_by_id(&self, id: &Uuid) -> Result<Option<Organisation>, AppError> {
        let organisation = sqlx::query_as::<_, Organisation>(
            r#"
            SELECT id, name, created_at
            FROM organisations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organisation)
    }
}
