use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::site::Site;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait SiteRepository {
    async fn list_sites_for_organisation(&self, organisation_id: &Uuid) -> Result<Vec<Site>, AppError>;
    /// Exact, case-sensitive match on both id and access code.
    async fn find_site_by_access_code(&self, site_id: &Uuid, access_code: &str) -> Result<Option<Site>, AppError>;
}

#[async_trait::async_trait]
impl SiteRepository for PostgresRepository {
    async fn list_sites_for_organisation(&self, organisation_id: &Uuid) -> Result<Vec<Site>, AppError> {
        let sites = sqlx::query_as::<_, Site>(
            r#"
            SELECT id, name, organisation_id, access_code
            FROM sites
            WHERE organisation_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(organisation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sites)
    }

    async fn find_site_by_access_code(&self, site_id: &Uuid, access_code: &str) -> Result<Option<Site>, AppError> {
        let site = sqlx::query_as::<_, Site>(
            r#"
            SELECT id, name, organisation_id, access_code
            FROM sites
            WHERE id = $1
              AND access_code = $2
            "#,
        )
        .bind(site_id)
        .bind(access_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(site)
    }
}
