use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait SessionRepository {
    /// Sessions of `site_id` with `end_time > now`, ascending by `start_time`.
    async fn list_upcoming_sessions(&self, site_id: &Uuid, now: DateTime<Utc>) -> Result<Vec<Session>, AppError>;
    async fn get_session_by_access_code(&self, access_code: &str) -> Result<Option<Session>, AppError>;
}

#[async_trait::async_trait]
impl SessionRepository for PostgresRepository {
    async fn list_upcoming_sessions(&self, site_id: &Uuid, now: DateTime<Utc>) -> Result<Vec<Session>, AppError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, site_id, title, start_time, end_time, access_code
            FROM sessions
            WHERE site_id = $1
              AND end_time > $2
            ORDER BY start_time ASC
            "#,
        )
        .bind(site_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn get_session_by_access_code(&self, access_code: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, site_id, title, start_time, end_time, access_code
            FROM sessions
            WHERE access_code = $1
            "#,
        )
        .bind(access_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::organisation::OrganisationRepository;
    use crate::test_utils::{insert_session_row, insert_site_row, postgres_repository, sample_session, sample_site};
    use chrono::{Duration, DurationRound};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upcoming_sessions_exclude_ended_and_sort_by_start() {
        let repo = postgres_repository().await;
        let organisation = repo.create_organisation("Acme").await.unwrap();
        let site = insert_site_row(&repo, sample_site(&organisation.id, "Pool", "P1")).await;
        let elsewhere = insert_site_row(&repo, sample_site(&organisation.id, "Gym", "G1")).await;
        let now = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();

        let later = insert_session_row(&repo, sample_session(&site.id, now + Duration::hours(5), now + Duration::hours(6))).await;
        let running = insert_session_row(&repo, sample_session(&site.id, now - Duration::hours(1), now + Duration::hours(1))).await;
        insert_session_row(&repo, sample_session(&site.id, now - Duration::hours(3), now - Duration::hours(2))).await;
        insert_session_row(&repo, sample_session(&site.id, now - Duration::hours(2), now)).await;
        insert_session_row(&repo, sample_session(&elsewhere.id, now + Duration::hours(1), now + Duration::hours(2))).await;

        let sessions = repo.list_upcoming_sessions(&site.id, now).await.unwrap();

        let ids: Vec<Uuid> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![running.id, later.id]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn session_lookup_by_code_is_case_sensitive() {
        let repo = postgres_repository().await;
        let organisation = repo.create_organisation("Acme").await.unwrap();
        let site = insert_site_row(&repo, sample_site(&organisation.id, "Pool", "P1")).await;
        let now = Utc::now();
        let mut draft = sample_session(&site.id, now, now + Duration::hours(1));
        draft.access_code = format!("Swim-{}", Uuid::new_v4().simple());
        let session = insert_session_row(&repo, draft).await;

        let found = repo.get_session_by_access_code(&session.access_code).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(session.id));
        assert!(repo
            .get_session_by_access_code(&session.access_code.to_uppercase())
            .await
            .unwrap()
            .is_none());
    }
}
