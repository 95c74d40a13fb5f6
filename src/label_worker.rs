use crate::Config;
use crate::database::name_entry::NameEntryRepository;
use crate::database::postgres_repository::PostgresRepository;
use crate::db::init_pool;
use crate::error::app_error::AppError;
use crate::service::label::LabelPrinter;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelBatchResult {
    pub printed: usize,
    pub failed: usize,
    /// Printed, but still queued because the printed flag could not be stored.
    pub unmarked: usize,
}

/// Renders and prints the oldest unprinted entries of `session_id`. An entry is
/// marked printed only after both steps succeed; failures stay queued.
pub async fn process_pending_labels<R>(repo: &R, printer: &LabelPrinter, session_id: &Uuid, batch_size: i64) -> Result<LabelBatchResult, AppError>
where
    R: NameEntryRepository + Sync + ?Sized,
{
    let entries = repo.list_unprinted_name_entries(session_id, batch_size).await?;
    let mut result = LabelBatchResult::default();

    for entry in entries {
        let outcome = match printer.write_label(&entry).await {
            Ok(path) => printer.print(&path).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => match repo.mark_name_entry_printed(&entry.id).await {
                Ok(()) => {
                    info!(entry_id = %entry.id, first_name = %entry.first_name, last_name = %entry.last_name, "label printed");
                    result.printed += 1;
                }
                Err(err) => {
                    error!(entry_id = %entry.id, error = ?err, "label printed but could not be marked");
                    result.unmarked += 1;
                }
            },
            Err(err) => {
                warn!(entry_id = %entry.id, error = ?err, "label failed, will retry");
                result.failed += 1;
            }
        }
    }

    Ok(result)
}

/// Polls the configured session until interrupted with Ctrl-C.
pub async fn run_label_worker(config: &Config) -> Result<(), String> {
    let session_id = config
        .labels
        .session_id
        .ok_or_else(|| "labels.session_id must be set (TWIBBLY_LABELS__SESSION_ID)".to_string())?;

    let pool = init_pool(&config.database)
        .await
        .map_err(|err| format!("Failed to initialize database pool: {err}"))?;
    let repo = PostgresRepository::new(pool.clone());
    let printer = LabelPrinter::new(&config.labels);

    info!(
        session_id = %session_id,
        preview_only = printer.is_preview_only(),
        output_dir = %config.labels.output_dir,
        "label worker started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.labels.poll_interval_seconds.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match process_pending_labels(&repo, &printer, &session_id, config.labels.batch_size).await {
                    Ok(result) if result != LabelBatchResult::default() => {
                        info!(printed = result.printed, failed = result.failed, unmarked = result.unmarked, "label batch processed");
                    }
                    Ok(_) => {}
                    Err(err) => error!(error = ?err, "failed to process label batch"),
                }
            }
            _ = &mut shutdown => {
                info!("label worker stopping");
                break;
            }
        }
    }

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;
    use crate::models::name_entry::NameEntryRequest;
    use crate::test_utils::MockRepository;

    fn printer(print_command: Option<&str>) -> LabelPrinter {
        let dir = std::env::temp_dir().join(format!("twibbly-worker-{}", Uuid::new_v4()));
        LabelPrinter::new(&LabelConfig {
            output_dir: dir.display().to_string(),
            print_command: print_command.map(str::to_string),
            ..LabelConfig::default()
        })
    }

    async fn queue(repo: &MockRepository, session_id: &Uuid, first: &str) {
        let request = NameEntryRequest {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
        };
        repo.create_name_entry(session_id, &request).await.unwrap();
    }

    #[tokio::test]
    async fn preview_mode_marks_rendered_entries_printed() {
        let repo = MockRepository::default();
        let session_id = Uuid::new_v4();
        queue(&repo, &session_id, "Ann").await;
        queue(&repo, &session_id, "Bob").await;

        let result = process_pending_labels(&repo, &printer(None), &session_id, 10).await.unwrap();

        assert_eq!(result, LabelBatchResult { printed: 2, ..LabelBatchResult::default() });
        assert!(repo.name_entries().iter().all(|entry| entry.printed));
    }

    #[tokio::test]
    async fn failed_print_leaves_entry_queued() {
        let repo = MockRepository::default();
        let session_id = Uuid::new_v4();
        queue(&repo, &session_id, "Ann").await;

        let result = process_pending_labels(&repo, &printer(Some("twibbly-no-such-printer-binary")), &session_id, 10)
            .await
            .unwrap();

        assert_eq!(result, LabelBatchResult { failed: 1, ..LabelBatchResult::default() });
        assert!(repo.name_entries().iter().all(|entry| !entry.printed));
    }

    #[tokio::test]
    async fn mark_failure_does_not_stop_the_batch() {
        let repo = MockRepository::default();
        let session_id = Uuid::new_v4();
        queue(&repo, &session_id, "Ann").await;
        queue(&repo, &session_id, "Bob").await;
        repo.fail_name_entry_marks();

        let result = process_pending_labels(&repo, &printer(None), &session_id, 10).await.unwrap();

        assert_eq!(result, LabelBatchResult { unmarked: 2, ..LabelBatchResult::default() });
        assert!(repo.name_entries().iter().all(|entry| !entry.printed));
    }

    #[tokio::test]
    async fn other_sessions_are_ignored() {
        let repo = MockRepository::default();
        let session_id = Uuid::new_v4();
        queue(&repo, &Uuid::new_v4(), "Eve").await;

        let result = process_pending_labels(&repo, &printer(None), &session_id, 10).await.unwrap();

        assert_eq!(result, LabelBatchResult::default());
    }
}
