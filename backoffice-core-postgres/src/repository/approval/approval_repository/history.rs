use async_trait::async_trait;
use backoffice_core_db::models::approval::ApprovalHistoryModel;
use backoffice_core_db::repository::approval::ApprovalHistoryRepository;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    pub(super) async fn append_history_impl(
        repo: &ApprovalRepositoryImpl,
        entry: ApprovalHistoryModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        sqlx::query(
            r#"
            INSERT INTO approval_history (id, approval_id, entity_type, entity_id, status, note, actor_id, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.approval_id)
        .bind(entry.entity_type)
        .bind(entry.entity_id)
        .bind(entry.status)
        .bind(entry.note.as_deref())
        .bind(entry.actor_id)
        .bind(entry.recorded_at)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub(super) async fn load_history_impl(
        repo: &ApprovalRepositoryImpl,
        approval_id: Uuid,
    ) -> Result<Vec<ApprovalHistoryModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"
            SELECT * FROM approval_history
            WHERE approval_id = $1
            ORDER BY recorded_at ASC, id ASC
        "#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(approval_id).fetch_all(&mut **transaction).await?
        };

        rows.iter().map(ApprovalHistoryModel::try_from_row).collect()
    }
}

#[async_trait]
impl ApprovalHistoryRepository<Postgres> for ApprovalRepositoryImpl {
    async fn append_history(
        &self,
        entry: ApprovalHistoryModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::append_history_impl(self, entry).await
    }

    async fn load_history(
        &self,
        approval_id: Uuid,
    ) -> Result<Vec<ApprovalHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, approval_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::create_test_approval;
    use crate::test_helper::setup_test_context;
    use backoffice_core_api::domain::{ApprovalEntityType, ApprovalStatus};
    use backoffice_core_db::models::approval::ApprovalHistoryModel;
    use backoffice_core_db::repository::approval::ApprovalHistoryRepository;
    use chrono::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_history_oldest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let approval_repo = &ctx.approval_repos().approval_repository;

        let mut approval = create_test_approval(ApprovalEntityType::Event, Uuid::new_v4());
        let reviewer = Uuid::new_v4();

        let mut submitted = ApprovalHistoryModel::record(&approval, approval.user_id);
        submitted.recorded_at -= Duration::minutes(5);
        approval.status = ApprovalStatus::Rejected;
        let rejected = ApprovalHistoryModel::record(&approval, reviewer);

        approval_repo.append_history(rejected.clone()).await?;
        approval_repo.append_history(submitted.clone()).await?;

        let history = approval_repo.load_history(approval.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, ApprovalStatus::Pending);
        assert_eq!(history[1].status, ApprovalStatus::Rejected);
        assert_eq!(history[1].actor_id, reviewer);

        Ok(())
    }
}
