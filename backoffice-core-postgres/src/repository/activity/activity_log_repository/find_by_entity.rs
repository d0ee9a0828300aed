use async_trait::async_trait;
use backoffice_core_api::domain::AuditEntityType;
use backoffice_core_db::models::activity::ActivityLogModel;
use backoffice_core_db::repository::activity_log::FindActivityByEntity;
use backoffice_core_db::repository::pagination::{Page, PageRequest};
use crate::utils::{to_sql_bigint, TryFromRow};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ActivityLogRepositoryImpl;

impl ActivityLogRepositoryImpl {
    pub(super) async fn find_by_entity_impl(
        repo: &ActivityLogRepositoryImpl,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActivityLogModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM activity_log WHERE entity_type = $1 AND entity_id = $2"#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_one(&mut **transaction)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM activity_log
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(to_sql_bigint(page.limit))
        .bind(to_sql_bigint(page.offset))
        .fetch_all(&mut **transaction)
        .await?;

        let items = rows
            .iter()
            .map(ActivityLogModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, usize::try_from(total)?, page.limit, page.offset))
    }
}

#[async_trait]
impl FindActivityByEntity<Postgres> for ActivityLogRepositoryImpl {
    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActivityLogModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_entity_impl(self, entity_type, entity_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::create_test_activity_log;
    use crate::test_helper::setup_test_context;
    use backoffice_core_api::domain::AuditEntityType;
    use backoffice_core_db::repository::activity_log::FindActivityByEntity;
    use backoffice_core_db::repository::create_batch::CreateBatch;
    use backoffice_core_db::repository::pagination::PageRequest;
    use chrono::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_by_entity_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.activity_repos().activity_log_repository;

        let approval_id = Uuid::new_v4();
        let mut older = create_test_activity_log(AuditEntityType::Approval, approval_id);
        older.created_at -= Duration::minutes(10);
        let newer = create_test_activity_log(AuditEntityType::Approval, approval_id);
        let other = create_test_activity_log(AuditEntityType::Finance, approval_id);
        activity_repo
            .create_batch(vec![older.clone(), newer.clone(), other])
            .await?;

        let page = activity_repo
            .find_by_entity(AuditEntityType::Approval, approval_id, PageRequest::default())
            .await?;

        assert_eq!(page.total, 2);
        assert_eq!(page.items, vec![newer, older]);

        Ok(())
    }
}
