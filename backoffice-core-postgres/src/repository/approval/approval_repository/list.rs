use async_trait::async_trait;
use backoffice_core_api::domain::ApprovalFilter;
use backoffice_core_db::models::approval::ApprovalModel;
use backoffice_core_db::repository::approval::ListApprovals;
use backoffice_core_db::repository::pagination::{Page, PageRequest};
use crate::utils::{to_sql_bigint, TryFromRow};
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    pub(super) async fn list_impl(
        repo: &ApprovalRepositoryImpl,
        filter: &ApprovalFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        // NULL parameters disable the corresponding filter
        let status = filter.status.map(|s| s.to_string());
        let entity_type = filter.entity_type.map(|t| t.as_str());

        let count_query = r#"
            SELECT COUNT(*) FROM approval
            WHERE ($1::text IS NULL OR status::text = $1)
              AND ($2::text IS NULL OR entity_type::text = $2)
        "#;
        let list_query = r#"
            SELECT * FROM approval
            WHERE ($1::text IS NULL OR status::text = $1)
              AND ($2::text IS NULL OR entity_type::text = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
        "#;

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(count_query)
            .bind(status.as_deref())
            .bind(entity_type)
            .fetch_one(&mut **transaction)
            .await?;

        let rows = sqlx::query(list_query)
            .bind(status.as_deref())
            .bind(entity_type)
            .bind(to_sql_bigint(page.limit))
            .bind(to_sql_bigint(page.offset))
            .fetch_all(&mut **transaction)
            .await?;

        let items = rows
            .iter()
            .map(ApprovalModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, usize::try_from(total)?, page.limit, page.offset))
    }
}

#[async_trait]
impl ListApprovals<Postgres> for ApprovalRepositoryImpl {
    async fn list(
        &self,
        filter: &ApprovalFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        Self::list_impl(self, filter, page).await
    }
}
