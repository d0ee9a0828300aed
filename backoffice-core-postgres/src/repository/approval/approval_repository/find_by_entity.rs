use async_trait::async_trait;
use backoffice_core_api::domain::ApprovalEntityType;
use backoffice_core_db::models::approval::ApprovalModel;
use backoffice_core_db::repository::approval::FindApprovalByEntity;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    pub(super) async fn find_by_entity_and_user_impl(
        repo: &ApprovalRepositoryImpl,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"
            SELECT * FROM approval
            WHERE entity_type = $1 AND entity_id = $2 AND user_id = $3
            ORDER BY created_at DESC, updated_at DESC, id DESC
            LIMIT 1
        "#;
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(entity_type)
                .bind(entity_id)
                .bind(user_id)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.as_ref().map(ApprovalModel::try_from_row).transpose()
    }

    pub(super) async fn find_by_entity_impl(
        repo: &ApprovalRepositoryImpl,
        entity_types: &[ApprovalEntityType],
        entity_id: Uuid,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        if entity_types.is_empty() {
            return Ok(Vec::new());
        }

        let type_names: Vec<&str> = entity_types.iter().map(|t| t.as_str()).collect();
        let query = r#"
            SELECT * FROM approval
            WHERE entity_type::text = ANY($1) AND entity_id = $2
            ORDER BY created_at DESC, updated_at DESC, id DESC
        "#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(type_names)
                .bind(entity_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(ApprovalModel::try_from_row).collect()
    }
}

#[async_trait]
impl FindApprovalByEntity<Postgres> for ApprovalRepositoryImpl {
    async fn find_by_entity_and_user(
        &self,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_entity_and_user_impl(self, entity_type, entity_id, user_id).await
    }

    async fn find_by_entity(
        &self,
        entity_types: &[ApprovalEntityType],
        entity_id: Uuid,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_entity_impl(self, entity_types, entity_id).await
    }
}
