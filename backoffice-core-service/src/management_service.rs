use backoffice_core_api::domain::{ActivityType, AssetSlot, AuditEntityType};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::ActivityLogger;
use backoffice_core_db::models::entity::ManagementModel;
use backoffice_core_db::models::reviewable::AssetOwner;
use backoffice_core_db::repository::{load_one, ManagementStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::activity::{activity_entry, record_activity, snapshot};
use crate::asset::AssetReconciler;
use crate::config::DeletionPolicy;
use crate::repositories::Db;

/// Management periods with their decree and structure files.
///
/// Not reviewable: saves only run the asset reconciliation around the
/// entity write.
pub struct ManagementService {
    store: Arc<dyn ManagementStore<Db>>,
    assets: Arc<AssetReconciler>,
    activity: Arc<dyn ActivityLogger>,
    deletion: DeletionPolicy,
}

impl ManagementService {
    pub fn new(
        store: Arc<dyn ManagementStore<Db>>,
        assets: Arc<AssetReconciler>,
        activity: Arc<dyn ActivityLogger>,
        deletion: DeletionPolicy,
    ) -> Self {
        Self {
            store,
            assets,
            activity,
            deletion,
        }
    }

    pub async fn find(&self, id: Uuid) -> ApiResult<Option<ManagementModel>> {
        Ok(load_one::<Db, ManagementModel, _>(self.store.as_ref(), id).await?)
    }

    pub async fn create(
        &self,
        mut management: ManagementModel,
        assets: Vec<AssetSlot>,
        actor_id: Uuid,
    ) -> ApiResult<ManagementModel> {
        validate_period(&management)?;

        let name = management.name.to_string();
        let current = management.clone();
        let reconciled = self
            .assets
            .reconcile_into(&assets, &current, &name, &mut management)
            .await?;
        management.updated_at = Utc::now();

        let created = match self.store.create_batch(vec![management]).await {
            Ok(mut created) => created
                .pop()
                .ok_or_else(|| ApiError::InternalError("Management insert returned nothing".to_string()))?,
            Err(e) => {
                self.assets.abandon(&reconciled).await;
                return Err(e.into());
            }
        };
        self.assets.stage(reconciled).await;

        info!(id = %created.id, "management created");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Create,
                AuditEntityType::Management,
                created.id,
                format!("Management \"{}\" created", created.name),
                None,
                snapshot(&created),
            ),
        )
        .await;

        Ok(created)
    }

    /// Saves an edit. References on `management` are ignored; files change
    /// only through `assets`.
    pub async fn update(
        &self,
        id: Uuid,
        mut management: ManagementModel,
        assets: Vec<AssetSlot>,
        actor_id: Uuid,
    ) -> ApiResult<ManagementModel> {
        let persisted = self
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Management", id))?;
        if management.id != id {
            return Err(ApiError::ValidationError(
                "Management id does not match the record being edited".to_string(),
            ));
        }
        validate_period(&management)?;

        for class in ManagementModel::ASSET_CLASSES {
            management
                .set_asset_ref(*class, persisted.asset_ref(*class))
                .map_err(ApiError::ValidationError)?;
        }

        let name = management.name.to_string();
        let reconciled = self
            .assets
            .reconcile_into(&assets, &persisted, &name, &mut management)
            .await?;
        management.updated_at = Utc::now();

        let updated = match self.store.update_batch(vec![management]).await {
            Ok(mut updated) => updated
                .pop()
                .ok_or_else(|| ApiError::InternalError("Management update returned nothing".to_string()))?,
            Err(e) => {
                self.assets.abandon(&reconciled).await;
                return Err(e.into());
            }
        };
        self.assets.stage(reconciled).await;

        info!(%id, "management updated");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Update,
                AuditEntityType::Management,
                id,
                format!("Management \"{}\" updated", updated.name),
                snapshot(&persisted),
                snapshot(&updated),
            ),
        )
        .await;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, actor_id: Uuid) -> ApiResult<()> {
        let persisted = self
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Management", id))?;

        self.store.delete_batch(&[id]).await?;
        if self.deletion.cascade_assets {
            self.assets.stage_release(&persisted).await;
        }

        info!(%id, "management deleted");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Delete,
                AuditEntityType::Management,
                id,
                format!("Management \"{}\" deleted", persisted.name),
                snapshot(&persisted),
                None,
            ),
        )
        .await;

        Ok(())
    }
}

fn validate_period(management: &ManagementModel) -> ApiResult<()> {
    if management.period_end < management.period_start {
        return Err(ApiError::ValidationError(
            "Management period ends before it starts".to_string(),
        ));
    }
    Ok(())
}
