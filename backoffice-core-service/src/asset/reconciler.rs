use backoffice_core_api::domain::{AssetChange, AssetClass, AssetSlot, LocalFile};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::ObjectStore;
use backoffice_core_db::models::reviewable::AssetOwner;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::cleanup::CleanupQueue;
use super::reference::{extract_object_id, final_object_name, temp_object_name};
use crate::config::AssetFolders;

/// Result of reconciling one asset field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPlan {
    Unchanged,
    /// A new object is ready; `previous` is the reference it replaces
    Uploaded {
        class: AssetClass,
        new_id: String,
        previous: Option<String>,
    },
    /// The field is cleared; `previous` is deleted once that is persisted
    Cleared { class: AssetClass, previous: String },
}

/// Plans of every asset field of one save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledAssets {
    plans: Vec<AssetPlan>,
}

impl ReconciledAssets {
    pub fn plans(&self) -> &[AssetPlan] {
        &self.plans
    }

    /// Ids of the objects uploaded by this save
    pub fn uploaded_ids(&self) -> Vec<&str> {
        self.plans
            .iter()
            .filter_map(|plan| match plan {
                AssetPlan::Uploaded { new_id, .. } => Some(new_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Writes the new references into the record about to be persisted
    pub fn apply_to<T: AssetOwner>(&self, entity: &mut T) -> ApiResult<()> {
        for plan in &self.plans {
            match plan {
                AssetPlan::Unchanged => {}
                AssetPlan::Uploaded { class, new_id, .. } => entity
                    .set_asset_ref(*class, Some(new_id))
                    .map_err(ApiError::ValidationError)?,
                AssetPlan::Cleared { class, .. } => entity
                    .set_asset_ref(*class, None)
                    .map_err(ApiError::ValidationError)?,
            }
        }
        Ok(())
    }
}

/// Object store work waiting for the unit of work to end
#[derive(Debug)]
enum StagedAssets {
    /// A record was written with these plans
    Saved(ReconciledAssets),
    /// A record holding these references was deleted
    Released(Vec<(AssetClass, String)>),
}

/// Drives upload, rename and publicize of new files, and the deletion of
/// the objects they replace once the owning record is persisted.
///
/// Services stage their plans after the entity write. The staged work runs
/// only when the unit of work ends: [`Self::finish_committed`] releases the
/// superseded objects, [`Self::finish_rolled_back`] deletes the new uploads.
pub struct AssetReconciler {
    store: Arc<dyn ObjectStore>,
    folders: AssetFolders,
    cleanup: Arc<CleanupQueue>,
    staged: Mutex<Vec<StagedAssets>>,
}

impl AssetReconciler {
    pub fn new(store: Arc<dyn ObjectStore>, folders: AssetFolders, cleanup: Arc<CleanupQueue>) -> Self {
        Self {
            store,
            folders,
            cleanup,
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Reconciles one field whose stored reference is `current`.
    ///
    /// Nothing is deleted here: the previous object is only released by
    /// [`Self::finish_committed`].
    pub async fn reconcile(
        &self,
        slot: &AssetSlot,
        current: Option<&str>,
        owner_name: &str,
    ) -> ApiResult<AssetPlan> {
        match &slot.change {
            AssetChange::Keep => Ok(AssetPlan::Unchanged),
            AssetChange::Remove => Ok(match current {
                Some(previous) => AssetPlan::Cleared {
                    class: slot.class,
                    previous: previous.to_string(),
                },
                None => AssetPlan::Unchanged,
            }),
            AssetChange::Replace(file) => {
                let new_id = self.upload(slot.class, file, owner_name).await?;
                Ok(AssetPlan::Uploaded {
                    class: slot.class,
                    new_id,
                    previous: current.map(str::to_string),
                })
            }
        }
    }

    /// Reconciles every slot in order, one full upload sequence at a time.
    ///
    /// Slots are checked before anything is uploaded: each class must belong
    /// to the record and appear at most once. If slot *k* fails, the objects
    /// uploaded for slots before it are deleted and the error is returned.
    pub async fn reconcile_all<T: AssetOwner>(
        &self,
        slots: &[AssetSlot],
        current: &T,
        owner_name: &str,
    ) -> ApiResult<ReconciledAssets> {
        let mut seen: Vec<AssetClass> = Vec::with_capacity(slots.len());
        for slot in slots {
            if !T::ASSET_CLASSES.contains(&slot.class) {
                return Err(ApiError::ValidationError(format!(
                    "{} is not an asset of this record",
                    slot.class.field_name()
                )));
            }
            if seen.contains(&slot.class) {
                return Err(ApiError::ValidationError(format!(
                    "{} is given more than once",
                    slot.class.field_name()
                )));
            }
            seen.push(slot.class);
        }

        let mut reconciled = ReconciledAssets::default();
        for slot in slots {
            match self.reconcile(slot, current.asset_ref(slot.class), owner_name).await {
                Ok(plan) => reconciled.plans.push(plan),
                Err(e) => {
                    self.abandon(&reconciled).await;
                    return Err(e);
                }
            }
        }

        Ok(reconciled)
    }

    /// [`Self::reconcile_all`] followed by [`ReconciledAssets::apply_to`] on
    /// `entity`. New uploads are deleted if the references do not fit.
    pub async fn reconcile_into<T: AssetOwner>(
        &self,
        slots: &[AssetSlot],
        current: &T,
        owner_name: &str,
        entity: &mut T,
    ) -> ApiResult<ReconciledAssets> {
        let reconciled = self.reconcile_all(slots, current, owner_name).await?;
        if let Err(e) = reconciled.apply_to(entity) {
            self.abandon(&reconciled).await;
            return Err(e);
        }
        Ok(reconciled)
    }

    /// Deletes the objects uploaded for a save whose record was not persisted
    pub async fn abandon(&self, reconciled: &ReconciledAssets) {
        for new_id in reconciled.uploaded_ids() {
            self.discard(new_id).await;
        }
    }

    /// Releases replaced and cleared objects. Runs only after the record
    /// carrying the new references has been committed.
    async fn commit(&self, reconciled: &ReconciledAssets) {
        for plan in &reconciled.plans {
            match plan {
                AssetPlan::Unchanged => {}
                AssetPlan::Uploaded { previous: None, .. } => {}
                AssetPlan::Uploaded {
                    class,
                    previous: Some(previous),
                    ..
                } => match extract_object_id(previous) {
                    Some(object_id) => self.cleanup.schedule(&object_id, *class).await,
                    None => warn!(reference = %previous, "cannot parse replaced reference; old object left in place"),
                },
                AssetPlan::Cleared { class, previous } => self.delete_now(*class, previous).await,
            }
        }
    }

    /// Holds the plans of a written record until the unit of work ends
    pub async fn stage(&self, reconciled: ReconciledAssets) {
        if reconciled.plans.iter().all(|plan| *plan == AssetPlan::Unchanged) {
            return;
        }
        self.staged.lock().await.push(StagedAssets::Saved(reconciled));
    }

    /// Holds the references of a deleted record until the unit of work ends
    pub async fn stage_release<T: AssetOwner>(&self, entity: &T) {
        let references: Vec<(AssetClass, String)> = T::ASSET_CLASSES
            .iter()
            .filter_map(|class| entity.asset_ref(*class).map(|r| (*class, r.to_string())))
            .collect();
        if !references.is_empty() {
            self.staged.lock().await.push(StagedAssets::Released(references));
        }
    }

    pub async fn staged_count(&self) -> usize {
        self.staged.lock().await.len()
    }

    /// The records are durable: release every superseded object
    pub async fn finish_committed(&self) {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        for work in staged {
            match work {
                StagedAssets::Saved(reconciled) => self.commit(&reconciled).await,
                StagedAssets::Released(references) => {
                    for (class, reference) in references {
                        self.delete_now(class, &reference).await;
                    }
                }
            }
        }
    }

    /// The records were not persisted: delete the new uploads, keep the rest
    pub async fn finish_rolled_back(&self) {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        for work in staged {
            if let StagedAssets::Saved(reconciled) = work {
                self.abandon(&reconciled).await;
            }
        }
    }

    /// Outcome unknown: drop the staged work and leave every object in place
    pub async fn forget_staged(&self) {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        if !staged.is_empty() {
            warn!(count = staged.len(), "unit of work ended in an unknown state; objects left in place");
        }
    }

    async fn upload(&self, class: AssetClass, file: &LocalFile, owner_name: &str) -> ApiResult<String> {
        let folder = self.folders.folder_for(class);
        let temp_name = temp_object_name(file);

        let object_id = self.store.upload(file, &temp_name, folder).await.map_err(|e| {
            warn!(asset_class = %class, file_name = %file.file_name, error = %e, "upload failed");
            ApiError::UploadError(e.to_string())
        })?;

        let final_name = final_object_name(class, owner_name, file.extension().as_deref(), Utc::now());
        match self.store.rename(&object_id, &final_name).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard(&object_id).await;
                return Err(ApiError::RenameError(format!(
                    "object store refused to rename {object_id}"
                )));
            }
            Err(e) => {
                self.discard(&object_id).await;
                return Err(ApiError::RenameError(e.to_string()));
            }
        }

        match self.store.set_public_access(&object_id).await {
            Ok(true) => {}
            Ok(false) => warn!(object_id = %object_id, "object store refused public access"),
            Err(e) => warn!(object_id = %object_id, error = %e, "failed to make object public"),
        }

        info!(asset_class = %class, object_id = %object_id, name = %final_name, "asset uploaded");
        Ok(object_id)
    }

    async fn discard(&self, object_id: &str) {
        if let Err(e) = self.store.delete(object_id).await {
            warn!(object_id = %object_id, error = %e, "failed to delete orphaned upload");
        }
    }

    async fn delete_now(&self, class: AssetClass, reference: &str) {
        let Some(object_id) = extract_object_id(reference) else {
            warn!(reference = %reference, "cannot parse removed reference; object left in place");
            return;
        };
        match self.store.delete(&object_id).await {
            Ok(true) => info!(asset_class = %class, object_id = %object_id, "removed object deleted"),
            Ok(false) => warn!(object_id = %object_id, "object store refused to delete removed object"),
            Err(e) => warn!(object_id = %object_id, error = %e, "failed to delete removed object"),
        }
    }
}

impl Drop for AssetReconciler {
    fn drop(&mut self) {
        let staged = self.staged.get_mut();
        if !staged.is_empty() {
            warn!(count = staged.len(), "asset reconciler dropped with staged work; objects left in place");
        }
    }
}
