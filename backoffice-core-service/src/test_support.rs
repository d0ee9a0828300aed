//! In-memory doubles and fixtures shared by the service tests.

use async_trait::async_trait;
use backoffice_core_api::domain::{
    ActivityEntry, ApprovalEntityType, ApprovalFilter, AuditEntityType, LocalFile,
    PublicationStatus,
};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::{ActivityLogger, ApprovalService, ObjectStore, ObjectStoreError};
use backoffice_core_db::models::activity::ActivityLogModel;
use backoffice_core_db::models::approval::{ApprovalHistoryModel, ApprovalModel};
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use backoffice_core_db::models::entity::{
    DocumentCategory, DocumentModel, EventModel, FinanceFlow, FinanceModel, LetterDirection,
    LetterModel, ManagementModel, WorkProgramModel,
};
use backoffice_core_db::models::identifiable::Identifiable;
use backoffice_core_db::repository::{
    ApprovalHistoryRepository, CreateBatch, DeleteBatch, ExistByIds, FindActivityByEntity,
    FindApprovalByEntity, ListApprovals, LoadBatch, Page, PageRequest, UpdateBatch,
};
use chrono::{NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::activity::RepositoryActivityLogger;
use crate::approval_service::ApprovalServiceImpl;
use crate::asset::{CleanupJournal, CleanupQueue};
use crate::bulk::{ApprovalUnitOfWork, ApprovalUnits, BulkApprovalCoordinator};
use crate::config::{ApprovalPolicy, AssetFolders, CleanupConfig, DeletionPolicy, ServiceConfig};
use crate::repositories::ServiceRepositories;
use crate::services::BackofficeServices;

type BoxError = Box<dyn Error + Send + Sync>;

// =============================================================================
// Event journal
// =============================================================================

/// Ordered record of every write made through the doubles, shared between
/// the repositories and the object store so tests can check ordering.
#[derive(Clone, Default)]
pub struct EventJournal {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventJournal {
    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events.lock().unwrap().iter().position(|e| e == event)
    }
}

// =============================================================================
// Repositories
// =============================================================================

struct Table<T> {
    label: &'static str,
    rows: Mutex<Vec<T>>,
    journal: EventJournal,
    fail_writes: AtomicBool,
}

impl<T: Identifiable + Clone> Table<T> {
    fn new(label: &'static str, journal: EventJournal) -> Self {
        Self {
            label,
            rows: Mutex::new(Vec::new()),
            journal,
            fail_writes: AtomicBool::new(false),
        }
    }

    fn check_writable(&self) -> Result<(), BoxError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(format!("{} table is unavailable", self.label).into());
        }
        Ok(())
    }

    fn get(&self, id: Uuid) -> Option<T> {
        self.rows.lock().unwrap().iter().find(|r| r.get_id() == id).cloned()
    }

    fn create(&self, items: Vec<T>) -> Result<Vec<T>, BoxError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        for item in &items {
            if rows.iter().any(|r| r.get_id() == item.get_id()) {
                return Err(format!("duplicate {} {}", self.label, item.get_id()).into());
            }
        }
        for item in &items {
            rows.push(item.clone());
            self.journal.push(format!("create:{}:{}", self.label, item.get_id()));
        }
        Ok(items)
    }

    fn load(&self, ids: &[Uuid]) -> Vec<Option<T>> {
        ids.iter().map(|id| self.get(*id)).collect()
    }

    fn update(&self, items: Vec<T>) -> Result<Vec<T>, BoxError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        for item in &items {
            let slot = rows
                .iter_mut()
                .find(|r| r.get_id() == item.get_id())
                .ok_or_else(|| format!("{} {} not found", self.label, item.get_id()))?;
            *slot = item.clone();
            self.journal.push(format!("update:{}:{}", self.label, item.get_id()));
        }
        Ok(items)
    }

    fn delete(&self, ids: &[Uuid]) -> Result<usize, BoxError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !ids.contains(&r.get_id()));
        for id in ids {
            self.journal.push(format!("delete:{}:{}", self.label, id));
        }
        Ok(before - rows.len())
    }
}

/// Entity table double with a write-failure switch
pub struct InMemoryEntityStore<T> {
    table: Table<T>,
}

impl<T: Identifiable + Clone> InMemoryEntityStore<T> {
    pub fn new(label: &'static str, journal: EventJournal) -> Self {
        Self {
            table: Table::new(label, journal),
        }
    }

    /// Makes every following create, update and delete fail
    pub fn fail_writes(&self, fail: bool) {
        self.table.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.table.get(id)
    }

    pub fn count(&self) -> usize {
        self.table.rows.lock().unwrap().len()
    }

    /// Drops a row behind the services' back
    pub fn remove(&self, id: Uuid) {
        self.table.rows.lock().unwrap().retain(|r| r.get_id() != id);
    }
}

#[async_trait]
impl<T: Identifiable + Clone + Send + Sync + 'static> CreateBatch<Postgres, T> for InMemoryEntityStore<T> {
    async fn create_batch(&self, items: Vec<T>) -> Result<Vec<T>, BoxError> {
        self.table.create(items)
    }
}

#[async_trait]
impl<T: Identifiable + Clone + Send + Sync + 'static> LoadBatch<Postgres, T> for InMemoryEntityStore<T> {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<T>>, BoxError> {
        Ok(self.table.load(ids))
    }
}

#[async_trait]
impl<T: Identifiable + Clone + Send + Sync + 'static> UpdateBatch<Postgres, T> for InMemoryEntityStore<T> {
    async fn update_batch(&self, items: Vec<T>) -> Result<Vec<T>, BoxError> {
        self.table.update(items)
    }
}

#[async_trait]
impl<T: Identifiable + Clone + Send + Sync + 'static> DeleteBatch<Postgres> for InMemoryEntityStore<T> {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, BoxError> {
        self.table.delete(ids)
    }
}

#[async_trait]
impl<T: Identifiable + Clone + Send + Sync + 'static> ExistByIds<Postgres> for InMemoryEntityStore<T> {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, BoxError> {
        Ok(ids.iter().map(|id| (*id, self.table.get(*id).is_some())).collect())
    }
}

pub struct InMemoryApprovalStore {
    table: Table<ApprovalModel>,
    history: Mutex<Vec<ApprovalHistoryModel>>,
}

impl InMemoryApprovalStore {
    pub fn new(journal: EventJournal) -> Self {
        Self {
            table: Table::new("approval", journal),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<ApprovalModel> {
        self.table.get(id)
    }

    pub fn all(&self) -> Vec<ApprovalModel> {
        self.table.rows.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.table.rows.lock().unwrap().len()
    }

    /// Approval and history writes fail while set
    pub fn fail_writes(&self, fail: bool) {
        self.table.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CreateBatch<Postgres, ApprovalModel> for InMemoryApprovalStore {
    async fn create_batch(&self, items: Vec<ApprovalModel>) -> Result<Vec<ApprovalModel>, BoxError> {
        self.table.create(items)
    }
}

#[async_trait]
impl LoadBatch<Postgres, ApprovalModel> for InMemoryApprovalStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ApprovalModel>>, BoxError> {
        Ok(self.table.load(ids))
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ApprovalModel> for InMemoryApprovalStore {
    async fn update_batch(&self, items: Vec<ApprovalModel>) -> Result<Vec<ApprovalModel>, BoxError> {
        self.table.update(items)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for InMemoryApprovalStore {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, BoxError> {
        self.table.delete(ids)
    }
}

#[async_trait]
impl FindApprovalByEntity<Postgres> for InMemoryApprovalStore {
    async fn find_by_entity_and_user(
        &self,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApprovalModel>, BoxError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|a| a.entity_type == entity_type && a.entity_id == entity_id && a.user_id == user_id)
            .min_by_key(|a| a.created_at))
    }

    async fn find_by_entity(
        &self,
        entity_types: &[ApprovalEntityType],
        entity_id: Uuid,
    ) -> Result<Vec<ApprovalModel>, BoxError> {
        let mut approvals: Vec<ApprovalModel> = self
            .all()
            .into_iter()
            .filter(|a| entity_types.contains(&a.entity_type) && a.entity_id == entity_id)
            .collect();
        approvals.sort_by_key(|a| std::cmp::Reverse((a.created_at, a.updated_at, a.id)));
        Ok(approvals)
    }
}

#[async_trait]
impl ListApprovals<Postgres> for InMemoryApprovalStore {
    async fn list(&self, filter: &ApprovalFilter, page: PageRequest) -> Result<Page<ApprovalModel>, BoxError> {
        let mut approvals: Vec<ApprovalModel> = self
            .all()
            .into_iter()
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.entity_type.map_or(true, |t| a.entity_type == t))
            .collect();
        approvals.sort_by_key(|a| std::cmp::Reverse(a.created_at));
        let total = approvals.len();
        let items = approvals.into_iter().skip(page.offset).take(page.limit).collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}

#[async_trait]
impl ApprovalHistoryRepository<Postgres> for InMemoryApprovalStore {
    async fn append_history(&self, entry: ApprovalHistoryModel) -> Result<(), BoxError> {
        self.table.check_writable()?;
        self.history.lock().unwrap().push(entry);
        Ok(())
    }

    async fn load_history(&self, approval_id: Uuid) -> Result<Vec<ApprovalHistoryModel>, BoxError> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.approval_id == approval_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryActivityLog {
    entries: Mutex<Vec<ActivityLogModel>>,
}

impl InMemoryActivityLog {
    pub fn entries(&self) -> Vec<ActivityLogModel> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CreateBatch<Postgres, ActivityLogModel> for InMemoryActivityLog {
    async fn create_batch(&self, items: Vec<ActivityLogModel>) -> Result<Vec<ActivityLogModel>, BoxError> {
        self.entries.lock().unwrap().extend(items.iter().cloned());
        Ok(items)
    }
}

#[async_trait]
impl FindActivityByEntity<Postgres> for InMemoryActivityLog {
    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActivityLogModel>, BoxError> {
        let matching: Vec<ActivityLogModel> = self
            .entries()
            .into_iter()
            .rev()
            .filter(|e| e.entity_type == entity_type && e.entity_id == entity_id)
            .collect();
        let total = matching.len();
        let items = matching.into_iter().skip(page.offset).take(page.limit).collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}

/// Activity logger whose every write fails
pub struct FailingActivityLogger;

#[async_trait]
impl ActivityLogger for FailingActivityLogger {
    async fn log_activity(&self, _entry: ActivityEntry) -> ApiResult<()> {
        Err(ApiError::DatabaseError("activity log unavailable".to_string()))
    }
}

pub struct TestRepos {
    pub journal: EventJournal,
    pub approvals: Arc<InMemoryApprovalStore>,
    pub work_programs: Arc<InMemoryEntityStore<WorkProgramModel>>,
    pub events: Arc<InMemoryEntityStore<EventModel>>,
    pub finances: Arc<InMemoryEntityStore<FinanceModel>>,
    pub documents: Arc<InMemoryEntityStore<DocumentModel>>,
    pub letters: Arc<InMemoryEntityStore<LetterModel>>,
    pub managements: Arc<InMemoryEntityStore<ManagementModel>>,
    pub activity_log: Arc<InMemoryActivityLog>,
}

impl TestRepos {
    pub fn new() -> Self {
        let journal = EventJournal::default();
        Self {
            approvals: Arc::new(InMemoryApprovalStore::new(journal.clone())),
            work_programs: Arc::new(InMemoryEntityStore::new("work_program", journal.clone())),
            events: Arc::new(InMemoryEntityStore::new("event", journal.clone())),
            finances: Arc::new(InMemoryEntityStore::new("finance", journal.clone())),
            documents: Arc::new(InMemoryEntityStore::new("document", journal.clone())),
            letters: Arc::new(InMemoryEntityStore::new("letter", journal.clone())),
            managements: Arc::new(InMemoryEntityStore::new("management", journal.clone())),
            activity_log: Arc::new(InMemoryActivityLog::default()),
            journal,
        }
    }

    pub fn service_repositories(&self) -> ServiceRepositories {
        ServiceRepositories {
            approvals: self.approvals.clone(),
            work_programs: self.work_programs.clone(),
            events: self.events.clone(),
            finances: self.finances.clone(),
            documents: self.documents.clone(),
            letters: self.letters.clone(),
            managements: self.managements.clone(),
            activity_log: self.activity_log.clone(),
        }
    }

    pub fn activity_logger(&self) -> Arc<dyn ActivityLogger> {
        Arc::new(RepositoryActivityLogger::new(self.activity_log.clone()))
    }

    pub async fn insert_finance(&self, finance: FinanceModel) -> FinanceModel {
        self.finances.create_batch(vec![finance]).await.unwrap().remove(0)
    }

    pub async fn insert_event(&self, event: EventModel) -> EventModel {
        self.events.create_batch(vec![event]).await.unwrap().remove(0)
    }

    pub async fn insert_letter(&self, letter: LetterModel) -> LetterModel {
        self.letters.create_batch(vec![letter]).await.unwrap().remove(0)
    }

    pub async fn insert_document(&self, document: DocumentModel) -> DocumentModel {
        self.documents.create_batch(vec![document]).await.unwrap().remove(0)
    }

    pub async fn insert_management(&self, management: ManagementModel) -> ManagementModel {
        self.managements.create_batch(vec![management]).await.unwrap().remove(0)
    }

    pub fn finance(&self, id: Uuid) -> FinanceModel {
        self.finances.get(id).unwrap()
    }

    pub fn event(&self, id: Uuid) -> EventModel {
        self.events.get(id).unwrap()
    }

    pub fn letter(&self, id: Uuid) -> LetterModel {
        self.letters.get(id).unwrap()
    }
}

// =============================================================================
// Object store
// =============================================================================

#[derive(Debug, Clone)]
struct StoredObject {
    name: String,
    folder: String,
    public: bool,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenameBehaviour {
    #[default]
    Accept,
    Refuse,
    Fail,
}

/// Object store double recording every call into an [`EventJournal`]
#[derive(Default)]
pub struct MockObjectStore {
    journal: EventJournal,
    objects: Mutex<HashMap<String, StoredObject>>,
    next_id: AtomicUsize,
    uploads: AtomicUsize,
    /// 1-based index of the first upload that fails; 0 means never
    fail_upload_from: AtomicUsize,
    rename: Mutex<RenameBehaviour>,
    fail_public: AtomicBool,
    failing_deletes: AtomicUsize,
    oversized_ids: AtomicBool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: EventJournal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn with_object(self, id: &str, name: &str) -> Self {
        self.add_object(id, name);
        self
    }

    pub fn add_object(&self, id: &str, name: &str) {
        self.objects.lock().unwrap().insert(
            id.to_string(),
            StoredObject {
                name: name.to_string(),
                folder: "seed".to_string(),
                public: true,
            },
        );
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Upload number `n` (1-based) and every later one fail
    pub fn fail_upload_at(&self, n: usize) {
        self.fail_upload_from.store(n, Ordering::SeqCst);
    }

    /// Renames answer `Ok(false)`
    pub fn refuse_renames(&self) {
        *self.rename.lock().unwrap() = RenameBehaviour::Refuse;
    }

    /// Renames answer with an error
    pub fn fail_renames(&self) {
        *self.rename.lock().unwrap() = RenameBehaviour::Fail;
    }

    pub fn fail_public_access(&self) {
        self.fail_public.store(true, Ordering::SeqCst);
    }

    /// New object ids are longer than any stored reference may be
    pub fn issue_oversized_ids(&self) {
        self.oversized_ids.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_deletes(&self, count: usize) {
        self.failing_deletes.store(count, Ordering::SeqCst);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.lock().unwrap().contains_key(id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn object_name(&self, id: &str) -> Option<String> {
        self.objects.lock().unwrap().get(id).map(|o| o.name.clone())
    }

    pub fn folder_of(&self, id: &str) -> Option<String> {
        self.objects.lock().unwrap().get(id).map(|o| o.folder.clone())
    }

    pub fn is_public(&self, id: &str) -> bool {
        self.objects.lock().unwrap().get(id).is_some_and(|o| o.public)
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(&self, _file: &LocalFile, name: &str, folder_id: &str) -> Result<String, ObjectStoreError> {
        let upload_number = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let fail_from = self.fail_upload_from.load(Ordering::SeqCst);
        if fail_from != 0 && upload_number >= fail_from {
            self.journal.push(format!("upload-failed:{name}"));
            return Err(ObjectStoreError::Request("upload rejected".to_string()));
        }

        let mut id = format!("obj-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        if self.oversized_ids.load(Ordering::SeqCst) {
            id.push_str(&"x".repeat(300));
        }
        self.objects.lock().unwrap().insert(
            id.clone(),
            StoredObject {
                name: name.to_string(),
                folder: folder_id.to_string(),
                public: false,
            },
        );
        self.journal.push(format!("upload:{id}:{name}"));
        Ok(id)
    }

    async fn rename(&self, object_id: &str, new_name: &str) -> Result<bool, ObjectStoreError> {
        self.journal.push(format!("rename:{object_id}:{new_name}"));
        let behaviour = *self.rename.lock().unwrap();
        match behaviour {
            RenameBehaviour::Refuse => Ok(false),
            RenameBehaviour::Fail => Err(ObjectStoreError::Request("rename timed out".to_string())),
            RenameBehaviour::Accept => match self.objects.lock().unwrap().get_mut(object_id) {
                Some(object) => {
                    object.name = new_name.to_string();
                    Ok(true)
                }
                None => Err(ObjectStoreError::NotFound(object_id.to_string())),
            },
        }
    }

    async fn set_public_access(&self, object_id: &str) -> Result<bool, ObjectStoreError> {
        self.journal.push(format!("public:{object_id}"));
        if self.fail_public.load(Ordering::SeqCst) {
            return Err(ObjectStoreError::Request("permission update failed".to_string()));
        }
        match self.objects.lock().unwrap().get_mut(object_id) {
            Some(object) => {
                object.public = true;
                Ok(true)
            }
            None => Err(ObjectStoreError::NotFound(object_id.to_string())),
        }
    }

    async fn delete(&self, object_id: &str) -> Result<bool, ObjectStoreError> {
        self.journal.push(format!("delete:{object_id}"));
        let remaining = self.failing_deletes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_deletes.store(remaining - 1, Ordering::SeqCst);
            return Err(ObjectStoreError::Request("backend unavailable".to_string()));
        }
        match self.objects.lock().unwrap().remove(object_id) {
            Some(_) => Ok(true),
            None => Err(ObjectStoreError::NotFound(object_id.to_string())),
        }
    }
}

// =============================================================================
// Cleanup
// =============================================================================

#[derive(Default)]
pub struct InMemoryCleanupJournal {
    jobs: Mutex<HashMap<Uuid, AssetCleanupJobModel>>,
}

impl InMemoryCleanupJournal {
    pub fn jobs(&self) -> Vec<AssetCleanupJobModel> {
        let mut jobs: Vec<AssetCleanupJobModel> = self.jobs.lock().unwrap().values().cloned().collect();
        jobs.sort_by_key(|j| j.not_before);
        jobs
    }
}

#[async_trait]
impl CleanupJournal for InMemoryCleanupJournal {
    async fn record(&self, job: AssetCleanupJobModel) -> ApiResult<()> {
        self.jobs.lock().unwrap().insert(job.id, job);
        Ok(())
    }

    async fn reschedule(&self, job: &AssetCleanupJobModel) -> ApiResult<()> {
        self.jobs.lock().unwrap().insert(job.id, job.clone());
        Ok(())
    }

    async fn complete(&self, job_id: Uuid) -> ApiResult<()> {
        self.jobs.lock().unwrap().remove(&job_id);
        Ok(())
    }

    async fn pending(&self, limit: usize) -> ApiResult<Vec<AssetCleanupJobModel>> {
        Ok(self.jobs().into_iter().take(limit).collect())
    }
}

pub fn fast_cleanup_config() -> CleanupConfig {
    CleanupConfig {
        delay: Duration::from_millis(10),
        max_attempts: 3,
        backoff: Duration::from_millis(5),
    }
}

pub fn fast_cleanup_queue(store: Arc<MockObjectStore>) -> Arc<CleanupQueue> {
    CleanupQueue::start(store, Arc::new(InMemoryCleanupJournal::default()), fast_cleanup_config())
}

/// Polls `condition` for up to two seconds
pub async fn eventually<F: Fn() -> bool>(condition: F) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within 2s");
}

// =============================================================================
// Bulk units of work
// =============================================================================

/// Units of work over the in-memory repositories. Writes are not rolled
/// back; the counters show how the items were split.
pub struct InMemoryApprovalUnits {
    approvals: Arc<ApprovalServiceImpl>,
    begun: Arc<AtomicUsize>,
    committed: Arc<AtomicUsize>,
}

impl InMemoryApprovalUnits {
    pub fn new(approvals: Arc<ApprovalServiceImpl>) -> Self {
        Self {
            approvals,
            begun: Arc::new(AtomicUsize::new(0)),
            committed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn begun(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> usize {
        self.committed.load(Ordering::SeqCst)
    }
}

struct InMemoryApprovalUnit {
    approvals: Arc<ApprovalServiceImpl>,
    committed: Arc<AtomicUsize>,
}

#[async_trait]
impl ApprovalUnitOfWork for InMemoryApprovalUnit {
    fn approvals(&self) -> &dyn ApprovalService {
        self.approvals.as_ref()
    }

    async fn commit(self: Box<Self>) -> ApiResult<()> {
        self.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ApprovalUnits for InMemoryApprovalUnits {
    async fn begin(&self) -> ApiResult<Box<dyn ApprovalUnitOfWork>> {
        self.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryApprovalUnit {
            approvals: self.approvals.clone(),
            committed: self.committed.clone(),
        }))
    }
}

// =============================================================================
// Wiring
// =============================================================================

pub fn test_folders() -> AssetFolders {
    AssetFolders {
        finance_proof: "folder-finance".to_string(),
        event_thumbnail: "folder-event".to_string(),
        management_decree: "folder-decree".to_string(),
        management_structure: "folder-structure".to_string(),
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        database_url: "postgresql://localhost/backoffice_test".to_string(),
        asset_folders: test_folders(),
        cleanup: fast_cleanup_config(),
        approval: ApprovalPolicy::default(),
        deletion: DeletionPolicy::default(),
    }
}

/// Every service wired over the in-memory doubles
pub struct TestHarness {
    pub repos: TestRepos,
    pub journal: EventJournal,
    pub object_store: Arc<MockObjectStore>,
    pub cleanup_journal: Arc<InMemoryCleanupJournal>,
    pub cleanup: Arc<CleanupQueue>,
    pub units: Arc<InMemoryApprovalUnits>,
    pub bulk: BulkApprovalCoordinator,
    services: BackofficeServices,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_deletion(DeletionPolicy::default())
    }

    pub fn with_deletion(deletion: DeletionPolicy) -> Self {
        let repos = TestRepos::new();
        let journal = repos.journal.clone();
        let object_store = Arc::new(MockObjectStore::with_journal(journal.clone()));
        let cleanup_journal = Arc::new(InMemoryCleanupJournal::default());
        let cleanup = CleanupQueue::start(object_store.clone(), cleanup_journal.clone(), fast_cleanup_config());

        let config = ServiceConfig {
            deletion,
            ..test_config()
        };
        let services = BackofficeServices::new(
            repos.service_repositories(),
            &config,
            object_store.clone(),
            cleanup.clone(),
        );
        let units = Arc::new(InMemoryApprovalUnits::new(services.approvals.clone()));
        let bulk = BulkApprovalCoordinator::new(units.clone());

        Self {
            repos,
            journal,
            object_store,
            cleanup_journal,
            cleanup,
            units,
            bulk,
            services,
        }
    }
}

impl Deref for TestHarness {
    type Target = BackofficeServices;

    fn deref(&self) -> &Self::Target {
        &self.services
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn bounded<const N: usize>(value: &str) -> HeaplessString<N> {
    HeaplessString::try_from(value).unwrap()
}

pub fn png_file(name: &str) -> LocalFile {
    LocalFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

pub fn sample_finance(status: PublicationStatus) -> FinanceModel {
    let now = Utc::now();
    FinanceModel {
        id: Uuid::new_v4(),
        name: bounded("Venue rental"),
        flow: FinanceFlow::Expense,
        category: bounded("Operations"),
        amount: Decimal::new(15_000_000, 2),
        transaction_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        work_program_id: None,
        proof: Some(bounded("old123")),
        status,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_event(status: PublicationStatus) -> EventModel {
    let now = Utc::now();
    EventModel {
        id: Uuid::new_v4(),
        name: bounded("Dies Natalis"),
        description: Some("Anniversary celebration".to_string()),
        category: bounded("Ceremony"),
        starts_at: now,
        ends_at: None,
        location: Some(bounded("Main hall")),
        work_program_id: None,
        thumbnail: None,
        status,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_letter(status: PublicationStatus) -> LetterModel {
    let now = Utc::now();
    LetterModel {
        id: Uuid::new_v4(),
        number: bounded("001/SEC/III/2024"),
        subject: bounded("Invitation to the annual meeting"),
        recipient: bounded("All members"),
        direction: LetterDirection::Outgoing,
        letter_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        content: Some("You are invited.".to_string()),
        status,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_document(category: DocumentCategory, status: PublicationStatus) -> DocumentModel {
    let now = Utc::now();
    DocumentModel {
        id: Uuid::new_v4(),
        name: bounded("Annual plan"),
        category,
        content: Some("Goals for the year".to_string()),
        work_program_id: None,
        status,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_work_program(status: PublicationStatus) -> WorkProgramModel {
    let now = Utc::now();
    WorkProgramModel {
        id: Uuid::new_v4(),
        name: bounded("Leadership training"),
        description: Some("Two-day training for new staff".to_string()),
        person_in_charge: Some(bounded("Ayu")),
        start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        budget: Decimal::new(5_000_000, 0),
        status,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_management() -> ManagementModel {
    let now = Utc::now();
    ManagementModel {
        id: Uuid::new_v4(),
        name: bounded("Board 2024"),
        period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        decree: None,
        structure: None,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}
