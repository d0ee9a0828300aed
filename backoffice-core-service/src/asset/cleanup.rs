//! Deferred deletion of replaced objects.
//!
//! The queue owns one tokio worker. Every job waits for the configured
//! delay, then the delete is retried with a doubling backoff until it
//! succeeds or `max_attempts` is reached. Failures are logged and never
//! reach the request that scheduled the job.

use backoffice_core_api::domain::AssetClass;
use backoffice_core_api::error::ApiResult;
use backoffice_core_api::service::{ObjectStore, ObjectStoreError};
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::journal::CleanupJournal;
use crate::config::CleanupConfig;

/// Upper bound of journaled jobs picked up by one `recover` call
const RECOVERY_BATCH: usize = 500;

pub struct CleanupQueue {
    sender: mpsc::UnboundedSender<AssetCleanupJobModel>,
    journal: Arc<dyn CleanupJournal>,
    delay: Duration,
    shutdown: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CleanupQueue {
    /// Spawns the worker on the current tokio runtime
    pub fn start(
        store: Arc<dyn ObjectStore>,
        journal: Arc<dyn CleanupJournal>,
        config: CleanupConfig,
    ) -> Arc<Self> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let worker = Arc::new(CleanupWorker {
            store,
            journal: journal.clone(),
            config,
        });
        let handle = tokio::spawn(worker.run(receiver, shutdown.clone()));

        Arc::new(Self {
            sender,
            journal,
            delay: config.delay,
            shutdown,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Journals the deletion of `object_id` and queues it behind the delay
    pub async fn schedule(&self, object_id: &str, class: AssetClass) {
        let job = AssetCleanupJobModel::new(object_id, class, Utc::now() + to_chrono(self.delay));

        if let Err(e) = self.journal.record(job.clone()).await {
            warn!(
                object_id = %object_id,
                asset_class = %class,
                error = %e,
                "failed to journal cleanup job; it will not survive a restart"
            );
        }

        if self.sender.send(job).is_err() {
            warn!(object_id = %object_id, "cleanup queue is stopped; job left in the journal");
        } else {
            debug!(object_id = %object_id, asset_class = %class, "scheduled deletion of replaced object");
        }
    }

    /// Re-queues jobs left in the journal by a previous process.
    ///
    /// Call once at startup, before any new job is scheduled.
    pub async fn recover(&self) -> ApiResult<usize> {
        let jobs = self.journal.pending(RECOVERY_BATCH).await?;
        let mut recovered = 0;
        for job in jobs {
            if self.sender.send(job).is_err() {
                break;
            }
            recovered += 1;
        }
        info!(recovered, "recovered pending asset cleanup jobs");
        Ok(recovered)
    }

    /// Stops the worker. Jobs still waiting get one immediate attempt;
    /// those that fail stay journaled for the next `recover`.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!(error = %e, "asset cleanup worker terminated abnormally");
            }
        }
    }
}

struct CleanupWorker {
    store: Arc<dyn ObjectStore>,
    journal: Arc<dyn CleanupJournal>,
    config: CleanupConfig,
}

impl CleanupWorker {
    async fn run(
        self: Arc<Self>,
        mut receiver: mpsc::UnboundedReceiver<AssetCleanupJobModel>,
        shutdown: CancellationToken,
    ) {
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = receiver.recv() => match received {
                    Some(job) => {
                        let worker = self.clone();
                        let shutdown = shutdown.clone();
                        tasks.spawn(async move { worker.process(job, shutdown).await });
                    }
                    None => break,
                },
                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = result {
                        error!(error = %e, "asset cleanup task panicked");
                    }
                }
            }
        }

        receiver.close();
        let mut drained = 0usize;
        while let Ok(job) = receiver.try_recv() {
            self.final_attempt(job).await;
            drained += 1;
        }
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "asset cleanup task panicked");
            }
        }

        info!(drained, "asset cleanup worker stopped");
    }

    async fn process(&self, mut job: AssetCleanupJobModel, shutdown: CancellationToken) {
        loop {
            let wait = (job.not_before - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            tokio::select! {
                _ = shutdown.cancelled() => {
                    self.final_attempt(job).await;
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            let reason = match self.attempt(&job).await {
                Ok(()) => {
                    self.complete(&job).await;
                    return;
                }
                Err(reason) => reason,
            };

            job.attempts += 1;
            job.last_error = Some(reason.clone());
            let attempts = u32::try_from(job.attempts).unwrap_or(u32::MAX);

            if attempts >= self.config.max_attempts {
                error!(
                    object_id = %job.object_id,
                    asset_class = %job.asset_class,
                    attempts,
                    error = %reason,
                    "giving up on deleting replaced object"
                );
                self.complete(&job).await;
                return;
            }

            let backoff = self.config.backoff_for(attempts);
            job.not_before = Utc::now() + to_chrono(backoff);
            warn!(
                object_id = %job.object_id,
                attempts,
                retry_in_ms = backoff.as_millis() as u64,
                error = %reason,
                "deleting replaced object failed; will retry"
            );
            if let Err(e) = self.journal.reschedule(&job).await {
                warn!(job_id = %job.id, error = %e, "failed to persist cleanup retry");
            }
        }
    }

    /// One attempt without waiting; a failure leaves the job journaled
    async fn final_attempt(&self, mut job: AssetCleanupJobModel) {
        match self.attempt(&job).await {
            Ok(()) => self.complete(&job).await,
            Err(reason) => {
                job.attempts += 1;
                job.last_error = Some(reason.clone());
                warn!(
                    object_id = %job.object_id,
                    error = %reason,
                    "deletion failed during shutdown; left for recovery"
                );
                if let Err(e) = self.journal.reschedule(&job).await {
                    warn!(job_id = %job.id, error = %e, "failed to persist cleanup retry");
                }
            }
        }
    }

    async fn attempt(&self, job: &AssetCleanupJobModel) -> Result<(), String> {
        match self.store.delete(&job.object_id).await {
            Ok(true) => {
                info!(object_id = %job.object_id, asset_class = %job.asset_class, "replaced object deleted");
                Ok(())
            }
            Ok(false) => Err("object store refused the delete".to_string()),
            Err(ObjectStoreError::NotFound(_)) => {
                debug!(object_id = %job.object_id, "replaced object already gone");
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    async fn complete(&self, job: &AssetCleanupJobModel) {
        if let Err(e) = self.journal.complete(job.id).await {
            warn!(job_id = %job.id, error = %e, "failed to remove finished cleanup job from the journal");
        }
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero())
}
