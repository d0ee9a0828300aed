use async_trait::async_trait;

use crate::domain::activity::ActivityEntry;
use crate::error::ApiResult;

/// Sink for the audit trail. Callers treat it as fire-and-forget: an error
/// here is logged and never undoes the mutation that produced the entry.
#[async_trait]
pub trait ActivityLogger: Send + Sync {
    async fn log_activity(&self, entry: ActivityEntry) -> ApiResult<()>;
}
