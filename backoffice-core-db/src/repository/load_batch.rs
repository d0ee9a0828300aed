use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading entities by id
///
/// The result has one slot per requested id, in request order; ids that do
/// not exist yield `None`.
#[async_trait]
pub trait LoadBatch<DB: Database, T: Identifiable>: Send + Sync {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<T>>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Loads a single entity through a [`LoadBatch`] repository
pub async fn load_one<DB, T, R>(
    repo: &R,
    id: Uuid,
) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>
where
    DB: Database,
    T: Identifiable,
    R: LoadBatch<DB, T> + ?Sized,
{
    Ok(repo.load_batch(&[id]).await?.into_iter().next().flatten())
}
