//! Schema setup and teardown outside of `sqlx::migrate!`.
//!
//! `migrations/` holds the creation scripts, `cleanup/` the matching drop
//! scripts under the same file names. Setup runs the first set in file
//! name order, teardown runs the second set in reverse order.

use sqlx::PgPool;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Direction in which a script directory is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptOrder {
    Ascending,
    Descending,
}

/// Creates the back-office schema; returns the number of scripts applied
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use backoffice_core_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    run_scripts(pool, &dir, ScriptOrder::Ascending).await
}

/// Drops everything `init_database` created; returns the number of scripts applied
pub async fn cleanup_database(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    run_scripts(pool, &dir, ScriptOrder::Descending).await
}

fn sql_scripts(dir: &Path, order: ScriptOrder) -> Result<Vec<PathBuf>, sqlx::Error> {
    let mut scripts: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("sql"))
        .collect();

    scripts.sort();
    if order == ScriptOrder::Descending {
        scripts.reverse();
    }
    Ok(scripts)
}

async fn run_scripts(pool: &PgPool, dir: &Path, order: ScriptOrder) -> Result<usize, sqlx::Error> {
    let scripts = sql_scripts(dir, order)?;
    for script in &scripts {
        let sql = fs::read_to_string(script).map_err(sqlx::Error::Io)?;
        sqlx::raw_sql(&sql).execute(pool).await?;
        info!(script = %script.display(), "applied schema script");
    }
    Ok(scripts.len())
}
