//! Database access: one read query against the `resources` table.
//!
//! Layout:
//! - `models.rs`: row struct for the query result
//! - `query.rs`: the SQL text and column names
//! - `local.rs`: SQLite file backend (sqlx)
//! - `remote/`: libSQL server backend (HTTP pipeline)

pub mod local;
pub mod models;
pub mod query;
pub mod remote;

pub use local::LocalDatabase;
pub use models::ResourceImageRow;
pub use remote::RemoteDatabase;

use crate::config::{Config, DatabaseTarget};
use crate::error::ReportError;
use async_trait::async_trait;
use tracing::debug;

/// Anything that can answer the resource image query.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Rows of the given guild, ordered by name.
    async fn fetch_resource_images(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ResourceImageRow>, ReportError>;

    /// Releases the underlying connection. Safe to call after a failed fetch.
    async fn close(&self);
}

pub enum Database {
    Remote(RemoteDatabase),
    Local(LocalDatabase),
}

impl Database {
    /// Opens the backend selected by `TURSO_DATABASE_URL`.
    pub async fn connect(cfg: &Config) -> Result<Self, ReportError> {
        match cfg.database_target()? {
            DatabaseTarget::Remote(base) => {
                debug!(base = %base, "Using remote libSQL backend");
                let db = RemoteDatabase::new(
                    &base,
                    cfg.auth_token().map(str::to_string),
                    cfg.http_timeout(),
                )?;
                Ok(Database::Remote(db))
            }
            DatabaseTarget::Local(path) => {
                debug!(path = %path.display(), "Using local SQLite backend");
                Ok(Database::Local(LocalDatabase::open(&path).await?))
            }
        }
    }
}

#[async_trait]
impl ResourceSource for Database {
    async fn fetch_resource_images(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ResourceImageRow>, ReportError> {
        match self {
            Database::Remote(db) => db.fetch_resource_images(guild_id).await,
            Database::Local(db) => db.fetch_resource_images(guild_id).await,
        }
    }

    async fn close(&self) {
        match self {
            Database::Remote(db) => db.close().await,
            Database::Local(db) => db.close().await,
        }
    }
}
