use crate::db::ResourceSource;
use crate::db::models::ResourceImageRow;
use crate::db::query::RESOURCE_IMAGES_SQL;
use crate::error::ReportError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{path::Path, time::Duration};
use tracing::{debug, info};

/// SQLite file opened read-only through a single-connection pool.
pub struct LocalDatabase {
    pool: SqlitePool,
}

impl LocalDatabase {
    pub async fn open(path: &Path) -> Result<Self, ReportError> {
        let connect_opts = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await?;

        info!(path = %path.display(), "Opened local database");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ResourceSource for LocalDatabase {
    async fn fetch_resource_images(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ResourceImageRow>, ReportError> {
        let rows = sqlx::query_as::<_, ResourceImageRow>(RESOURCE_IMAGES_SQL)
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await?;
        debug!(guild_id, rows = rows.len(), "Fetched resource rows");
        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Local database closed");
    }
}
