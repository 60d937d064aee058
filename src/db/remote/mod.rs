//! libSQL server backend speaking the HTTP pipeline protocol.
//!
//! Every query is sent as `execute` followed by `close` in one request, so the server-side
//! stream never outlives the round trip, whether or not the statement succeeds.

mod api;
mod decode;

pub use api::{PipelineApi, UPSTREAM_BODY_PREVIEW_CHARS};
pub use decode::{execute_result, rows_from_result};

use crate::db::ResourceSource;
use crate::db::models::ResourceImageRow;
use crate::db::query::RESOURCE_IMAGES_SQL;
use crate::error::ReportError;
use async_trait::async_trait;
use resource_images_schema::{PipelineRequest, Stmt};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct RemoteDatabase {
    client: reqwest::Client,
    pipeline_url: Url,
    auth_token: Option<String>,
}

impl RemoteDatabase {
    pub fn new(
        base: &Url,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            pipeline_url: PipelineApi::pipeline_url(base)?,
            auth_token,
        })
    }
}

#[async_trait]
impl ResourceSource for RemoteDatabase {
    async fn fetch_resource_images(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ResourceImageRow>, ReportError> {
        let body = PipelineRequest::execute_and_close(Stmt::new(RESOURCE_IMAGES_SQL).bind(guild_id));

        let resp = PipelineApi::post_pipeline(
            &self.client,
            &self.pipeline_url,
            self.auth_token.as_deref(),
            &body,
        )
        .await?;

        let result = execute_result(resp)?;
        let rows = rows_from_result(&result)?;
        debug!(guild_id, rows = rows.len(), "Fetched resource rows");
        Ok(rows)
    }

    async fn close(&self) {
        // Streams are closed inside each pipeline; only the HTTP client remains.
        debug!(url = %self.pipeline_url, "Remote database released");
    }
}
