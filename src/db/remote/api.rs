use crate::error::ReportError;
use crate::utils::logging::with_pretty_json_debug;
use resource_images_schema::{PipelineRequest, PipelineResponse};
use url::Url;

/// Upper bound on how much of an error body is kept for logs and error messages.
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 512;

const PIPELINE_PATH: &str = "v2/pipeline";

pub struct PipelineApi;

impl PipelineApi {
    /// `{base}/v2/pipeline`, keeping any path prefix on the base URL.
    pub fn pipeline_url(base: &Url) -> Result<Url, ReportError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(PIPELINE_PATH)?)
    }

    pub fn build_pipeline_request(
        client: &reqwest::Client,
        pipeline_url: &Url,
        auth_token: Option<&str>,
        body: &PipelineRequest,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let builder = client.post(pipeline_url.clone()).json(body);
        let builder = match auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        builder.build()
    }

    pub async fn post_pipeline(
        client: &reqwest::Client,
        pipeline_url: &Url,
        auth_token: Option<&str>,
        body: &PipelineRequest,
    ) -> Result<PipelineResponse, ReportError> {
        with_pretty_json_debug(body, |json| {
            tracing::debug!(url = %pipeline_url, body = %json, "Sending pipeline request");
        });

        let req = Self::build_pipeline_request(client, pipeline_url, auth_token, body)?;
        let resp = client.execute(req).await?;

        let status = resp.status();
        if !status.is_success() {
            let body_preview = match resp.bytes().await {
                Ok(bytes) => {
                    let raw_body = String::from_utf8_lossy(&bytes);
                    format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
                }
                Err(e) => format!("<failed to read body: {e}>"),
            };
            tracing::debug!(%status, body = %body_preview, "Pipeline request rejected");
            return Err(ReportError::UpstreamStatus {
                status,
                body: body_preview,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
