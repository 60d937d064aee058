//! Turns the resource rows of one guild into the image URL report.

mod map;
mod render;

pub use map::{DuplicatePolicy, ImageMap};
pub use render::{ReportFormat, write_json, write_report, write_snippet};

use crate::config::Config;
use crate::db::ResourceSource;
use crate::error::ReportError;
use std::io::Write;
use tracing::info;

/// Counts from one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows_fetched: usize,
    pub entries: usize,
}

pub struct Reporter {
    guild_id: String,
    policy: DuplicatePolicy,
    format: ReportFormat,
}

impl Reporter {
    pub fn new(guild_id: impl Into<String>, policy: DuplicatePolicy, format: ReportFormat) -> Self {
        Self {
            guild_id: guild_id.into(),
            policy,
            format,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.guild_id.clone(), cfg.on_duplicate, cfg.report_format)
    }

    /// Fetches the rows and builds the map. `source` is closed before this returns,
    /// on success and on failure alike.
    pub async fn collect<S>(&self, source: &S) -> Result<(ImageMap, usize), ReportError>
    where
        S: ResourceSource + ?Sized,
    {
        let fetched = source.fetch_resource_images(&self.guild_id).await;
        source.close().await;

        let rows = fetched?;
        let rows_fetched = rows.len();
        let map = ImageMap::from_rows(rows, self.policy)?;
        Ok((map, rows_fetched))
    }

    pub async fn run<S, W>(&self, source: &S, out: &mut W) -> Result<ReportSummary, ReportError>
    where
        S: ResourceSource + ?Sized,
        W: Write,
    {
        let (map, rows_fetched) = self.collect(source).await?;
        info!(
            guild_id = %self.guild_id,
            rows_fetched,
            entries = map.len(),
            "Found {} resources with images",
            map.len()
        );

        write_report(&map, self.format, out)?;
        Ok(ReportSummary {
            rows_fetched,
            entries: map.len(),
        })
    }
}
