pub mod config;
pub mod db;
pub mod error;
pub mod report;

mod utils;

pub use config::Config;
pub use db::{Database, ResourceImageRow, ResourceSource};
pub use error::ReportError;
pub use report::{ImageMap, ReportSummary, Reporter};

use std::io::Write;
use tracing::info;

/// Connects using `cfg`, writes the report to `out`, and releases the connection.
pub async fn run<W: Write>(cfg: &Config, out: &mut W) -> Result<ReportSummary, ReportError> {
    info!(
        database_url = %cfg.turso_database_url,
        auth_token = %utils::logging::redact(cfg.auth_token()),
        guild_id = %cfg.guild_id,
        report_format = ?cfg.report_format,
        on_duplicate = ?cfg.on_duplicate,
        "Starting resource image report"
    );

    let db = Database::connect(cfg).await?;
    Reporter::from_config(cfg).run(&db, out).await
}
