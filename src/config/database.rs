use crate::error::ReportError;
use std::path::PathBuf;
use url::Url;

/// Where the resources table lives, derived from `TURSO_DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Remote libSQL server, addressed by its HTTP base URL.
    Remote(Url),
    /// SQLite file on local disk.
    Local(PathBuf),
}

impl DatabaseTarget {
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReportError::MissingSetting("TURSO_DATABASE_URL"));
        }

        if let Some(path) = strip_local_prefix(raw) {
            if path.is_empty() {
                return Err(invalid(raw, "missing file path"));
            }
            return Ok(DatabaseTarget::Local(PathBuf::from(path)));
        }

        let url = Url::parse(raw)?;
        let http_scheme = match url.scheme() {
            "http" | "https" => return Ok(DatabaseTarget::Remote(url)),
            "libsql" | "wss" => "https",
            "ws" => "http",
            other => return Err(invalid(raw, &format!("scheme `{other}` is not supported"))),
        };

        // `Url::set_scheme` refuses to move between special and non-special schemes.
        let rest = &raw[url.scheme().len()..];
        let url = Url::parse(&format!("{http_scheme}{rest}"))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid(raw, "missing host"));
        }
        Ok(DatabaseTarget::Remote(url))
    }
}

fn strip_local_prefix(raw: &str) -> Option<&str> {
    ["sqlite://", "sqlite:", "file://", "file:"]
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .map(|rest| rest.split('?').next().unwrap_or(rest))
}

fn invalid(raw: &str, reason: &str) -> ReportError {
    ReportError::InvalidDatabaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    }
}
