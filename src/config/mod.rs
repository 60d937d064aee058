mod database;

pub use database::DatabaseTarget;

use crate::error::ReportError;
use crate::report::{DuplicatePolicy, ReportFormat};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, path::PathBuf, time::Duration};

/// Partition the report is scoped to unless `GUILD_ID` says otherwise.
pub const DEFAULT_GUILD_ID: &str = "house-melange";

pub const DEFAULT_LOGLEVEL: &str = "warn";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variables consulted by [`Config::figment`]. Matching is case-insensitive.
const ENV_KEYS: &[&str] = &[
    "turso_database_url",
    "turso_auth_token",
    "guild_id",
    "report_format",
    "on_duplicate",
    "http_timeout_secs",
    "loglevel",
];

/// String-typed settings whose env values must reach serde verbatim. Figment parses env values,
/// so `GUILD_ID=007` would otherwise arrive as the integer 7.
const STRING_ENV_KEYS: &[&str] = &[
    "turso_database_url",
    "turso_auth_token",
    "guild_id",
    "loglevel",
];

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Database endpoint (`libsql://`, `https://`, `file:`, `sqlite:`).
    /// Env: `TURSO_DATABASE_URL`. Required.
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub turso_database_url: String,

    /// Bearer token for the remote database.
    /// Env: `TURSO_AUTH_TOKEN`. Ignored for local files.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub turso_auth_token: Option<String>,

    /// Env: `GUILD_ID`. Default: `house-melange`.
    #[serde(default = "default_guild_id", deserialize_with = "deserialize_string_lax")]
    pub guild_id: String,

    /// Env: `REPORT_FORMAT` (`snippet` or `json`). Default: `snippet`.
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Env: `ON_DUPLICATE` (`last_wins` or `reject`). Default: `last_wins`.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,

    /// Whole-request timeout for the remote backend. Must be at least 1.
    /// Env: `HTTP_TIMEOUT_SECS`. Default: `30`.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Log level for the tracing subscriber; `RUST_LOG` takes precedence.
    /// Env: `LOGLEVEL`. Default: `warn`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            turso_database_url: String::new(),
            turso_auth_token: None,
            guild_id: default_guild_id(),
            report_format: ReportFormat::default(),
            on_duplicate: DuplicatePolicy::default(),
            http_timeout_secs: default_http_timeout_secs(),
            loglevel: default_loglevel(),
        }
    }
}

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, and the environment.
    /// Env names match case-insensitively.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment
            .merge(Env::raw().only(ENV_KEYS))
            .merge(Serialized::defaults(raw_string_env()))
    }

    /// Loads configuration from all sources and validates required fields.
    pub fn load() -> Result<Self, ReportError> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ReportError> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.turso_database_url.trim().is_empty() {
            return Err(ReportError::MissingSetting("TURSO_DATABASE_URL"));
        }
        if self.guild_id.trim().is_empty() {
            return Err(ReportError::MissingSetting("GUILD_ID"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ReportError::InvalidSetting {
                key: "HTTP_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    pub fn database_target(&self) -> Result<DatabaseTarget, ReportError> {
        DatabaseTarget::parse(&self.turso_database_url)
    }

    /// Token with blank values treated as absent.
    pub fn auth_token(&self) -> Option<&str> {
        self.turso_auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn raw_string_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            let key = STRING_ENV_KEYS
                .iter()
                .find(|key| key.eq_ignore_ascii_case(&name))?;
            Some(((*key).to_string(), value.into_string().ok()?))
        })
        .collect()
}

fn default_guild_id() -> String {
    DEFAULT_GUILD_ID.to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_loglevel() -> String {
    DEFAULT_LOGLEVEL.to_string()
}

// `config.toml` may spell an all-digit token or guild id as a bare number.
fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or a number")),
    }
}

fn deserialize_opt_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(serde::de::Error::custom("expected a string or a number")),
    }
}
