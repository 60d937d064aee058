use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `SELECT name, image_url FROM resources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct ResourceImageRow {
    pub name: String,
    pub image_url: Option<String>,
}

impl ResourceImageRow {
    pub fn new(name: impl Into<String>, image_url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.map(str::to_string),
        }
    }

    /// The URL if present and non-empty.
    pub fn usable_image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }
}
