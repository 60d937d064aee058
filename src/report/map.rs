use crate::db::ResourceImageRow;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map::Entry};
use tracing::warn;

/// What to do when two rows share a resource name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier one.
    #[default]
    LastWins,
    /// Abort on the first collision.
    Reject,
}

/// Resource name to image URL, iterated in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageMap(BTreeMap<String, String>);

impl ImageMap {
    /// Keeps rows with a non-empty URL; NULL and `""` are both dropped.
    pub fn from_rows<I>(rows: I, policy: DuplicatePolicy) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = ResourceImageRow>,
    {
        let mut map = Self::default();
        for row in rows {
            let Some(url) = row.usable_image_url() else {
                continue;
            };
            let url = url.to_string();
            map.insert(row.name, url, policy)?;
        }
        Ok(map)
    }

    pub fn insert(
        &mut self,
        name: String,
        url: String,
        policy: DuplicatePolicy,
    ) -> Result<(), ReportError> {
        match self.0.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(url);
            }
            Entry::Occupied(mut slot) => {
                if policy == DuplicatePolicy::Reject {
                    return Err(ReportError::DuplicateName(slot.key().clone()));
                }
                warn!(
                    name = %slot.key(),
                    previous = %slot.get(),
                    "Duplicate resource name; keeping the later image URL"
                );
                slot.insert(url);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
