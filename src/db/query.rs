//! SQL issued against the `resources` table. Read-only.

/// Name and image URL of every resource in one guild, ordered by name.
/// Takes the guild id as its single positional parameter.
pub const RESOURCE_IMAGES_SQL: &str =
    "SELECT name, image_url FROM resources WHERE guild_id = ? ORDER BY name";

pub const NAME_COLUMN: &str = "name";
pub const IMAGE_URL_COLUMN: &str = "image_url";
