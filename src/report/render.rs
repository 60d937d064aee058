use crate::error::ReportError;
use crate::report::ImageMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Copy-paste snippet of `imageUrl: '...'` lines.
    #[default]
    Snippet,
    /// Pretty-printed `{ name: url }` object.
    Json,
}

/// Writes the snippet report:
///
/// ```text
/// Found 2 resources with images
///
/// Add imageUrl to each resource like this:
/// imageUrl: '<URL>',
///
/// Here's the mapping:
///
///   // Agave Seeds
///   imageUrl: 'https://...',
///
/// ```
pub fn write_snippet<W: Write>(map: &ImageMap, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Found {} resources with images", map.len())?;
    writeln!(out)?;
    writeln!(out, "Add imageUrl to each resource like this:")?;
    writeln!(out, "imageUrl: '<URL>',")?;
    writeln!(out)?;
    writeln!(out, "Here's the mapping:")?;
    writeln!(out)?;

    for (name, url) in map.iter() {
        writeln!(out, "  // {}", single_line(name))?;
        writeln!(out, "  imageUrl: '{}',", escape_single_quoted(url))?;
        writeln!(out)?;
    }
    out.flush()
}

pub fn write_json<W: Write>(map: &ImageMap, out: &mut W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, map)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(
    map: &ImageMap,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Snippet => Ok(write_snippet(map, out)?),
        ReportFormat::Json => write_json(map, out),
    }
}

/// Escapes `\` and `'` so the value stays inside a single-quoted literal.
fn escape_single_quoted(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

// A line break in a name would end the `//` comment early.
fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(s)
    }
}
