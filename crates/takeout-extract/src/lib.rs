use chrono::{Local, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use takeout_model::Bookmark;

pub mod anchors;
pub mod dom;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a Pocket export from disk.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; the HTML
/// parser recovers from anything else.
pub fn read_export(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExtractError::InputNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| ExtractError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read export file");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract every bookmark from an export document, dating them in local time.
pub fn extract_bookmarks(html: &str) -> Vec<Bookmark> {
    extract_bookmarks_in(html, &Local)
}

/// Extract every bookmark from an export document, in document order.
pub fn extract_bookmarks_in<Tz>(html: &str, tz: &Tz) -> Vec<Bookmark>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let document = scraper::Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!(errors = document.errors.len(), "Export HTML parsed with recoverable errors");
    }
    anchors::collect_bookmarks(&document, tz)
}
