use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

use takeout_model::Bookmark;

/// Column header, written even when there are no rows.
pub const HEADER: [&str; 4] = ["title", "url", "tags", "addedAt"];

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to create output file {}: {source}", .path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Flush(#[from] io::Error),
}

#[derive(Serialize)]
struct Row<'a> {
    title: &'a str,
    url: &'a str,
    tags: &'a str,
    added_at: &'a str,
}

impl<'a> From<&'a Bookmark> for Row<'a> {
    fn from(bookmark: &'a Bookmark) -> Self {
        Self {
            title: bookmark.title(),
            url: &bookmark.url,
            tags: &bookmark.tags,
            added_at: &bookmark.added_at,
        }
    }
}

/// Write the header and one row per bookmark, in the order given.
///
/// Fields are quoted only when they contain a comma, quote, or line break.
/// Rows end with `\n`. The writer is flushed before returning.
pub fn write_bookmarks<W: io::Write>(writer: W, bookmarks: &[Bookmark]) -> Result<(), EmitError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for bookmark in bookmarks {
        wtr.serialize(Row::from(bookmark))?;
    }
    wtr.flush()?;

    Ok(())
}

/// Create (or truncate) `path` and write the bookmarks to it as CSV.
pub fn write_bookmarks_to_path(path: impl AsRef<Path>, bookmarks: &[Bookmark]) -> Result<(), EmitError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| EmitError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;

    write_bookmarks(BufWriter::new(file), bookmarks)?;
    tracing::info!(path = %path.display(), rows = bookmarks.len(), "Wrote CSV");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bookmarks: &[Bookmark]) -> String {
        let mut out = Vec::new();
        write_bookmarks(&mut out, bookmarks).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(render(&[]), "title,url,tags,addedAt\n");
    }

    #[test]
    fn test_unresolved_placeholder_row() {
        let bookmarks = [Bookmark::new("http://x", "http://x", "t1,t2", "1970/01/01")];
        assert_eq!(
            render(&bookmarks),
            "title,url,tags,addedAt\nhttp://x,http://x,\"t1,t2\",1970/01/01\n"
        );
    }

    #[test]
    fn test_resolved_title_row() {
        let mut bookmark = Bookmark::new("http://x", "http://x", "", "2023/11/14");
        bookmark.apply_resolved_title("My Page".into());
        assert_eq!(
            render(&[bookmark]),
            "title,url,tags,addedAt\nMy Page,http://x,,2023/11/14\n"
        );
    }

    #[test]
    fn test_quoting() {
        let bookmarks = [
            Bookmark::new("Say \"hi\"", "http://q", "", "2020/01/01"),
            Bookmark::new("two\nlines", "http://n", "only", "2020/01/01"),
        ];
        assert_eq!(
            render(&bookmarks),
            "title,url,tags,addedAt\n\
             \"Say \"\"hi\"\"\",http://q,,2020/01/01\n\
             \"two\nlines\",http://n,only,2020/01/01\n"
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let bookmarks: Vec<Bookmark> = ["c", "a", "b"]
            .iter()
            .map(|t| Bookmark::new(*t, format!("http://{t}"), "", "2020/01/01"))
            .collect();
        let out = render(&bookmarks);
        let titles: Vec<&str> = out.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let bookmarks = [Bookmark::new("T", "http://t", "a,b", "2021/02/03")];

        write_bookmarks_to_path(&path, &bookmarks).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "title,url,tags,addedAt\nT,http://t,\"a,b\",2021/02/03\n");
    }

    #[test]
    fn test_uncreatable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = write_bookmarks_to_path(&path, &[]).unwrap_err();
        assert!(matches!(err, EmitError::CreateOutput { .. }));
    }
}
