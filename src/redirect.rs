//! Derives the legacy URL of each post. Posts used to be served from nested
//! paths like `/2024/03/15/hello.html` and are now served from
//! `/posts/2024-03-15-hello.html`; a [`Redirect`] maps the former onto the
//! latter.

use crate::post::PostId;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

/// The number of directories between the output root and a legacy page
/// (year, month, day).
const LEGACY_DEPTH: usize = 3;

/// A redirect from a post's legacy location to its canonical one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Where the redirect page is written, e.g.
    /// `{output_directory}/2024/03/15/hello.html`.
    pub legacy_path: PathBuf,

    /// The canonical location relative to the legacy page, e.g.
    /// `../../../posts/2024-03-15-hello.html`.
    pub target: String,
}

impl Redirect {
    /// Derives the redirect for `id`. The ID must look like
    /// `YYYY-MM-DD-slug` where the prefix is a real date; the first three
    /// `-` become directories and the rest of the ID is kept as the file
    /// name. `posts_path` is the canonical posts directory relative to the
    /// output root (typically `posts`).
    pub fn new(
        output_directory: &Path,
        posts_path: &str,
        id: &PostId,
    ) -> Result<Redirect, InvalidIdentifierError> {
        let (year, month, day, slug) = split_date_prefix(id.as_str())
            .ok_or_else(|| InvalidIdentifierError(id.clone()))?;

        Ok(Redirect {
            legacy_path: output_directory
                .join(year)
                .join(month)
                .join(day)
                .join(format!("{}.html", slug)),
            target: format!("{}{}/{}.html", "../".repeat(LEGACY_DEPTH), posts_path, id),
        })
    }
}

/// Splits `YYYY-MM-DD-slug` into its parts, returning `None` unless the
/// prefix is a valid calendar date and the slug is non-empty.
fn split_date_prefix(id: &str) -> Option<(&str, &str, &str, &str)> {
    let mut parts = id.splitn(LEGACY_DEPTH + 1, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    let slug = parts.next()?;

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) || !digits(day, 2) || slug.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&id[..10], "%Y-%m-%d").ok()?;
    Some((year, month, day, slug))
}

/// Returned for post IDs which don't begin with a `YYYY-MM-DD-` date and so
/// have no legacy location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifierError(pub PostId);

impl fmt::Display for InvalidIdentifierError {
    /// Displays an [`InvalidIdentifierError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "post ID `{}` doesn't begin with a `YYYY-MM-DD-` date",
            self.0
        )
    }
}

impl std::error::Error for InvalidIdentifierError {}
