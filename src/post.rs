//! Defines the [`PostId`] type and [`enumerate_posts`], which lists the posts
//! in a source directory from most to least recent.

use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The identifier of a post: the name of its source file less the extension
/// (e.g., the ID for `posts/2024-03-15-hello.md` is `2024-03-15-hello`). Post
/// names begin with a `YYYY-MM-DD-` date, so sorting IDs lexicographically
/// sorts posts chronologically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(String);

impl PostId {
    pub fn new<S: Into<String>>(id: S) -> PostId {
        PostId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the year prefix of the ID: its first four characters, or the
    /// whole ID if it's shorter than that.
    pub fn year(&self) -> &str {
        match self.0.char_indices().nth(4) {
            Some((i, _)) => &self.0[..i],
            None => &self.0,
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lists the entries of `dir` (without descending into subdirectories) and
/// returns their IDs, most recent first. Entries are ordered by their raw
/// names in descending order and then stripped of their extension. Hidden
/// entries (names starting with `.`) are skipped; nothing else is filtered.
pub fn enumerate_posts(dir: &Path) -> Result<Vec<PostId>> {
    let mut posts = Vec::new();
    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| b.file_name().cmp(a.file_name()))
    {
        let entry = result?;
        let file_name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::InvalidFileName(entry.path().to_owned()))?;
        if file_name.starts_with('.') {
            continue;
        }

        // `file_stem` only returns `None` for paths with no file name, which
        // can't happen for a directory entry.
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);
        posts.push(PostId::new(stem));
    }

    tracing::debug!(directory = %dir.display(), count = posts.len(), "enumerated posts");
    Ok(posts)
}

/// The result of a post-enumeration operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error enumerating posts.
#[derive(Debug)]
pub enum Error {
    /// Returned when the posts directory (or one of its entries) couldn't be
    /// read.
    Walk(walkdir::Error),

    /// Returned when an entry's name isn't valid UTF-8.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Walk(err) => match err.path() {
                Some(path) => {
                    write!(f, "Reading posts from '{}': {}", path.display(), err)
                }
                None => write!(f, "Reading posts: {}", err),
            },
            Error::InvalidFileName(path) => {
                write!(f, "invalid file name: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Walk(err) => Some(err),
            Error::InvalidFileName(_) => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while walking the posts directory.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn touch(dir: &Path, names: &[&str]) -> std::io::Result<()> {
        for name in names {
            fs::write(dir.join(name), "")?;
        }
        Ok(())
    }

    #[test]
    fn test_enumerate_posts_reverse_chronological() -> TestResult {
        let dir = TempDir::new()?;
        touch(
            dir.path(),
            &[
                "2021-01-02-second.md",
                "2023-07-30-fourth.rst",
                "2021-01-01-first.md",
                "2022-12-31-third.ipynb",
            ],
        )?;

        let wanted: Vec<PostId> = vec![
            PostId::new("2023-07-30-fourth"),
            PostId::new("2022-12-31-third"),
            PostId::new("2021-01-02-second"),
            PostId::new("2021-01-01-first"),
        ];
        assert_eq!(wanted, enumerate_posts(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_enumerate_posts_sorts_by_raw_name() -> TestResult {
        let dir = TempDir::new()?;
        touch(dir.path(), &["b.md", "a.tar.gz", "c", "B.md"])?;
        fs::create_dir(dir.path().join("d-bundle"))?;

        let got: Vec<String> = enumerate_posts(dir.path())?
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(vec!["d-bundle", "c", "b", "a.tar", "B"], got);
        Ok(())
    }

    #[test]
    fn test_enumerate_posts_skips_hidden_entries() -> TestResult {
        let dir = TempDir::new()?;
        touch(dir.path(), &[".DS_Store", "2024-03-15-hello.md"])?;
        assert_eq!(
            vec![PostId::new("2024-03-15-hello")],
            enumerate_posts(dir.path())?
        );
        Ok(())
    }

    #[test]
    fn test_enumerate_posts_missing_directory() {
        let dir = TempDir::new().unwrap();
        match enumerate_posts(&dir.path().join("nope")) {
            Err(Error::Walk(_)) => {}
            other => panic!("wanted a walk error, got {:?}", other),
        }
    }

    #[test]
    fn test_year() {
        assert_eq!("2024", PostId::new("2024-03-15-hello").year());
        assert_eq!("abc", PostId::new("abc").year());
        assert_eq!("ünïc", PostId::new("ünïcode").year());
    }
}
