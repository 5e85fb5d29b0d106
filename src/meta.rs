//! Loads post metadata (currently just tags) from the project's metadata
//! document, a YAML mapping from post ID to a record:
//!
//! ```yaml
//! 2024-03-15-hello:
//!   tags: [greeting, meta]
//! 2023-01-01-untagged:
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The metadata record for a single post.
#[derive(Deserialize)]
struct Record {
    tags: Option<Vec<String>>,
}

/// Post metadata keyed by post ID.
#[derive(Debug, Default)]
pub struct Metadata {
    tags: HashMap<String, Vec<String>>,
}

impl Metadata {
    /// Loads metadata from a YAML file. If `slugify` is set, every tag is
    /// normalized with [`slug::slugify`] so that e.g. `macOS` and `MacOS`
    /// land in the same group.
    pub fn from_file(path: &Path, slugify: bool) -> Result<Metadata> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        Metadata::from_reader(file, path, slugify)
    }

    /// Parses metadata from `reader`. `path` only labels errors.
    fn from_reader<R: io::Read>(reader: R, path: &Path, slugify: bool) -> Result<Metadata> {
        let records: HashMap<String, Option<Record>> =
            serde_yaml::from_reader(reader).map_err(|err| Error::Parse {
                path: path.to_owned(),
                err,
            })?;
        Metadata::from_records(records, slugify).map_err(|err| Error::InvalidTag {
            path: path.to_owned(),
            err,
        })
    }

    fn from_records(
        records: HashMap<String, Option<Record>>,
        slugify: bool,
    ) -> std::result::Result<Metadata, InvalidTagError> {
        let mut tags = HashMap::with_capacity(records.len());
        for (id, record) in records {
            let mut post_tags: Vec<String> = Vec::new();
            for tag in record.and_then(|r| r.tags).unwrap_or_default() {
                let tag = match slugify {
                    true => slug::slugify(&tag),
                    false => tag,
                };
                if !is_file_name(&tag) {
                    return Err(InvalidTagError { id, tag });
                }
                if !post_tags.contains(&tag) {
                    post_tags.push(tag);
                }
            }
            tags.insert(id, post_tags);
        }
        Ok(Metadata { tags })
    }

    /// Returns the tags for the post `id` in the order they were listed,
    /// or `None` if the metadata has no entry for the post.
    pub fn tags(&self, id: &str) -> Option<&[String]> {
        self.tags.get(id).map(|tags| tags.as_slice())
    }

    /// Returns the IDs of every post with a metadata entry.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(|id| id.as_str())
    }
}

/// Tags name output files (`tag-{tag}.rst`), so each must be a single plain
/// path component: non-empty, no separators, not `.` or `..`.
fn is_file_name(tag: &str) -> bool {
    let mut components = Path::new(tag).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name == tag,
        _ => false,
    }
}

/// Returned for tags which can't be used as part of a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTagError {
    /// The post whose record lists the tag.
    pub id: String,

    /// The offending tag.
    pub tag: String,
}

impl fmt::Display for InvalidTagError {
    /// Displays an [`InvalidTagError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "post `{}` has tag {:?}, which isn't a valid file name",
            self.id, self.tag
        )
    }
}

impl std::error::Error for InvalidTagError {}

/// The result of a metadata-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading [`Metadata`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the metadata file couldn't be opened.
    Open { path: PathBuf, err: io::Error },

    /// Returned when the metadata file isn't a valid mapping of post IDs to
    /// records.
    Parse {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    /// Returned when a tag can't be used in an output file name (e.g. it
    /// contains a `/` or is `..`).
    InvalidTag { path: PathBuf, err: InvalidTagError },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening metadata file '{}': {}", path.display(), err)
            }
            Error::Parse { path, err } => {
                write!(f, "Parsing metadata file '{}': {}", path.display(), err)
            }
            Error::InvalidTag { path, err } => {
                write!(f, "Parsing metadata file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse { path: _, err } => Some(err),
            Error::InvalidTag { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn read(yaml: &str, slugify: bool) -> Result<Metadata> {
        Metadata::from_reader(yaml.as_bytes(), Path::new("post_meta.yaml"), slugify)
    }

    fn parse(yaml: &str, slugify: bool) -> Metadata {
        read(yaml, slugify).unwrap()
    }

    #[test]
    fn test_tags() {
        let meta = parse(
            "2024-03-15-hello:\n  tags: [a, b]\n  author: someone\n\
             2024-01-01-null:\n\
             2023-05-05-no-tags:\n  title: Untagged\n",
            false,
        );
        assert_eq!(
            Some(&["a".to_owned(), "b".to_owned()][..]),
            meta.tags("2024-03-15-hello")
        );
        assert_eq!(Some(&[][..]), meta.tags("2024-01-01-null"));
        assert_eq!(Some(&[][..]), meta.tags("2023-05-05-no-tags"));
        assert_eq!(None, meta.tags("2022-02-02-absent"));
        assert_eq!(3, meta.ids().count());
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let meta = parse("p:\n  tags: [rust, go, rust]\n", false);
        assert_eq!(Some(&["rust".to_owned(), "go".to_owned()][..]), meta.tags("p"));
    }

    #[test]
    fn test_slugify_tags() {
        let meta = parse("p:\n  tags: [macOS, MacOS, Machine Learning]\n", true);
        assert_eq!(
            Some(&["macos".to_owned(), "machine-learning".to_owned()][..]),
            meta.tags("p")
        );
    }

    #[test]
    fn test_malformed_document() {
        for yaml in &["- just\n- a list\n", "p: {tags: [a\n"] {
            match read(yaml, false) {
                Err(Error::Parse { .. }) => {}
                other => panic!("wanted a parse error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_tags_must_be_file_names() {
        for tag in &["../x", "CI/CD", "..", ".", "/abs", "trailing/", ""] {
            let yaml = format!("p:\n  tags: [ok, {:?}]\n", tag);
            match read(&yaml, false) {
                Err(Error::InvalidTag { err, .. }) => {
                    let wanted = InvalidTagError {
                        id: "p".to_owned(),
                        tag: tag.to_string(),
                    };
                    assert_eq!(wanted, err);
                }
                other => panic!("wanted an invalid-tag error for {:?}, got {:?}", tag, other),
            }
        }
    }

    #[test]
    fn test_slugified_tags_are_file_names() {
        let meta = parse("p:\n  tags: [\"CI/CD\", \"../x\"]\n", true);
        assert_eq!(Some(&["ci-cd".to_owned(), "x".to_owned()][..]), meta.tags("p"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        match Metadata::from_file(&dir.path().join("post_meta.yaml"), false) {
            Err(Error::Open { .. }) => {}
            other => panic!("wanted an open error, got {:?}", other),
        }
    }
}
