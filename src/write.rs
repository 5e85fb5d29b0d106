//! Renders [`Page`]s with their templates and writes them to disk.

use gtmpl::{Context, Template, Value};
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An object representing an output file: a template, the value to render it
/// with, and the location on disk to write the result.
pub struct Page<'a> {
    /// The value passed to the template as `.`.
    pub item: Value,

    /// The target location on disk for the output file.
    pub file_path: PathBuf,

    /// The template with which the page will be rendered.
    pub template: &'a Template,
}

impl Page<'_> {
    /// Renders the page into memory.
    fn render(&self) -> Result<Vec<u8>> {
        let template_error = |err: String| Error::Template {
            path: self.file_path.clone(),
            err,
        };
        let context =
            Context::from(self.item.clone()).map_err(|e| template_error(e.to_string()))?;
        let mut contents = Vec::new();
        self.template
            .execute(&mut contents, &context)
            .map_err(|e| template_error(e.to_string()))?;
        Ok(contents)
    }

    /// Renders the page and writes it to disk, replacing any existing file.
    fn write(&self) -> Result<()> {
        let contents = self.render()?;
        std::fs::write(&self.file_path, contents).map_err(|err| Error::WriteFile {
            path: self.file_path.clone(),
            err,
        })
    }
}

/// Renders and writes each page in turn, creating parent directories as
/// needed. Stops at the first failure. Returns the number of pages written.
pub fn write_pages<'a>(pages: impl IntoIterator<Item = Page<'a>>) -> Result<usize> {
    let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
    let mut written = 0;
    for page in pages {
        if let Some(dir) = page.file_path.parent() {
            if seen_dirs.insert(dir.to_owned()) {
                create_dir_all(dir)?;
            }
        }
        page.write()?;
        tracing::info!(path = %page.file_path.display(), "wrote");
        written += 1;
    }
    Ok(written)
}

fn create_dir_all(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::CreateDir {
        path: dir.to_owned(),
        err,
    })
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template { path: PathBuf, err: String },

    /// An error creating an output directory.
    CreateDir { path: PathBuf, err: io::Error },

    /// An error writing an output file.
    WriteFile { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template { path, err } => {
                write!(f, "Rendering '{}': {}", path.display(), err)
            }
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::WriteFile { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template { .. } => None,
            Error::CreateDir { path: _, err } => Some(err),
            Error::WriteFile { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn template(text: &str) -> Template {
        let mut template = Template::default();
        template.parse(text).unwrap();
        template
    }

    fn item(name: &str) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("name".to_owned(), Value::String(name.to_owned()));
        Value::Object(m)
    }

    #[test]
    fn test_write_pages_creates_directories() -> TestResult {
        let dir = TempDir::new()?;
        let template = template("Hello, {{.name}}!");
        let pages = vec![
            Page {
                item: item("world"),
                file_path: dir.path().join("a/b/world.txt"),
                template: &template,
            },
            Page {
                item: item("there"),
                file_path: dir.path().join("a/b/there.txt"),
                template: &template,
            },
        ];

        assert_eq!(2, write_pages(pages)?);
        assert_eq!(
            "Hello, world!",
            std::fs::read_to_string(dir.path().join("a/b/world.txt"))?
        );
        assert_eq!(
            "Hello, there!",
            std::fs::read_to_string(dir.path().join("a/b/there.txt"))?
        );
        Ok(())
    }

    #[test]
    fn test_write_pages_overwrites() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("page.txt");
        std::fs::write(&path, "a much longer stale page that should vanish")?;

        let template = template("{{.name}}");
        write_pages(vec![Page {
            item: item("fresh"),
            file_path: path.clone(),
            template: &template,
        }])?;
        assert_eq!("fresh", std::fs::read_to_string(&path)?);
        Ok(())
    }

    #[test]
    fn test_write_pages_unwritable() -> TestResult {
        let dir = TempDir::new()?;
        // a file where a directory should be
        std::fs::write(dir.path().join("blocker"), "")?;
        let template = template("{{.name}}");
        let result = write_pages(vec![Page {
            item: item("x"),
            file_path: dir.path().join("blocker/page.txt"),
            template: &template,
        }]);
        match result {
            Err(Error::CreateDir { .. }) => Ok(()),
            other => panic!("wanted a create-dir error, got {:?}", other),
        }
    }
}
