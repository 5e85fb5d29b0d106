//! Exports [`build_redirects`] and [`build_contents`], which stitch together
//! the steps of each generator: enumerating posts ([`crate::post`]), deriving
//! redirects ([`crate::redirect`]) or grouping posts ([`crate::index`]), and
//! rendering the resulting pages to disk ([`crate::write`]).

use crate::config::Config;
use crate::index::Index;
use crate::meta::{Error as MetadataError, Metadata};
use crate::post::{enumerate_posts, Error as EnumerateError, PostId};
use crate::redirect::{InvalidIdentifierError, Redirect};
use crate::templates;
use crate::value::{self, DocLink};
use crate::write::{write_pages, Error as WriteError, Page};
use gtmpl::{Template, Value};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes a redirect page at the legacy location of every post. Every post
/// ID is checked before anything is written, so an invalid ID leaves the
/// output untouched. Returns the number of pages written.
pub fn build_redirects(config: &Config) -> Result<usize> {
    let posts = enumerate_posts(&config.posts_source_directory)?;
    let redirects = posts
        .iter()
        .map(|id| Redirect::new(&config.redirects_output_directory, &config.posts_path, id))
        .collect::<std::result::Result<Vec<Redirect>, InvalidIdentifierError>>()?;

    let template = parse_template(config.redirect_template.as_deref(), templates::REDIRECT)?;
    let written = write_pages(redirects.into_iter().map(|redirect| Page {
        item: value::object(vec![("target", Value::String(redirect.target))]),
        file_path: redirect.legacy_path,
        template: &template,
    }))?;

    tracing::info!(count = written, "wrote redirects");
    Ok(written)
}

/// Writes the table-of-contents documents: one per year, one per tag, and
/// the master `contents` document. Returns the number of documents written.
pub fn build_contents(config: &Config) -> Result<usize> {
    let posts = enumerate_posts(&config.posts_source_directory)?;
    let metadata = Metadata::from_file(&config.metadata_file, config.slugify_tags)?;
    let index = Index::new(&posts, &metadata);

    let index_template = parse_template(config.index_template.as_deref(), templates::INDEX)?;
    let contents_template =
        parse_template(config.contents_template.as_deref(), templates::CONTENTS)?;

    let contents = Contents { config, index: &index };
    let written = write_pages(
        contents
            .year_pages(&index_template)
            .into_iter()
            .chain(contents.tag_pages(&index_template))
            .chain(std::iter::once(contents.master_page(&contents_template))),
    )?;

    tracing::info!(count = written, "wrote contents");
    Ok(written)
}

/// Lays out the table-of-contents documents for an [`Index`].
struct Contents<'c, 'a> {
    config: &'c Config,
    index: &'c Index<'a>,
}

impl<'c, 'a> Contents<'c, 'a> {
    /// The file stem (and document name) for a year's page.
    fn year_name(year: &str) -> String {
        format!("year-{}", year)
    }

    /// The file stem (and document name) for a tag's page.
    fn tag_name(tag: &str) -> String {
        format!("tag-{}", tag)
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.config
            .contents_output_directory
            .join(format!("{}.{}", name, self.config.contents_extension))
    }

    fn doc_link<'n>(&self, name: &'n str, file_name: &str) -> DocLink<'n> {
        DocLink {
            name,
            doc: format!("/{}/{}", self.config.contents_path, file_name),
        }
    }

    fn group_page<'t>(
        &self,
        title: &str,
        name: &str,
        posts: &[&PostId],
        template: &'t Template,
    ) -> Page<'t> {
        Page {
            item: value::object(vec![
                ("title", Value::String(title.to_owned())),
                (
                    "posts",
                    value::links(
                        posts
                            .iter()
                            .map(|id| DocLink::post(&self.config.posts_path, id)),
                    ),
                ),
            ]),
            file_path: self.file_path(name),
            template,
        }
    }

    fn year_pages<'t>(&self, template: &'t Template) -> Vec<Page<'t>> {
        self.index
            .years()
            .map(|(year, posts)| self.group_page(year, &Self::year_name(year), posts, template))
            .collect()
    }

    fn tag_pages<'t>(&self, template: &'t Template) -> Vec<Page<'t>> {
        self.index
            .tags()
            .map(|(tag, posts)| self.group_page(tag, &Self::tag_name(tag), posts, template))
            .collect()
    }

    /// The master document: the latest posts, every tag in ascending order,
    /// and every year in descending order.
    fn master_page<'t>(&self, template: &'t Template) -> Page<'t> {
        let tag_names: Vec<(&str, String)> = self
            .index
            .tags()
            .map(|(tag, _)| (tag, Self::tag_name(tag)))
            .collect();
        let year_names: Vec<(&str, String)> = self
            .index
            .years()
            .map(|(year, _)| (year, Self::year_name(year)))
            .collect();

        Page {
            item: value::object(vec![
                (
                    "latest",
                    value::links(
                        self.index
                            .latest(self.config.latest_count)
                            .iter()
                            .map(|id| DocLink::post(&self.config.posts_path, id)),
                    ),
                ),
                (
                    "tags",
                    value::links(tag_names.iter().map(|(tag, name)| self.doc_link(tag, name))),
                ),
                (
                    "years",
                    value::links(year_names.iter().map(|(year, name)| self.doc_link(year, name))),
                ),
            ]),
            file_path: self.file_path("contents"),
            template,
        }
    }
}

/// Loads the template file at `path` if there is one and parses it; otherwise
/// parses the `builtin` template.
fn parse_template(path: Option<&Path>, builtin: &str) -> Result<Template> {
    let contents = match path {
        None => builtin.to_owned(),
        Some(path) => {
            use std::io::Read;
            let mut contents = String::new();
            File::open(path)
                .and_then(|mut file| file.read_to_string(&mut contents))
                .map_err(|err| Error::OpenTemplateFile {
                    path: path.to_owned(),
                    err,
                })?;
            contents
        }
    };

    let mut template = Template::default();
    template
        .parse(&contents)
        .map_err(|e| Error::ParseTemplate(e.to_string()))?;
    Ok(template)
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building redirects or contents. Errors can occur while
/// enumerating posts, loading metadata, validating post IDs, loading
/// templates, or writing pages.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors listing the posts directory.
    Enumerate(EnumerateError),

    /// Returned for errors loading post metadata.
    Metadata(MetadataError),

    /// Returned for post IDs with no legacy location.
    InvalidIdentifier(InvalidIdentifierError),

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for errors rendering or writing pages.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Enumerate(err) => err.fmt(f),
            Error::Metadata(err) => err.fmt(f),
            Error::InvalidIdentifier(err) => err.fmt(f),
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Enumerate(err) => Some(err),
            Error::Metadata(err) => Some(err),
            Error::InvalidIdentifier(err) => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Write(err) => Some(err),
        }
    }
}

impl From<EnumerateError> for Error {
    /// Converts [`EnumerateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: EnumerateError) -> Error {
        Error::Enumerate(err)
    }
}

impl From<MetadataError> for Error {
    /// Converts [`MetadataError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: MetadataError) -> Error {
        Error::Metadata(err)
    }
}

impl From<InvalidIdentifierError> for Error {
    /// Converts [`InvalidIdentifierError`]s into [`Error`]. This allows us to
    /// use the `?` operator.
    fn from(err: InvalidIdentifierError) -> Error {
        Error::InvalidIdentifier(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
