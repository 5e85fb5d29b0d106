use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file, searched for in the project directory and
/// its ancestors.
pub const PROJECT_FILE: &str = "blogindex.yaml";

#[derive(Deserialize)]
struct LatestCount(usize);
impl Default for LatestCount {
    fn default() -> Self {
        LatestCount(5)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Templates {
    redirect: Option<PathBuf>,
    index: Option<PathBuf>,
    contents: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(default)]
struct Project {
    posts_directory: String,
    metadata_file: PathBuf,
    redirects_directory: PathBuf,
    contents_directory: String,
    contents_extension: String,
    latest_count: LatestCount,
    slugify_tags: bool,
    templates: Templates,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            posts_directory: String::from("posts"),
            metadata_file: PathBuf::from("post_meta.yaml"),
            redirects_directory: PathBuf::from("_build/html"),
            contents_directory: String::from("contents"),
            contents_extension: String::from("rst"),
            latest_count: LatestCount::default(),
            slugify_tags: false,
            templates: Templates::default(),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    /// The directory holding one source file (or bundle) per post.
    pub posts_source_directory: PathBuf,

    /// The posts directory relative to the project root with `/`
    /// separators, e.g. `posts`. Used for document paths
    /// (`/posts/{id}`) and redirect targets (`../../../posts/{id}.html`).
    pub posts_path: String,

    /// The YAML file mapping post IDs to their tags.
    pub metadata_file: PathBuf,

    /// The root under which legacy redirect pages are written.
    pub redirects_output_directory: PathBuf,

    /// The directory into which table-of-contents documents are written.
    pub contents_output_directory: PathBuf,

    /// The contents directory relative to the project root with `/`
    /// separators, e.g. `contents`.
    pub contents_path: String,

    /// The extension of table-of-contents documents, without the dot.
    pub contents_extension: String,

    /// How many posts the master contents document lists as "Latest".
    pub latest_count: usize,

    /// Whether tags are slugified before grouping.
    pub slugify_tags: bool,

    /// Replaces the built-in redirect page template.
    pub redirect_template: Option<PathBuf>,

    /// Replaces the built-in template for year and tag documents.
    pub index_template: Option<PathBuf>,

    /// Replaces the built-in template for the master contents document.
    pub contents_template: Option<PathBuf>,
}

impl Config {
    /// Finds the project file in `dir` or the nearest ancestor directory
    /// holding one and loads it. If there is no project file, the defaults
    /// are used relative to `dir`.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        for ancestor in dir.ancestors() {
            let path = ancestor.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path)
                    .with_context(|| format!("Loading configuration '{}'", path.display()));
            }
        }

        tracing::debug!(directory = %dir.display(), "no `{}` found; using defaults", PROJECT_FILE);
        Ok(Config::from_project(dir, Project::default()))
    }

    /// Loads the project file at `path`. Relative paths in the file are
    /// resolved against the directory that holds it.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .map_err(|e| anyhow!("Opening project file `{}`: {}", path.display(), e))?;
        let project: Project = serde_yaml::from_reader(file)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::from_project(project_root, project)),
        }
    }

    fn from_project(project_root: &Path, project: Project) -> Config {
        let resolve = |relpath: PathBuf| project_root.join(relpath);
        Config {
            posts_source_directory: project_root.join(&project.posts_directory),
            posts_path: document_path(&project.posts_directory),
            metadata_file: resolve(project.metadata_file),
            redirects_output_directory: resolve(project.redirects_directory),
            contents_output_directory: project_root.join(&project.contents_directory),
            contents_path: document_path(&project.contents_directory),
            contents_extension: project.contents_extension.trim_start_matches('.').to_owned(),
            latest_count: project.latest_count.0,
            slugify_tags: project.slugify_tags,
            redirect_template: project.templates.redirect.map(resolve),
            index_template: project.templates.index.map(resolve),
            contents_template: project.templates.contents.map(resolve),
        }
    }
}

/// Normalizes a project-relative directory into the form used in document
/// paths and URLs: `/` separators and no leading or trailing slashes.
fn document_path(dir: &str) -> String {
    dir.replace('\\', "/").trim_matches('/').to_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_project_file() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::from_directory(dir.path())?;
        assert_eq!(dir.path().join("posts"), config.posts_source_directory);
        assert_eq!("posts", config.posts_path);
        assert_eq!(dir.path().join("post_meta.yaml"), config.metadata_file);
        assert_eq!(dir.path().join("_build/html"), config.redirects_output_directory);
        assert_eq!(dir.path().join("contents"), config.contents_output_directory);
        assert_eq!("contents", config.contents_path);
        assert_eq!("rst", config.contents_extension);
        assert_eq!(5, config.latest_count);
        assert!(!config.slugify_tags);
        assert!(config.redirect_template.is_none());
        Ok(())
    }

    #[test]
    fn test_project_file_in_ancestor() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "posts_directory: content/posts/\n\
             contents_extension: .md\n\
             latest_count: 3\n\
             slugify_tags: true\n\
             templates:\n  index: theme/index.md\n",
        )?;
        let nested = dir.path().join("content/drafts");
        std::fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!(dir.path().join("content/posts/"), config.posts_source_directory);
        assert_eq!("content/posts", config.posts_path);
        assert_eq!(dir.path().join("post_meta.yaml"), config.metadata_file);
        assert_eq!("md", config.contents_extension);
        assert_eq!(3, config.latest_count);
        assert!(config.slugify_tags);
        assert_eq!(Some(dir.path().join("theme/index.md")), config.index_template);
        assert_eq!(None, config.contents_template);
        Ok(())
    }

    #[test]
    fn test_malformed_project_file() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join(PROJECT_FILE), "latest_count: many\n")?;
        assert!(Config::from_directory(dir.path()).is_err());
        Ok(())
    }
}
