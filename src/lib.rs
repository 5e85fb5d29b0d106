//! The library code for `blogindex`, which generates two kinds of auxiliary
//! pages for a blog whose posts live in a flat directory of
//! `YYYY-MM-DD-slug` files:
//!
//! 1. Redirect pages at each post's legacy nested location
//!    (`/2024/03/15/hello.html`) pointing at its canonical one
//!    (`/posts/2024-03-15-hello.html`). See [`build::build_redirects`].
//! 2. Table-of-contents documents grouping posts by year and by tag, plus a
//!    master document listing the latest posts, the tags, and the years. See
//!    [`build::build_contents`].
//!
//! Both start by enumerating the posts directory ([`post`]) and end by
//! rendering templates to disk ([`write`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod index;
pub mod logging;
pub mod meta;
pub mod post;
pub mod redirect;
pub mod templates;
pub mod value;
pub mod write;
