//! Groups posts by year and by tag for the table-of-contents pages.

use crate::meta::Metadata;
use crate::post::PostId;
use std::collections::{BTreeMap, HashSet};

/// The posts of a site grouped by year and by tag. Within every group posts
/// keep the order in which they were enumerated (most recent first).
pub struct Index<'a> {
    /// All posts, most recent first.
    posts: &'a [PostId],

    /// Posts keyed by [`PostId::year`].
    years: BTreeMap<&'a str, Vec<&'a PostId>>,

    /// Posts keyed by tag.
    tags: BTreeMap<String, Vec<&'a PostId>>,
}

impl<'a> Index<'a> {
    /// Indexes `posts` (which should already be in reverse-chronological
    /// order). Tags are looked up in `metadata`; posts without an entry
    /// belong to no tag, and entries for posts which weren't enumerated are
    /// ignored.
    pub fn new(posts: &'a [PostId], metadata: &Metadata) -> Index<'a> {
        let mut years: BTreeMap<&'a str, Vec<&'a PostId>> = BTreeMap::new();
        let mut tags: BTreeMap<String, Vec<&'a PostId>> = BTreeMap::new();

        for post in posts {
            years.entry(post.year()).or_default().push(post);

            for tag in metadata.tags(post.as_str()).unwrap_or_default() {
                match tags.get_mut(tag) {
                    None => {
                        tags.insert(tag.to_owned(), vec![post]);
                    }
                    Some(group) => group.push(post),
                }
            }
        }

        let known: HashSet<&str> = posts.iter().map(|p| p.as_str()).collect();
        for id in metadata.ids().filter(|id| !known.contains(id)) {
            tracing::debug!(post = id, "skipping metadata for unknown post");
        }

        Index { posts, years, tags }
    }

    /// Returns the `n` most recent posts (or all of them if there are fewer
    /// than `n`).
    pub fn latest(&self, n: usize) -> &'a [PostId] {
        &self.posts[..n.min(self.posts.len())]
    }

    /// Returns the year groups, most recent year first.
    pub fn years(&self) -> impl Iterator<Item = (&'a str, &[&'a PostId])> + '_ {
        self.years
            .iter()
            .rev()
            .map(|(year, posts)| (*year, posts.as_slice()))
    }

    /// Returns the tag groups ordered by tag.
    pub fn tags(&self) -> impl Iterator<Item = (&str, &[&'a PostId])> + '_ {
        self.tags
            .iter()
            .map(|(tag, posts)| (tag.as_str(), posts.as_slice()))
    }
}
