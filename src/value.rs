//! Conversions from domain values into template [`Value`]s.

use crate::post::PostId;
use gtmpl_value::Value;
use std::collections::HashMap;

/// A link to another document in a table of contents. Renders as an object
/// with a `name` (the post ID, tag, or year) and a `doc` (the document path,
/// e.g. `/posts/2024-03-15-hello` or `/contents/tag-rust`).
pub struct DocLink<'a> {
    pub name: &'a str,
    pub doc: String,
}

impl<'a> DocLink<'a> {
    pub fn post(posts_path: &str, id: &'a PostId) -> DocLink<'a> {
        DocLink {
            name: id.as_str(),
            doc: format!("/{}/{}", posts_path, id),
        }
    }
}

impl From<&DocLink<'_>> for Value {
    fn from(link: &DocLink<'_>) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("name".to_owned(), Value::String(link.name.to_owned()));
        m.insert("doc".to_owned(), Value::String(link.doc.clone()));
        Value::Object(m)
    }
}

/// Builds a [`Value::Array`] from a sequence of links.
pub fn links<'a, I>(links: I) -> Value
where
    I: IntoIterator<Item = DocLink<'a>>,
{
    Value::Array(links.into_iter().map(|link| Value::from(&link)).collect())
}

/// Builds a [`Value::Object`] from named fields.
pub fn object<I>(fields: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    Value::Object(
        fields
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect(),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_post_link() {
        let id = PostId::new("2024-03-15-hello");
        let value = Value::from(&DocLink::post("posts", &id));
        match value {
            Value::Object(m) => {
                let field = |name: &str| match m.get(name) {
                    Some(Value::String(s)) => s.clone(),
                    _ => panic!("missing string field `{}`", name),
                };
                assert_eq!("2024-03-15-hello", field("name"));
                assert_eq!("/posts/2024-03-15-hello", field("doc"));
            }
            _ => panic!("wanted an object"),
        }
    }
}
