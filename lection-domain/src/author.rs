//! The `Author` record.

use serde::{Deserialize, Serialize};

/// An author as stored by a repository.
///
/// Both fields may be absent: `id` is assigned by storage, and nothing
/// stops a record from carrying no name, or an empty one.
///
/// ```
/// use lection_domain::author::Author;
///
/// let author = Author::new().with_id(1).with_name("plato");
/// assert_eq!(author.id(), Some(1));
/// assert_eq!(author.name(), Some("plato"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    id: Option<i64>,
    name: Option<String>,
}

impl Author {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_author_is_blank() {
        let author = Author::new();
        assert_eq!(author.id(), None);
        assert_eq!(author.name(), None);
    }

    #[test]
    fn setters_replace_fields() {
        let mut author = Author::new().with_id(2).with_name("aristotle");
        author.set_name(Some("Aristotle".into()));
        author.set_id(None);

        assert_eq!(author.name(), Some("Aristotle"));
        assert_eq!(author.id(), None);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let author: Author = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(author, Author::new().with_id(3));

        let author: Author = serde_json::from_str(r#"{"id": 4, "name": ""}"#).unwrap();
        assert_eq!(author.name(), Some(""));
    }
}
