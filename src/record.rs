//! Search index records.
//!
//! An [`IndexRecord`] describes one documentation fragment: where it lives
//! (`location`), the page it belongs to, its title, an optional text snippet
//! and a category tag. The category is kept as an open string; the
//! [`Category`] view only names the tags a documentation build is known to
//! emit.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names every record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["location", "page", "title", "category"];

/// Field name of the optional text snippet.
pub const TEXT_FIELD: &str = "text";

/// One documentation fragment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Page-relative anchor or URL fragment, e.g. `api/#Contents`.
    pub location: String,
    /// Name of the page the record belongs to.
    pub page: String,
    /// Human-readable title, possibly empty.
    pub title: String,
    /// Indexable text snippet, possibly empty.
    #[serde(default)]
    pub text: String,
    /// Category tag, usually `page`, `section` or `method`.
    pub category: String,
    /// Keys the generator emitted that this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IndexRecord {
    /// Create a record with no extra keys.
    pub fn new<L, P, T, X, C>(location: L, page: P, title: T, text: X, category: C) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        T: Into<String>,
        X: Into<String>,
        C: Into<String>,
    {
        IndexRecord {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category: category.into(),
            extra: Map::new(),
        }
    }

    /// Typed view of the category tag.
    pub fn category_kind(&self) -> Category<'_> {
        Category::from_tag(&self.category)
    }

    /// The part of `location` before `#`.
    pub fn path(&self) -> &str {
        match self.location.split_once('#') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    /// The fragment after `#` in `location`, if there is one.
    pub fn anchor(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, anchor)| anchor)
    }

    /// Returns true if the record carries no text (heading-only entries).
    pub fn is_structural(&self) -> bool {
        self.text.is_empty()
    }
}

/// Known category tags, with a catch-all for anything a newer generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category<'a> {
    /// A whole page, or a block of page text.
    Page,
    /// A heading within a page.
    Section,
    /// A documented method or function.
    Method,
    /// Any other tag.
    Other(&'a str),
}

impl<'a> Category<'a> {
    /// Map a raw tag onto the known categories.
    pub fn from_tag(tag: &'a str) -> Self {
        match tag {
            "page" => Category::Page,
            "section" => Category::Section,
            "method" => Category::Method,
            other => Category::Other(other),
        }
    }

    /// The raw tag.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Method => "method",
            Category::Other(tag) => tag,
        }
    }

    /// Returns true for the tags a documentation build is known to emit.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_kind() {
        let record = IndexRecord::new("api/#API", "API", "API", "", "section");
        assert_eq!(record.category_kind(), Category::Section);
        assert!(record.category_kind().is_known());

        let record = IndexRecord::new("api/", "API", "API", "", "docstring");
        assert_eq!(record.category_kind(), Category::Other("docstring"));
        assert_eq!(record.category_kind().to_string(), "docstring");
        assert!(!record.category_kind().is_known());
    }

    #[test]
    fn test_path_and_anchor() {
        let record = IndexRecord::new("api/#Public-Objects-2", "API", "Public Objects", "", "section");
        assert_eq!(record.path(), "api/");
        assert_eq!(record.anchor(), Some("Public-Objects-2"));

        let record = IndexRecord::new("api/", "API", "API", "Depth = 5", "page");
        assert_eq!(record.path(), "api/");
        assert_eq!(record.anchor(), None);
        assert!(!record.is_structural());

        let record = IndexRecord::new("#Install", "Supernovae", "Install", "", "section");
        assert_eq!(record.path(), "");
        assert_eq!(record.anchor(), Some("Install"));
        assert!(record.is_structural());
    }

    #[test]
    fn test_serde_text_defaults_to_empty() {
        let record: IndexRecord = serde_json::from_str(
            r#"{"location":"","page":"Supernovae","title":"Supernovae","category":"page"}"#,
        )
        .unwrap();
        assert_eq!(record.text, "");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_serde_keeps_extra_keys() {
        let source = r#"{"location":"a/","page":"A","title":"A","text":"","category":"page","weight":2}"#;
        let record: IndexRecord = serde_json::from_str(source).unwrap();
        assert_eq!(record.extra.get("weight"), Some(&Value::from(2)));
        assert_eq!(serde_json::to_string(&record).unwrap(), source);
    }
}
