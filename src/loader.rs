//! Loading and validating search index artifacts.
//!
//! A search index is accepted in three shapes:
//!
//! - the JS artifact a documentation build writes, `var name = {"docs": [...]}`
//! - the bare JSON object `{"docs": [...]}`
//! - a bare JSON array of records
//!
//! Loading is all-or-nothing. The first structural violation aborts the load
//! with [`DocIndexError::MalformedIndex`] naming the record and field.
//!
//! # Examples
//!
//! ```
//! use docindex::loader::load;
//!
//! let source = r#"var documenterSearchIndex = {"docs":
//! [{"location":"api/#API","page":"API","title":"API","text":"","category":"section"}]
//! }
//! "#;
//!
//! let collection = load(source).unwrap();
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection.get(0).unwrap().location, "api/#API");
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde_json::{Map, Value};

use crate::collection::IndexCollection;
use crate::config::LoaderConfig;
use crate::error::{DocIndexError, Result};
use crate::record::{IndexRecord, REQUIRED_FIELDS, TEXT_FIELD};

/// Key of the record array inside the index object.
pub const DOCS_KEY: &str = "docs";

static JS_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*").unwrap()
});

/// Top-level form an index was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceShape {
    /// `var <name> = {"docs": [...]}`
    Script { variable_name: String },
    /// `{"docs": [...]}`
    Object,
    /// `[...]`
    Array,
}

/// Loads search indices under a [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct IndexLoader {
    config: LoaderConfig,
}

impl IndexLoader {
    /// Create a loader, rejecting an invalid configuration.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(IndexLoader { config })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse and validate an index from source text.
    pub fn load(&self, source: &str) -> Result<IndexCollection> {
        self.load_with_shape(source).map(|(collection, _)| collection)
    }

    /// Like [`load`](Self::load), also reporting which top-level form was found.
    pub fn load_with_shape(&self, source: &str) -> Result<(IndexCollection, SourceShape)> {
        let (body, shape) = self.split_source(source)?;
        debug!("Detected index shape: {shape:?}");

        let root: Value = serde_json::from_str(body).map_err(|e| {
            DocIndexError::malformed(
                format!("line {}, column {}", e.line(), e.column()),
                e.to_string(),
            )
        })?;

        let docs = match root {
            Value::Array(docs) => docs,
            Value::Object(mut object) => {
                let docs = object.shift_remove(DOCS_KEY).ok_or_else(|| {
                    DocIndexError::malformed("top level", format!("missing `{DOCS_KEY}` field"))
                })?;
                if !object.is_empty() {
                    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
                    warn!("Ignoring top-level keys next to `{DOCS_KEY}`: {keys:?}");
                }
                match docs {
                    Value::Array(docs) => docs,
                    other => {
                        return Err(DocIndexError::malformed(
                            DOCS_KEY,
                            format!("expected an array, found {}", type_name(&other)),
                        ));
                    }
                }
            }
            other => {
                return Err(DocIndexError::malformed(
                    "top level",
                    format!(
                        "expected an object with `{DOCS_KEY}` or an array, found {}",
                        type_name(&other)
                    ),
                ));
            }
        };

        let records = docs
            .into_iter()
            .enumerate()
            .map(|(position, value)| self.parse_record(position, value))
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} index records", records.len());
        Ok((IndexCollection::new(records), shape))
    }

    /// Read and load an index file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<IndexCollection> {
        let path = path.as_ref();
        debug!("Reading index from {}", path.display());
        let source = fs::read_to_string(path)?;
        self.load(&source)
    }

    /// Read and load an index from any reader.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<IndexCollection> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.load(&source)
    }

    /// Strip the JS declaration, if any, and work out the top-level shape.
    fn split_source<'a>(&self, source: &'a str) -> Result<(&'a str, SourceShape)> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        if let Some(captures) = JS_PREFIX.captures(source) {
            let name = &captures[1];
            if let Some(expected) = &self.config.variable_name
                && expected != name
            {
                return Err(DocIndexError::malformed(
                    "declaration",
                    format!("expected variable `{expected}`, found `{name}`"),
                ));
            }

            let body = source[captures[0].len()..].trim_end();
            let body = body.strip_suffix(';').unwrap_or(body);
            return Ok((
                body,
                SourceShape::Script {
                    variable_name: name.to_string(),
                },
            ));
        }

        if self.config.require_wrapper {
            return Err(DocIndexError::malformed(
                "declaration",
                "expected a `var <name> = {...}` declaration",
            ));
        }

        let body = source.trim();
        match body.chars().next() {
            Some('[') => Ok((body, SourceShape::Array)),
            Some('{') => Ok((body, SourceShape::Object)),
            Some(c) => Err(DocIndexError::malformed(
                "top level",
                format!("unexpected character `{c}`"),
            )),
            None => Err(DocIndexError::malformed("top level", "input is empty")),
        }
    }

    fn parse_record(&self, position: usize, value: Value) -> Result<IndexRecord> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(DocIndexError::malformed(
                    format!("record {position}"),
                    format!("expected an object, found {}", type_name(&other)),
                ));
            }
        };

        let [location, page, title, category] = REQUIRED_FIELDS
            .map(|field| require_string(&mut object, position, field));
        let (location, page, title, category) = (location?, page?, title?, category?);

        let text = take_string(&mut object, position, TEXT_FIELD)?.unwrap_or_default();

        if !self.config.accepts_category(&category) {
            return Err(DocIndexError::malformed(
                format!("record {position}, field `category`"),
                format!("unknown category `{category}`"),
            ));
        }

        if !object.is_empty() {
            if !self.config.allow_unknown_fields {
                let keys: Vec<&str> = object.keys().map(String::as_str).collect();
                return Err(DocIndexError::malformed(
                    format!("record {position}"),
                    format!("unknown fields {keys:?}"),
                ));
            }
            debug!("Record {position} carries {} extra keys", object.len());
        }

        Ok(IndexRecord {
            location,
            page,
            title,
            text,
            category,
            extra: object,
        })
    }
}

fn require_string(object: &mut Map<String, Value>, position: usize, field: &str) -> Result<String> {
    take_string(object, position, field)?.ok_or_else(|| {
        DocIndexError::malformed(
            format!("record {position}"),
            format!("missing field `{field}`"),
        )
    })
}

/// Remove `field` from `object`, requiring a string value when present.
fn take_string(
    object: &mut Map<String, Value>,
    position: usize,
    field: &str,
) -> Result<Option<String>> {
    match object.shift_remove(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(DocIndexError::malformed(
            format!("record {position}, field `{field}`"),
            format!("expected a string, found {}", type_name(&other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load an index with the default configuration.
pub fn load(source: &str) -> Result<IndexCollection> {
    IndexLoader::default().load(source)
}

/// Load an index file with the default configuration.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<IndexCollection> {
    IndexLoader::default().load_file(path)
}

/// Load an index from a reader with the default configuration.
pub fn load_reader<R: Read>(reader: R) -> Result<IndexCollection> {
    IndexLoader::default().load_reader(reader)
}
