//! Writing collections back out as search index artifacts.
//!
//! [`write_js`] reproduces the layout a documentation build emits: the
//! variable declaration and `{"docs":` on the first line, every record in
//! compact JSON on the second, and the closing brace on the third. Loading
//! that output again yields an equal collection.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::collection::IndexCollection;
use crate::config::WriterConfig;
use crate::error::Result;
use crate::record::IndexRecord;

/// Serialized layout of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// `var <name> = {"docs": [...]}`, as loaded by a browser.
    Script,
    /// Compact `{"docs":[...]}`.
    Json,
    /// Indented `{"docs": [...]}`.
    PrettyJson,
}

#[derive(Serialize)]
struct IndexDocument<'a> {
    docs: &'a [IndexRecord],
}

/// Serialize `collection` in the generator's JS layout.
pub fn write_js(collection: &IndexCollection, config: &WriterConfig) -> Result<String> {
    config.validate()?;

    let records = collection
        .iter()
        .map(serde_json::to_string)
        .collect::<serde_json::Result<Vec<_>>>()?;

    Ok(format!(
        "var {} = {{\"docs\":\n[{}]\n}}\n",
        config.variable_name,
        records.join(",")
    ))
}

/// Serialize `collection` as a plain `{"docs": [...]}` JSON object.
pub fn write_json(collection: &IndexCollection, pretty: bool) -> Result<String> {
    let document = IndexDocument {
        docs: collection.records(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Serialize `collection` in the requested layout.
pub fn write(collection: &IndexCollection, format: IndexFormat, config: &WriterConfig) -> Result<String> {
    match format {
        IndexFormat::Script => write_js(collection, config),
        IndexFormat::Json => write_json(collection, false),
        IndexFormat::PrettyJson => write_json(collection, true),
    }
}

/// Serialize `collection` and write it to `path`, replacing any existing file.
pub fn write_to_file<P: AsRef<Path>>(
    collection: &IndexCollection,
    path: P,
    format: IndexFormat,
    config: &WriterConfig,
) -> Result<()> {
    let path = path.as_ref();
    let output = write(collection, format, config)?;
    fs::write(path, output)?;
    debug!(
        "Wrote {} records to {} as {format:?}",
        collection.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load;

    fn sample() -> IndexCollection {
        IndexCollection::new(vec![
            IndexRecord::new("api/#API", "API", "API", "", "section"),
            IndexRecord::new("api/", "API", "API", "Pages = [\"api.md\"]\nDepth = 5", "page"),
        ])
    }

    #[test]
    fn test_js_layout() {
        let output = write_js(&sample(), &WriterConfig::default()).unwrap();
        let expected = concat!(
            "var documenterSearchIndex = {\"docs\":\n",
            "[{\"location\":\"api/#API\",\"page\":\"API\",\"title\":\"API\",\"text\":\"\",\"category\":\"section\"},",
            "{\"location\":\"api/\",\"page\":\"API\",\"title\":\"API\",\"text\":\"Pages = [\\\"api.md\\\"]\\nDepth = 5\",\"category\":\"page\"}]\n",
            "}\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_collection_layout() {
        let output = write_js(&IndexCollection::empty(), &WriterConfig::default()).unwrap();
        assert_eq!(output, "var documenterSearchIndex = {\"docs\":\n[]\n}\n");
        assert!(load(&output).unwrap().is_empty());
    }

    #[test]
    fn test_custom_variable_name() {
        let config = WriterConfig {
            variable_name: "searchIndex".to_string(),
        };
        let output = write_js(&sample(), &config).unwrap();
        assert!(output.starts_with("var searchIndex = "));

        let config = WriterConfig {
            variable_name: "search index".to_string(),
        };
        assert!(write_js(&sample(), &config).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let collection = sample();
        for pretty in [false, true] {
            let output = write_json(&collection, pretty).unwrap();
            assert_eq!(load(&output).unwrap(), collection);
        }
        assert!(write_json(&collection, false).unwrap().starts_with("{\"docs\":["));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_index.js");
        let collection = sample();

        write_to_file(&collection, &path, IndexFormat::Script, &WriterConfig::default()).unwrap();
        let reloaded = crate::loader::load_file(&path).unwrap();
        assert_eq!(reloaded, collection);
    }
}
