//! Loader and writer configuration.
//!
//! Both configurations default to the behaviour expected of a freshly
//! generated search index: any JS variable name, open category tags and
//! preserved unknown keys. They can be read from a JSON file of the form
//! `{"loader": {...}, "writer": {...}}`.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DocIndexError, Result};

/// Variable name the documentation generator binds the index to.
pub const DEFAULT_VARIABLE_NAME: &str = "documenterSearchIndex";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Returns true if `name` is usable as a JS variable name.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Options controlling how strictly an index is validated on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// If set, the JS wrapper must bind exactly this variable.
    pub variable_name: Option<String>,
    /// Reject bare JSON inputs; only the `var x = {...}` form is accepted.
    pub require_wrapper: bool,
    /// Keep record keys this crate does not interpret instead of rejecting them.
    pub allow_unknown_fields: bool,
    /// If set, categories outside this list are malformed.
    pub known_categories: Option<Vec<String>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            variable_name: None,
            require_wrapper: false,
            allow_unknown_fields: true,
            known_categories: None,
        }
    }
}

impl LoaderConfig {
    /// Loader that only accepts the standard `page`/`section`/`method` tags.
    pub fn strict() -> Self {
        LoaderConfig {
            variable_name: Some(DEFAULT_VARIABLE_NAME.to_string()),
            require_wrapper: true,
            allow_unknown_fields: false,
            known_categories: Some(vec![
                "page".to_string(),
                "section".to_string(),
                "method".to_string(),
            ]),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.variable_name
            && !is_valid_identifier(name)
        {
            return Err(DocIndexError::invalid_config(format!(
                "`{name}` is not a valid variable name"
            )));
        }
        if let Some(categories) = &self.known_categories
            && categories.is_empty()
        {
            return Err(DocIndexError::invalid_config(
                "known_categories must not be empty when set",
            ));
        }
        Ok(())
    }

    /// Whether `category` passes the closed-set check, if one is configured.
    pub fn accepts_category(&self, category: &str) -> bool {
        match &self.known_categories {
            Some(categories) => categories.iter().any(|c| c == category),
            None => true,
        }
    }
}

/// Options controlling how an index is written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Variable the JS form binds the index object to.
    pub variable_name: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            variable_name: DEFAULT_VARIABLE_NAME.to_string(),
        }
    }
}

impl WriterConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.variable_name) {
            return Err(DocIndexError::invalid_config(format!(
                "`{}` is not a valid variable name",
                self.variable_name
            )));
        }
        Ok(())
    }
}

/// Combined configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocIndexConfig {
    pub loader: LoaderConfig,
    pub writer: WriterConfig,
}

impl DocIndexConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: DocIndexConfig = serde_json::from_str(&content)?;
        config.loader.validate()?;
        config.writer.validate()?;
        Ok(config)
    }
}
