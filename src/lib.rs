//! # docindex
//!
//! Loader, validator and writer for the static search index a documentation
//! build emits (`search_index.js`).
//!
//! ## Features
//!
//! - All-or-nothing loading with precise error positions
//! - Accepts the JS artifact, a bare `{"docs": [...]}` object or a record array
//! - Open category tags, with an optional closed set
//! - Lossless write-back, byte for byte in the generator's layout
//! - Immutable collections that can be shared across threads without locking

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod loader;
pub mod record;
pub mod writer;

pub mod prelude {
    pub use crate::collection::{CollectionStats, IndexCollection};
    pub use crate::config::{DocIndexConfig, LoaderConfig, WriterConfig};
    pub use crate::error::{DocIndexError, Result};
    pub use crate::loader::{IndexLoader, SourceShape, load, load_file, load_reader};
    pub use crate::record::{Category, IndexRecord};
    pub use crate::writer::{IndexFormat, write, write_js, write_json, write_to_file};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
