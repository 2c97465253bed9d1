//! chengyu-source: idiom source backends.
//!
//! Implements the `IdiomSource` trait for a remote idiom endpoint, local JSON
//! datasets, and the compiled-in starter set.

pub mod config;
pub mod dataset;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config_from, ChengyuConfig, SourceConfig};
pub use dataset::DatasetIdiomSource;
pub use http::HttpIdiomSource;
