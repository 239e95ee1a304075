//! # wordstock-disk-cache
//!
//! Download cache for pretrained vocabularies, vector archives, and
//! sentencepiece models.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod checksum;
pub mod disk_cache;
pub mod path_resolver;
pub mod path_utils;

pub use checksum::{ChecksumMismatch, file_sha256, verify_sha256};
pub use disk_cache::{WordstockDiskCache, WordstockDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const WORDSTOCK_CACHE_DIR: &str = "WORDSTOCK_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const WORDSTOCK_DATA_DIR: &str = "WORDSTOCK_DATA_DIR";

/// Default [`PathResolver`] for wordstock.
pub const WORDSTOCK_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordstock",
    organization: "",
    application: "wordstock",
    cache_env_vars: &[WORDSTOCK_CACHE_DIR],
    data_env_vars: &[WORDSTOCK_DATA_DIR],
};
