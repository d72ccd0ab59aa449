//! mc-legacy: the flat, indexed key/value configuration format.
//!
//! Contains:
//! - properties (text parser for `key=value` files)
//! - store (indexed property store with `base[i]` counting)
//! - validate (structural rules applied before import)

pub mod keys;
pub mod properties;
pub mod store;
pub mod validate;

pub use store::{IndexedPropertyStore, indexed_key};
pub use validate::{LegacyRule, ValidationReport, Violation, literal_bool, validate};

use std::path::PathBuf;

/// Resource root that legacy configuration paths are resolved against by default.
pub const DEFAULT_RESOURCE_ROOT: &str = "resources";

pub type LegacyResult<T> = Result<T, LegacyError>;

#[derive(thiserror::Error, Debug)]
pub enum LegacyError {
    #[error("Failed to read legacy configuration: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
