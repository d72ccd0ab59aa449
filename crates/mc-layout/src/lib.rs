//! mc-layout: mission-console layout model and its persisted document format.

pub mod document;
pub mod import;
pub mod parsable;
pub mod schema;
pub mod session;
pub mod validate;

pub use document::{document_path, list_documents, read_document, write_document};
pub use import::{import_legacy, import_legacy_file};
pub use parsable::{
    AssignmentDraft, ChartDraft, ConsolePanelDraft, GeneralDraft, LogPanelDraft, Parsable,
    StatePanelDraft, transcribe_all,
};
pub use schema::*;
pub use session::{LayoutSession, SessionState};
pub use validate::validate_layout;

use std::path::PathBuf;

/// Directory layouts are stored in by default.
pub const DEFAULT_LAYOUTS_DIR: &str = "layouts";

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse layout document {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Legacy configuration is invalid: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<mc_legacy::LegacyError> for LayoutError {
    fn from(err: mc_legacy::LegacyError) -> Self {
        match err {
            mc_legacy::LegacyError::Io { path, source } => LayoutError::Io { path, source },
        }
    }
}
