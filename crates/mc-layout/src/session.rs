//! One editing session over a single, exclusively owned layout.

use crate::document::{read_document, write_document};
use crate::import::import_legacy;
use crate::parsable::{Parsable, transcribe_all};
use crate::schema::LayoutModel;
use crate::LayoutResult;
use mc_legacy::IndexedPropertyStore;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// New layout, nothing transcribed yet.
    Empty,
    /// Populated from a document or a legacy file.
    Loaded,
    /// At least one producer has written since the last load or persist.
    Editing,
    /// Last write succeeded. Further edits move back to `Editing`.
    Persisted,
}

#[derive(Debug, Clone)]
pub struct LayoutSession {
    layout: LayoutModel,
    layouts_dir: PathBuf,
    state: SessionState,
    last_written: Option<PathBuf>,
}

impl LayoutSession {
    pub fn new(layouts_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: LayoutModel::new(),
            layouts_dir: layouts_dir.into(),
            state: SessionState::Empty,
            last_written: None,
        }
    }

    pub fn open_document(layouts_dir: impl Into<PathBuf>, path: &Path) -> LayoutResult<Self> {
        let layout = read_document(path)?;
        Ok(Self::loaded(layouts_dir.into(), layout))
    }

    pub fn import_legacy(
        layouts_dir: impl Into<PathBuf>,
        store: &IndexedPropertyStore,
    ) -> LayoutResult<Self> {
        let layout = import_legacy(store)?;
        Ok(Self::loaded(layouts_dir.into(), layout))
    }

    fn loaded(layouts_dir: PathBuf, layout: LayoutModel) -> Self {
        Self {
            layout,
            layouts_dir,
            state: SessionState::Loaded,
            last_written: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn layout(&self) -> &LayoutModel {
        &self.layout
    }

    pub fn layouts_dir(&self) -> &Path {
        &self.layouts_dir
    }

    /// Path of the most recent successful write.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    /// Apply one producer. The layout is left untouched if it fails.
    pub fn apply(&mut self, producer: &dyn Parsable) -> LayoutResult<()> {
        self.apply_all(&[producer])
    }

    /// Apply all producers atomically.
    pub fn apply_all(&mut self, producers: &[&dyn Parsable]) -> LayoutResult<()> {
        transcribe_all(producers, &mut self.layout)?;
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Write the layout into the session's layouts directory.
    pub fn persist(&mut self) -> LayoutResult<PathBuf> {
        let path = write_document(&self.layout, &self.layouts_dir)?;
        self.state = SessionState::Persisted;
        self.last_written = Some(path.clone());
        tracing::info!(path = %path.display(), "layout persisted");
        Ok(path)
    }

    pub fn into_layout(self) -> LayoutModel {
        self.layout
    }
}
