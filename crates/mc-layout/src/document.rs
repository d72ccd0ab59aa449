//! JSON layout documents: one `<experiment name>.json` per layout.

use crate::schema::LayoutModel;
use crate::validate::validate_layout;
use crate::{LayoutError, LayoutResult};
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_EXTENSION: &str = "json";

/// Path of the document for `experiment_name` inside `layouts_dir`.
pub fn document_path(layouts_dir: &Path, experiment_name: &str) -> PathBuf {
    layouts_dir.join(format!("{}.{}", experiment_name, DOCUMENT_EXTENSION))
}

/// Write `layout` to `<destination_dir>/<experiment name>.json`.
///
/// The layout is validated before anything touches the file system. If the
/// final write fails, `destination_dir` may already have been created.
pub fn write_document(layout: &LayoutModel, destination_dir: &Path) -> LayoutResult<PathBuf> {
    validate_layout(layout)?;
    let content = serde_json::to_string_pretty(layout)?;

    fs::create_dir_all(destination_dir).map_err(|source| LayoutError::Io {
        path: destination_dir.to_path_buf(),
        source,
    })?;

    let path = document_path(destination_dir, &layout.experiment_name);
    fs::write(&path, content + "\n").map_err(|source| LayoutError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), charts = layout.entities.len(), "wrote layout document");
    Ok(path)
}

/// Read a layout document.
pub fn read_document(path: &Path) -> LayoutResult<LayoutModel> {
    let content = fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let layout: LayoutModel =
        serde_json::from_str(&content).map_err(|source| LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), experiment = %layout.experiment_name, "read layout document");
    Ok(layout)
}

/// Layout documents stored in `layouts_dir`, sorted by path.
///
/// A missing directory holds no layouts.
pub fn list_documents(layouts_dir: &Path) -> LayoutResult<Vec<PathBuf>> {
    let mut documents = Vec::new();

    if !layouts_dir.exists() {
        return Ok(documents);
    }

    let io_err = |source: std::io::Error| LayoutError::Io {
        path: layouts_dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(layouts_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Chart;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn document_path_uses_name_verbatim() {
        let path = document_path(Path::new("layouts"), "BEXUS 26");
        assert_eq!(path, Path::new("layouts").join("BEXUS 26.json"));
    }

    #[test]
    fn whitespace_variant_cannot_overwrite_document() {
        let dir = temp_dir("mc_layout_whitespace_names");
        let original = LayoutModel {
            experiment_name: "X".to_string(),
            maximized: true,
            ..LayoutModel::default()
        };
        let path = write_document(&original, &dir).unwrap();

        let variant = LayoutModel {
            experiment_name: " X ".to_string(),
            resizable: true,
            ..original.clone()
        };
        let err = write_document(&variant, &dir).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(_)));

        assert_eq!(read_document(&path).unwrap(), original);
        assert_eq!(list_documents(&dir).unwrap(), vec![path]);
    }

    #[test]
    fn control_character_name_touches_nothing() {
        let dir = temp_dir("mc_layout_control_name");
        let layout = LayoutModel {
            experiment_name: "a\0b".to_string(),
            maximized: true,
            ..LayoutModel::default()
        };

        let err = write_document(&layout, &dir).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(_)));
        assert!(!dir.exists());
    }

    #[test]
    fn field_order_follows_declaration() {
        let mut layout = LayoutModel {
            experiment_name: "Order".to_string(),
            width: 1024,
            height: 768,
            ..LayoutModel::default()
        };
        layout.add_chart(Chart::new("Altitude", "t", "m"));

        let json = serde_json::to_string_pretty(&layout).unwrap();
        let positions: Vec<usize> = [
            "\"experiment_name\"",
            "\"maximized\"",
            "\"width\"",
            "\"height\"",
            "\"resizable\"",
            "\"gnss_3d_view\"",
            "\"panels\"",
            "\"entities\"",
        ]
        .iter()
        .map(|field| json.find(field).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(json.contains("\"type\": \"Chart\""));
        assert!(!json.contains("protocol_name"));
    }

    #[test]
    fn empty_name_writes_nothing() {
        let dir = temp_dir("mc_layout_empty_name");
        let layout = LayoutModel::new();

        let err = write_document(&layout, &dir).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(_)));
        assert!(!dir.exists());
    }

    #[test]
    fn list_documents_filters_and_sorts() {
        let dir = temp_dir("mc_layout_list");
        assert!(list_documents(&dir).unwrap().is_empty());

        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.json"), "{}").unwrap();
        fs::write(dir.join("a.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let documents = list_documents(&dir).unwrap();
        assert_eq!(documents, vec![dir.join("a.json"), dir.join("b.json")]);
    }
}
