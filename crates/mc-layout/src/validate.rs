//! Layout checks applied before a layout is persisted.

use crate::schema::LayoutModel;
use crate::{LayoutError, LayoutResult};

pub fn validate_layout(layout: &LayoutModel) -> LayoutResult<()> {
    let name = layout.experiment_name.as_str();
    if name.trim().is_empty() {
        return Err(LayoutError::InvalidArgument(
            "experiment name must not be empty".to_string(),
        ));
    }

    // The name becomes the document's file name, verbatim.
    if name.trim() != name {
        return Err(LayoutError::InvalidArgument(format!(
            "experiment name '{}' must not start or end with whitespace",
            name
        )));
    }
    if name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        return Err(LayoutError::InvalidArgument(format!(
            "experiment name '{}' cannot be used as a file name",
            name.escape_debug()
        )));
    }

    if !layout.maximized && (layout.width == 0 || layout.height == 0) {
        return Err(LayoutError::InvalidArgument(format!(
            "window size {}x{} must be positive unless maximized",
            layout.width, layout.height
        )));
    }

    Ok(())
}
