//! Import of legacy flat configuration files into a [`LayoutModel`].

use crate::schema::{Chart, LayoutModel, LogPanelConfig, PanelConfig};
use crate::{LayoutError, LayoutResult};
use mc_legacy::{IndexedPropertyStore, keys, literal_bool, validate};
use std::path::Path;

/// Build a layout from a validated legacy store.
///
/// All-or-nothing: if any rule fails, every diagnostic is returned and no
/// layout is produced.
pub fn import_legacy(store: &IndexedPropertyStore) -> LayoutResult<LayoutModel> {
    let report = validate(store);
    if !report.ok() {
        return Err(LayoutError::Validation {
            messages: report.into_messages(),
        });
    }

    let flag = |key: &str| store.get(key).and_then(literal_bool).unwrap_or(false);

    let mut layout = LayoutModel::new();
    layout.gnss_3d_view = flag(keys::GNSS_3D_VIEW);
    layout.panels.state = PanelConfig {
        enabled: flag(keys::STATE_PANEL),
    };
    // No legacy key controls the console panel; it was always shown.
    layout.panels.console = PanelConfig { enabled: true };
    layout.panels.log =
        LogPanelConfig::from_sources(flag(keys::SERIAL_PANEL), flag(keys::IRIDIUM_PANEL));

    let titles = store.indexed_values(keys::CHART_TITLE);
    let xs = store.indexed_values(keys::CHART_X);
    let ys = store.indexed_values(keys::CHART_Y);
    for ((title, x), y) in titles.into_iter().zip(xs).zip(ys) {
        layout.add_chart(Chart::new(title, x, y));
    }

    tracing::debug!(charts = layout.entities.len(), "imported legacy configuration");
    Ok(layout)
}

/// Load `relative_path` under `resource_root` and import it.
pub fn import_legacy_file(resource_root: &Path, relative_path: &Path) -> LayoutResult<LayoutModel> {
    let store = IndexedPropertyStore::load_resource(resource_root, relative_path)?;
    import_legacy(&store)
}
