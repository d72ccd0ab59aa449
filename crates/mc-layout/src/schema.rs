//! Layout schema definitions.
//!
//! Field declaration order is the serialized order; keep it stable so stored
//! layouts diff cleanly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Data source name to the ordered variables bound from it.
pub type AssignedData = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LayoutModel {
    pub experiment_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_name: Option<String>,
    pub maximized: bool,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    #[serde(default)]
    pub gnss_3d_view: bool,
    #[serde(default)]
    pub panels: Panels,
    #[serde(default)]
    pub entities: Vec<UiEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Panels {
    pub state: PanelConfig,
    pub console: PanelConfig,
    pub log: LogPanelConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct PanelConfig {
    pub enabled: bool,
}

/// Log panel with its two feeds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct LogPanelConfig {
    pub enabled: bool,
    #[serde(default)]
    pub serial: bool,
    #[serde(default)]
    pub iridium: bool,
}

impl LogPanelConfig {
    pub fn from_sources(serial: bool, iridium: bool) -> Self {
        Self {
            enabled: serial || iridium,
            serial,
            iridium,
        }
    }
}

/// A named, renderable configuration unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type")]
pub enum UiEntity {
    Chart(Chart),
}

impl UiEntity {
    pub fn name(&self) -> &str {
        match self {
            UiEntity::Chart(chart) => &chart.title,
        }
    }

    pub fn as_chart(&self) -> Option<&Chart> {
        match self {
            UiEntity::Chart(chart) => Some(chart),
        }
    }

    pub fn as_chart_mut(&mut self) -> Option<&mut Chart> {
        match self {
            UiEntity::Chart(chart) => Some(chart),
        }
    }
}

/// A configured plot: title, axis labels and the variables bound to it.
///
/// Equality and hashing cover all fields. `assigned_data` is keyed by source
/// name in sorted order, so two charts compare equal regardless of the order
/// in which their sources were first bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default)]
    assigned_data: AssignedData,
}

impl Chart {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            assigned_data: AssignedData::new(),
        }
    }

    pub fn assigned_data(&self) -> &AssignedData {
        &self.assigned_data
    }

    /// Replace all bindings at once. Intended for deserialization paths only.
    pub fn set_assigned_data(&mut self, assigned_data: AssignedData) {
        self.assigned_data = assigned_data;
    }

    /// Bind `variable` from `source`.
    ///
    /// Empty names are ignored, as is a variable already bound from the same
    /// source. Returns whether the bindings changed.
    pub fn add_variable(&mut self, source: &str, variable: &str) -> bool {
        if source.is_empty() || variable.is_empty() {
            return false;
        }

        let variables = self.assigned_data.entry(source.to_string()).or_default();
        if variables.iter().any(|v| v == variable) {
            return false;
        }
        variables.push(variable.to_string());
        true
    }

    /// Variables bound from `source`, in insertion order.
    pub fn variables(&self, source: &str) -> &[String] {
        self.assigned_data
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn variable_count(&self) -> usize {
        self.assigned_data.values().map(Vec::len).sum()
    }
}

impl LayoutModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.entities.iter().filter_map(UiEntity::as_chart)
    }

    pub fn add_chart(&mut self, chart: Chart) {
        self.entities.push(UiEntity::Chart(chart));
    }

    /// First chart titled `title`.
    pub fn chart_mut(&mut self, title: &str) -> Option<&mut Chart> {
        self.entities
            .iter_mut()
            .filter_map(UiEntity::as_chart_mut)
            .find(|c| c.title == title)
    }
}
