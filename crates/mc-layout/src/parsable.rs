//! Producers that transcribe editing state into a [`LayoutModel`].
//!
//! An editing surface keeps its own draft of the fields it edits and, when the
//! operator confirms, writes that draft into the shared layout. The drafts
//! here are headless: fields are held exactly as a form would hold them, with
//! numbers still as text.

use crate::schema::{AssignedData, Chart, LayoutModel, LogPanelConfig, PanelConfig};
use crate::{LayoutError, LayoutResult};

/// Anything able to write its locally-held draft into a layout.
pub trait Parsable {
    /// Fails with [`LayoutError::InvalidArgument`] when the draft does not
    /// pass its own checks. On failure the layout may be partially written;
    /// use [`transcribe_all`] for an atomic confirm.
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()>;
}

/// Apply every producer in order; the layout is only updated if all succeed.
pub fn transcribe_all(producers: &[&dyn Parsable], layout: &mut LayoutModel) -> LayoutResult<()> {
    let mut draft = layout.clone();
    for producer in producers {
        producer.write_to_layout(&mut draft)?;
    }
    *layout = draft;
    Ok(())
}

/// Experiment name and window geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralDraft {
    pub experiment_name: String,
    pub protocol_name: Option<String>,
    pub maximized: bool,
    pub width: String,
    pub height: String,
    pub resizable: bool,
}

impl GeneralDraft {
    fn dimension(text: &str) -> LayoutResult<u32> {
        match text.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(LayoutError::InvalidArgument(
                "General: window size must be numerical".to_string(),
            )),
        }
    }
}

impl Parsable for GeneralDraft {
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        // Validate before touching the layout.
        let size = if self.maximized {
            None
        } else {
            Some((Self::dimension(&self.width)?, Self::dimension(&self.height)?))
        };

        layout.experiment_name = self.experiment_name.trim().to_string();
        if self.protocol_name.is_some() {
            layout.protocol_name = self.protocol_name.clone();
        }
        layout.maximized = self.maximized;
        if let Some((width, height)) = size {
            layout.width = width;
            layout.height = height;
        }
        layout.resizable = self.resizable;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatePanelDraft {
    pub enabled: bool,
}

impl Parsable for StatePanelDraft {
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        layout.panels.state = PanelConfig {
            enabled: self.enabled,
        };
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolePanelDraft {
    pub enabled: bool,
    pub gnss_3d_view: bool,
}

impl Parsable for ConsolePanelDraft {
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        layout.panels.console = PanelConfig {
            enabled: self.enabled,
        };
        layout.gnss_3d_view = self.gnss_3d_view;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogPanelDraft {
    pub serial: bool,
    pub iridium: bool,
}

impl Parsable for LogPanelDraft {
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        layout.panels.log = LogPanelConfig::from_sources(self.serial, self.iridium);
        Ok(())
    }
}

/// A chart being configured, with its `(source, variable)` bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartDraft {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bindings: Vec<(String, String)>,
}

impl ChartDraft {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, source: impl Into<String>, variable: impl Into<String>) -> Self {
        self.bindings.push((source.into(), variable.into()));
        self
    }
}

impl Parsable for ChartDraft {
    /// Replaces the chart with the same title, or appends a new one.
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LayoutError::InvalidArgument(
                "Chart: title must not be empty".to_string(),
            ));
        }

        let mut chart = Chart::new(title, self.x_label.trim(), self.y_label.trim());
        for (source, variable) in &self.bindings {
            chart.add_variable(source, variable);
        }

        match layout.chart_mut(title) {
            Some(existing) => *existing = chart,
            None => layout.add_chart(chart),
        }
        Ok(())
    }
}

/// Bindings chosen after the charts exist, keyed by chart title.
///
/// Unknown titles are rejected so a stale selection cannot silently vanish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub assignments: Vec<(String, AssignedData)>,
}

impl Parsable for AssignmentDraft {
    fn write_to_layout(&self, layout: &mut LayoutModel) -> LayoutResult<()> {
        for (title, bindings) in &self.assignments {
            let chart = layout.chart_mut(title).ok_or_else(|| {
                LayoutError::InvalidArgument(format!("Assign data: no chart titled '{}'", title))
            })?;
            for (source, variables) in bindings {
                for variable in variables {
                    chart.add_variable(source, variable);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(width: &str, height: &str) -> GeneralDraft {
        GeneralDraft {
            experiment_name: "  BEXUS-26  ".to_string(),
            width: width.to_string(),
            height: height.to_string(),
            resizable: true,
            ..GeneralDraft::default()
        }
    }

    #[test]
    fn general_draft_trims_and_parses() {
        let mut layout = LayoutModel::new();
        general("1280", " 720 ").write_to_layout(&mut layout).unwrap();

        assert_eq!(layout.experiment_name, "BEXUS-26");
        assert_eq!((layout.width, layout.height), (1280, 720));
        assert!(layout.resizable);
        assert!(!layout.maximized);
    }

    #[test]
    fn general_draft_rejects_non_numeric_size() {
        for (w, h) in [("wide", "720"), ("1280", ""), ("-5", "720"), ("0", "720")] {
            let mut layout = LayoutModel::new();
            let err = general(w, h).write_to_layout(&mut layout).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidArgument(_)));
            assert_eq!(layout, LayoutModel::new(), "layout touched for {}x{}", w, h);
        }
    }

    #[test]
    fn maximized_ignores_size_fields() {
        let mut layout = LayoutModel {
            width: 640,
            height: 480,
            ..LayoutModel::default()
        };
        let draft = GeneralDraft {
            maximized: true,
            ..general("garbage", "")
        };
        draft.write_to_layout(&mut layout).unwrap();

        assert!(layout.maximized);
        assert_eq!((layout.width, layout.height), (640, 480));
    }

    #[test]
    fn chart_draft_replaces_same_title() {
        let mut layout = LayoutModel::new();
        ChartDraft::new("Altitude", "t", "m")
            .bind("gps", "alt")
            .write_to_layout(&mut layout)
            .unwrap();
        ChartDraft::new("Altitude", "t", "km")
            .bind("baro", "alt")
            .bind("", "ignored")
            .write_to_layout(&mut layout)
            .unwrap();

        let charts: Vec<&Chart> = layout.charts().collect();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].y_label, "km");
        assert_eq!(charts[0].assigned_data().len(), 1);
        assert_eq!(charts[0].variables("baro"), ["alt".to_string()]);
    }

    #[test]
    fn chart_draft_requires_title() {
        let mut layout = LayoutModel::new();
        assert!(ChartDraft::new(" ", "t", "m").write_to_layout(&mut layout).is_err());
        assert!(layout.entities.is_empty());
    }

    #[test]
    fn assignment_draft_binds_into_existing_chart() {
        let mut layout = LayoutModel::new();
        layout.add_chart(Chart::new("Altitude", "t", "m"));

        let mut bindings = AssignedData::new();
        bindings.insert("gps".to_string(), vec!["alt".to_string(), "alt".to_string()]);
        let draft = AssignmentDraft {
            assignments: vec![("Altitude".to_string(), bindings)],
        };
        draft.write_to_layout(&mut layout).unwrap();

        let chart = layout.charts().next().unwrap();
        assert_eq!(chart.variables("gps"), ["alt".to_string()]);

        let stale = AssignmentDraft {
            assignments: vec![("Gone".to_string(), AssignedData::new())],
        };
        assert!(stale.write_to_layout(&mut layout).is_err());
    }

    #[test]
    fn transcribe_all_is_atomic() {
        let mut layout = LayoutModel::new();
        let state = StatePanelDraft { enabled: true };
        let bad = general("x", "y");

        let err = transcribe_all(&[&state, &bad], &mut layout).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(_)));
        assert_eq!(layout, LayoutModel::new());

        let good = general("800", "600");
        let log = LogPanelDraft {
            serial: true,
            iridium: false,
        };
        let console = ConsolePanelDraft {
            enabled: true,
            gnss_3d_view: true,
        };
        transcribe_all(&[&good, &state, &console, &log], &mut layout).unwrap();
        assert!(layout.panels.state.enabled);
        assert!(layout.panels.console.enabled);
        assert!(layout.gnss_3d_view);
        assert!(layout.panels.log.enabled);
        assert_eq!(layout.experiment_name, "BEXUS-26");
    }
}
