//! Keys recognized in legacy configuration files.

pub const GNSS_3D_VIEW: &str = "GNSS3dView";
pub const STATE_PANEL: &str = "statePanel";
pub const SERIAL_PANEL: &str = "serialPanel";
pub const IRIDIUM_PANEL: &str = "iridiumPanel";

/// Indexed family holding chart titles (`chartTitle[1]`, `chartTitle[2]`, ...).
pub const CHART_TITLE: &str = "chartTitle";
/// Indexed family holding x-axis labels, parallel to [`CHART_TITLE`].
pub const CHART_X: &str = "x";
/// Indexed family holding y-axis labels, parallel to [`CHART_TITLE`].
pub const CHART_Y: &str = "y";
