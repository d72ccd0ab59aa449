//! Structural checks for legacy configuration files.

use crate::keys;
use crate::store::IndexedPropertyStore;
use std::fmt;

/// A single structural rule of the legacy format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyRule {
    /// `chartTitle`, `x` and `y` families have the same length.
    ChartFamilies,
    Gnss3dView,
    StatePanel,
    SerialPanel,
    IridiumPanel,
}

impl LegacyRule {
    /// Evaluation order; diagnostics are reported in this order.
    pub const ALL: [LegacyRule; 5] = [
        LegacyRule::ChartFamilies,
        LegacyRule::Gnss3dView,
        LegacyRule::StatePanel,
        LegacyRule::SerialPanel,
        LegacyRule::IridiumPanel,
    ];

    /// The boolean key checked by this rule, if it is a boolean rule.
    pub fn boolean_key(self) -> Option<&'static str> {
        match self {
            LegacyRule::ChartFamilies => None,
            LegacyRule::Gnss3dView => Some(keys::GNSS_3D_VIEW),
            LegacyRule::StatePanel => Some(keys::STATE_PANEL),
            LegacyRule::SerialPanel => Some(keys::SERIAL_PANEL),
            LegacyRule::IridiumPanel => Some(keys::IRIDIUM_PANEL),
        }
    }

    fn check(self, store: &IndexedPropertyStore) -> Option<String> {
        match self.boolean_key() {
            None => {
                let titles = store.count_items(keys::CHART_TITLE);
                let xs = store.count_items(keys::CHART_X);
                let ys = store.count_items(keys::CHART_Y);
                (titles != xs || titles != ys).then(|| {
                    format!(
                        "Syntax of CHART PROPERTIES is not accurate: {}={}, {}={}, {}={}",
                        keys::CHART_TITLE,
                        titles,
                        keys::CHART_X,
                        xs,
                        keys::CHART_Y,
                        ys
                    )
                })
            }
            Some(key) => match store.get(key) {
                None => Some(format!("Syntax of {} property is not accurate: missing", key)),
                Some(value) if literal_bool(value).is_none() => Some(format!(
                    "Syntax of {} property is not accurate: expected \"true\" or \"false\", found \"{}\"",
                    key, value
                )),
                Some(_) => None,
            },
        }
    }
}

impl fmt::Display for LegacyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boolean_key() {
            Some(key) => write!(f, "{}", key),
            None => write!(f, "chart properties"),
        }
    }
}

/// A violated rule and its diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: LegacyRule,
    pub message: String,
}

/// Outcome of [`validate`]. Passing iff no rule was violated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    pub fn into_messages(self) -> Vec<String> {
        self.violations.into_iter().map(|v| v.message).collect()
    }

    pub fn is_violated(&self, rule: LegacyRule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

/// `Some` only for the exact literals `"true"` and `"false"`.
pub fn literal_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Run every rule against `store`; each rule reports independently.
pub fn validate(store: &IndexedPropertyStore) -> ValidationReport {
    let violations: Vec<Violation> = LegacyRule::ALL
        .iter()
        .filter_map(|&rule| rule.check(store).map(|message| Violation { rule, message }))
        .collect();

    for violation in &violations {
        tracing::warn!(rule = %violation.rule, "{}", violation.message);
    }

    ValidationReport { violations }
}
