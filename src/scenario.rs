//! External-shock scenarios.
//!
//! Each scenario carries a full baseline vector. A scenario is applied as the
//! offset between its baseline and the `Normal` baseline, so `Normal` is the
//! identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{MetricId, MetricVector};
use crate::error::ValidationError;

/// Named baseline shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    /// No shock.
    #[default]
    Normal,
    /// A widely used AI tool is found to be biased.
    ToolBias,
    /// State funding for AI programs is cut.
    FundingCut,
    /// Student data leaks from an AI vendor.
    DataBreach,
}

// Baselines list metrics in `MetricId::ALL` order:
// literacy, trust, innovation, teacher sat., equity, budget strain, employment, vulnerability.
const NORMAL_BASELINE: [f64; MetricId::COUNT] = [50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0];
const TOOL_BIAS_BASELINE: [f64; MetricId::COUNT] = [45.0, 30.0, 45.0, 40.0, 30.0, 55.0, 50.0, 70.0];
const FUNDING_CUT_BASELINE: [f64; MetricId::COUNT] = [40.0, 45.0, 35.0, 35.0, 35.0, 80.0, 40.0, 60.0];
const DATA_BREACH_BASELINE: [f64; MetricId::COUNT] = [50.0, 25.0, 40.0, 45.0, 45.0, 65.0, 50.0, 85.0];

impl Scenario {
    /// All scenarios in display order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::ToolBias, Self::FundingCut, Self::DataBreach];

    /// Stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::ToolBias => "TOOL_BIAS",
            Self::FundingCut => "FUNDING_CUT",
            Self::DataBreach => "DATA_BREACH",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal conditions",
            Self::ToolBias => "AI tool bias discovered",
            Self::FundingCut => "Funding cut",
            Self::DataBreach => "Student data breach",
        }
    }

    /// Literal baseline vector.
    #[must_use]
    pub const fn baseline(self) -> MetricVector {
        MetricVector::from_array(match self {
            Self::Normal => NORMAL_BASELINE,
            Self::ToolBias => TOOL_BIAS_BASELINE,
            Self::FundingCut => FUNDING_CUT_BASELINE,
            Self::DataBreach => DATA_BREACH_BASELINE,
        })
    }

    /// `baseline(self) - baseline(Normal)`, per metric.
    #[must_use]
    pub fn offset(self) -> MetricVector {
        self.baseline().difference(&Self::Normal.baseline())
    }

    /// True for every scenario except `Normal`.
    #[must_use]
    pub const fn is_shock(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownScenario { id: s.to_string() })
    }
}

/// Shift `metrics` by the scenario offset and re-clamp.
///
/// `Normal` returns the input untouched, even if it holds out-of-range values.
#[must_use]
pub fn apply_scenario(metrics: &MetricVector, scenario: Scenario) -> MetricVector {
    if !scenario.is_shock() {
        return *metrics;
    }
    metrics.sum(&scenario.offset()).clamped()
}
