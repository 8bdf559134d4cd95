//! Outcome metrics and the fixed-size vector that holds one score per metric.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Neutral score every metric starts from.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Lowest score a metric can take.
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a metric can take.
pub const MAX_SCORE: f64 = 100.0;

/// Clamp a score to `[MIN_SCORE, MAX_SCORE]`.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Identifier of a derived outcome metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricId {
    /// Student and staff understanding of AI.
    AiLiteracy,
    /// Public confidence in how schools use AI.
    CommunityTrust,
    /// Pace of new practice and tooling.
    InnovationIndex,
    /// Teacher morale and workload.
    TeacherSatisfaction,
    /// Fairness of access across students.
    DigitalEquity,
    /// Financial pressure on the district; lower is better.
    BudgetStrain,
    /// Graduates' readiness for an AI-shaped job market.
    EmploymentImpact,
    /// Exposure to AI harms such as breaches and bias; lower is better.
    AiVulnerabilityIndex,
}

impl MetricId {
    /// Number of metrics.
    pub const COUNT: usize = 8;

    /// All metrics in display order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AiLiteracy,
        Self::CommunityTrust,
        Self::InnovationIndex,
        Self::TeacherSatisfaction,
        Self::DigitalEquity,
        Self::BudgetStrain,
        Self::EmploymentImpact,
        Self::AiVulnerabilityIndex,
    ];

    /// Position of this metric inside a [`MetricVector`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiLiteracy => "AI_LITERACY",
            Self::CommunityTrust => "COMMUNITY_TRUST",
            Self::InnovationIndex => "INNOVATION_INDEX",
            Self::TeacherSatisfaction => "TEACHER_SATISFACTION",
            Self::DigitalEquity => "DIGITAL_EQUITY",
            Self::BudgetStrain => "BUDGET_STRAIN",
            Self::EmploymentImpact => "EMPLOYMENT_IMPACT",
            Self::AiVulnerabilityIndex => "AI_VULNERABILITY_INDEX",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AiLiteracy => "AI Literacy",
            Self::CommunityTrust => "Community Trust",
            Self::InnovationIndex => "Innovation Index",
            Self::TeacherSatisfaction => "Teacher Satisfaction",
            Self::DigitalEquity => "Digital Equity",
            Self::BudgetStrain => "Budget Strain",
            Self::EmploymentImpact => "Employment Impact",
            Self::AiVulnerabilityIndex => "AI Vulnerability Index",
        }
    }

    /// Which direction counts as an improvement.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::BudgetStrain | Self::AiVulnerabilityIndex => Polarity::LowerIsBetter,
            _ => Polarity::HigherIsBetter,
        }
    }

    /// Full static definition.
    #[must_use]
    pub const fn definition(self) -> OutcomeMetric {
        OutcomeMetric {
            id: self,
            name: self.name(),
            polarity: self.polarity(),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownMetric { id: s.to_string() })
    }
}

/// Whether a larger score is good or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger scores are better (e.g. AI literacy).
    HigherIsBetter,
    /// Larger scores are worse (e.g. budget strain).
    LowerIsBetter,
}

impl Polarity {
    /// Classify a signed change in score.
    #[must_use]
    pub fn assess(self, delta: f64) -> Trend {
        if delta.abs() < Trend::EPSILON || delta.is_nan() {
            return Trend::Unchanged;
        }
        let raised = delta > 0.0;
        match (self, raised) {
            (Self::HigherIsBetter, true) | (Self::LowerIsBetter, false) => Trend::Improved,
            (Self::HigherIsBetter, false) | (Self::LowerIsBetter, true) => Trend::Worsened,
        }
    }
}

/// Polarity-aware direction of a metric relative to a reference score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Moved in the good direction.
    Improved,
    /// Moved in the bad direction.
    Worsened,
    /// No meaningful movement.
    Unchanged,
}

impl Trend {
    /// Changes smaller than this are reported as unchanged.
    pub const EPSILON: f64 = 1e-9;
}

/// Static description of an outcome metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeMetric {
    /// Metric id.
    pub id: MetricId,
    /// Display name.
    pub name: &'static str,
    /// Good direction.
    pub polarity: Polarity,
}

/// One score per metric.
///
/// The vector is total: every [`MetricId`] always has a value, so lookups
/// cannot miss. Serializes as a JSON object keyed by metric id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<MetricId, f64>", from = "BTreeMap<MetricId, f64>")]
pub struct MetricVector {
    values: [f64; MetricId::COUNT],
}

impl MetricVector {
    /// Every metric at the same value.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self {
            values: [value; MetricId::COUNT],
        }
    }

    /// Every metric at [`NEUTRAL_SCORE`].
    #[must_use]
    pub const fn neutral() -> Self {
        Self::splat(NEUTRAL_SCORE)
    }

    /// Every metric at zero; used for offsets and deltas.
    #[must_use]
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Build from values listed in [`MetricId::ALL`] order.
    #[must_use]
    pub const fn from_array(values: [f64; MetricId::COUNT]) -> Self {
        Self { values }
    }

    /// Value for a metric.
    #[must_use]
    pub const fn get(&self, metric: MetricId) -> f64 {
        self.values[metric.index()]
    }

    /// Overwrite the value for a metric.
    pub fn set(&mut self, metric: MetricId, value: f64) {
        self.values[metric.index()] = value;
    }

    /// Add `delta` to a metric.
    pub fn add(&mut self, metric: MetricId, delta: f64) {
        self.values[metric.index()] += delta;
    }

    /// Iterate `(metric, value)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricId, f64)> + '_ {
        MetricId::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Clamp every value to `[MIN_SCORE, MAX_SCORE]`.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        for v in &mut self.values {
            *v = clamp_score(*v);
        }
        self
    }

    /// Element-wise `self - other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = *self;
        for (i, v) in out.values.iter_mut().enumerate() {
            *v -= other.values[i];
        }
        out
    }

    /// Element-wise `self + other`.
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        let mut out = *self;
        for (i, v) in out.values.iter_mut().enumerate() {
            *v += other.values[i];
        }
        out
    }

    /// First metric holding a NaN or infinite value, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(MetricId, f64)> {
        self.iter().find(|(_, v)| !v.is_finite())
    }

    /// True when every value lies in `[MIN_SCORE, MAX_SCORE]`.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.values
            .iter()
            .all(|v| (MIN_SCORE..=MAX_SCORE).contains(v))
    }

    /// Polarity-aware trend of each metric relative to `reference`.
    #[must_use]
    pub fn trends_from(&self, reference: &Self) -> BTreeMap<MetricId, Trend> {
        self.iter()
            .map(|(m, v)| (m, m.polarity().assess(v - reference.get(m))))
            .collect()
    }
}

impl Default for MetricVector {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Index<MetricId> for MetricVector {
    type Output = f64;

    fn index(&self, metric: MetricId) -> &f64 {
        &self.values[metric.index()]
    }
}

impl IndexMut<MetricId> for MetricVector {
    fn index_mut(&mut self, metric: MetricId) -> &mut f64 {
        &mut self.values[metric.index()]
    }
}

impl From<MetricVector> for BTreeMap<MetricId, f64> {
    fn from(v: MetricVector) -> Self {
        v.iter().collect()
    }
}

// Missing keys fall back to the neutral score.
impl From<BTreeMap<MetricId, f64>> for MetricVector {
    fn from(map: BTreeMap<MetricId, f64>) -> Self {
        let mut out = Self::neutral();
        for (m, v) in map {
            out.set(m, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_ids_round_trip_through_strings() {
        for m in MetricId::ALL {
            assert_eq!(m.as_str().parse::<MetricId>().unwrap(), m);
        }
        assert_eq!(
            " ai_literacy ".parse::<MetricId>().unwrap(),
            MetricId::AiLiteracy
        );
        assert!("LITERACY".parse::<MetricId>().is_err());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, m) in MetricId::ALL.into_iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn only_budget_and_vulnerability_are_lower_is_better() {
        let lower: Vec<_> = MetricId::ALL
            .into_iter()
            .filter(|m| m.polarity() == Polarity::LowerIsBetter)
            .collect();
        assert_eq!(
            lower,
            vec![MetricId::BudgetStrain, MetricId::AiVulnerabilityIndex]
        );
    }

    #[test]
    fn polarity_assess() {
        assert_eq!(Polarity::HigherIsBetter.assess(3.0), Trend::Improved);
        assert_eq!(Polarity::HigherIsBetter.assess(-3.0), Trend::Worsened);
        assert_eq!(Polarity::LowerIsBetter.assess(-3.0), Trend::Improved);
        assert_eq!(Polarity::LowerIsBetter.assess(3.0), Trend::Worsened);
        assert_eq!(Polarity::LowerIsBetter.assess(0.0), Trend::Unchanged);
    }

    #[test]
    fn clamped_bounds_every_value() {
        let mut v = MetricVector::neutral();
        v.set(MetricId::AiLiteracy, 140.0);
        v.set(MetricId::BudgetStrain, -12.5);
        let c = v.clamped();
        assert_eq!(c[MetricId::AiLiteracy], 100.0);
        assert_eq!(c[MetricId::BudgetStrain], 0.0);
        assert_eq!(c[MetricId::DigitalEquity], 50.0);
        assert!(c.is_bounded());
        assert!(!v.is_bounded());
    }

    #[test]
    fn serializes_as_keyed_object() {
        let mut v = MetricVector::neutral();
        v.set(MetricId::CommunityTrust, 61.5);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["COMMUNITY_TRUST"], 61.5);
        assert_eq!(json["AI_LITERACY"], 50.0);

        let partial: MetricVector =
            serde_json::from_str(r#"{"BUDGET_STRAIN": 80.0}"#).unwrap();
        assert_eq!(partial[MetricId::BudgetStrain], 80.0);
        assert_eq!(partial[MetricId::AiLiteracy], 50.0);
    }

    #[test]
    fn first_non_finite_reports_metric() {
        let mut v = MetricVector::neutral();
        assert!(v.first_non_finite().is_none());
        v.set(MetricId::EmploymentImpact, f64::NAN);
        let (m, _) = v.first_non_finite().unwrap();
        assert_eq!(m, MetricId::EmploymentImpact);
    }
}
