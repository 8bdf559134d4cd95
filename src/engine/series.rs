//! Yearly trajectories from the neutral baseline to a computed score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::MetricId;

/// Progress curve between the first and last point of a series.
///
/// Every curve maps `0 -> 0` and `1 -> 1` and is non-decreasing, so a series
/// always moves monotonically toward its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesCurve {
    /// Constant yearly change.
    Linear,
    /// Slow start: policies take time to show results.
    #[default]
    EaseIn,
    /// Fast start that levels off.
    EaseOut,
    /// Slow start and slow finish.
    Smoothstep,
}

impl SeriesCurve {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn shape(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// One yearly value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar year.
    pub year: i32,
    /// Metric score.
    pub value: f64,
}

/// Trajectory of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Metric this series belongs to.
    pub metric: MetricId,
    /// One point per year, oldest first.
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Value in the first year.
    #[must_use]
    pub fn first_value(&self) -> Option<f64> {
        self.points.first().map(|p| p.value)
    }

    /// Value in the final year.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Value for a given year, if it is covered.
    #[must_use]
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points.iter().find(|p| p.year == year).map(|p| p.value)
    }
}

/// Several metrics at one year, for multi-line charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoint {
    /// Calendar year.
    pub year: i32,
    /// Score per requested metric.
    pub values: BTreeMap<MetricId, f64>,
}

/// Interpolate from `start` to `target` over `start_year..=end_year`.
///
/// The first point is exactly `start` and the last exactly `target`. An
/// empty or unrepresentable year range yields a single point at `target`.
#[must_use]
pub fn interpolate(
    metric: MetricId,
    start: f64,
    target: f64,
    start_year: i32,
    end_year: i32,
    curve: SeriesCurve,
) -> TimeSeries {
    let span = end_year.checked_sub(start_year).unwrap_or(0);
    if span <= 0 {
        return TimeSeries {
            metric,
            points: vec![SeriesPoint {
                year: start_year,
                value: target,
            }],
        };
    }

    let delta = target - start;
    let mut points: Vec<SeriesPoint> = (0..=span)
        .map(|step| {
            let s = curve.shape(f64::from(step) / f64::from(span));
            SeriesPoint {
                year: start_year + step,
                value: start + delta * s,
            }
        })
        .collect();

    // `start + (target - start)` can be off by one ulp.
    if let Some(last) = points.last_mut() {
        last.value = target;
    }

    TimeSeries { metric, points }
}

/// Merge independently generated series by year.
///
/// Years missing from some series are still emitted with the metrics that
/// do cover them.
#[must_use]
pub fn merge_by_year(series: &[TimeSeries]) -> Vec<CombinedPoint> {
    let mut by_year: BTreeMap<i32, BTreeMap<MetricId, f64>> = BTreeMap::new();
    for s in series {
        for p in &s.points {
            by_year.entry(p.year).or_default().insert(s.metric, p.value);
        }
    }
    by_year
        .into_iter()
        .map(|(year, values)| CombinedPoint { year, values })
        .collect()
}
