//! Static catalog of policy levers and outcome metrics.
//!
//! Both sets are closed enums so that every lookup is an exhaustive match;
//! string ids only exist at the serialization boundary.

pub mod metric;
pub mod policy;

pub use metric::{
    clamp_score, MetricId, MetricVector, OutcomeMetric, Polarity, Trend, MAX_SCORE, MIN_SCORE,
    NEUTRAL_SCORE,
};
pub use policy::{PolicyDefinition, PolicyId, Stakeholder};

/// Every lever definition in display order.
#[must_use]
pub fn policies() -> Vec<PolicyDefinition> {
    PolicyId::ALL.into_iter().map(PolicyId::definition).collect()
}

/// Every metric definition in display order.
#[must_use]
pub fn metrics() -> Vec<OutcomeMetric> {
    MetricId::ALL.into_iter().map(MetricId::definition).collect()
}
