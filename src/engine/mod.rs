//! The metrics engine.
//!
//! `Engine` is a pure function of its input: it holds only immutable
//! configuration, never caches, and every call recomputes from scratch.
//!
//! Computation order:
//! 1. start every metric at the neutral score (50);
//! 2. add each selected lever's coefficients scaled by `(intensity - 50) / 50`;
//! 3. add the flat deltas of every synergy and tension whose pair is fully selected;
//! 4. clamp to `[0, 100]`;
//! 5. shift by the scenario offset and clamp again.
//!
//! With nothing selected, steps 2-3 are skipped, so the result is the
//! scenario's literal baseline.

pub mod explain;
pub mod series;

use tracing::{debug, warn};

use crate::catalog::{MetricId, MetricVector, NEUTRAL_SCORE};
use crate::coefficients::{coefficients, lookup, InteractionEffect, InteractionKind};
use crate::config::EngineConfig;
use crate::error::{ExecutionError, SimResult};
use crate::input::SimulationInput;
use crate::scenario::apply_scenario;

pub use explain::{ActiveInteraction, Explanation, PolicyContribution};
pub use series::{CombinedPoint, SeriesCurve, SeriesPoint, TimeSeries};

/// Deterministic scoring engine.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the year range is empty or too long.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current score of every metric.
    #[must_use]
    pub fn compute_metrics(&self, input: &SimulationInput) -> MetricVector {
        let policy_driven = self.policy_driven(input);
        apply_scenario(&policy_driven, input.scenario)
    }

    /// Like [`Self::compute_metrics`], but reports a non-finite result as an error.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::NonFiniteMetric` naming the first metric that
    /// is NaN or infinite.
    pub fn try_compute_metrics(&self, input: &SimulationInput) -> SimResult<MetricVector> {
        let metrics = self.compute_metrics(input);
        if let Some((metric, value)) = metrics.first_non_finite() {
            return Err(ExecutionError::NonFiniteMetric { metric, value }.into());
        }
        Ok(metrics)
    }

    /// Call-boundary entry point that always yields something to display.
    ///
    /// Any execution failure is logged and replaced by the neutral baseline.
    #[must_use]
    pub fn compute_or_baseline(&self, input: &SimulationInput) -> MetricVector {
        match self.try_compute_metrics(input) {
            Ok(metrics) => metrics,
            // Unreachable while every coefficient and baseline is finite.
            Err(err) => {
                warn!(
                    target: "policysim::engine",
                    error = %err,
                    fingerprint = %input.fingerprint(),
                    "metric computation failed, showing neutral baseline"
                );
                MetricVector::neutral()
            }
        }
    }

    /// Yearly trajectory of one metric, from the neutral score in the first
    /// year to the computed score in the last.
    #[must_use]
    pub fn generate_series(&self, metric: MetricId, input: &SimulationInput) -> TimeSeries {
        let target = self.compute_metrics(input)[metric];
        self.series_to(metric, target)
    }

    /// Trajectories of every metric, in display order.
    #[must_use]
    pub fn generate_all_series(&self, input: &SimulationInput) -> Vec<TimeSeries> {
        let metrics = self.compute_metrics(input);
        MetricId::ALL
            .into_iter()
            .map(|m| self.series_to(m, metrics[m]))
            .collect()
    }

    /// Several metrics generated independently and merged by year.
    #[must_use]
    pub fn generate_combined(
        &self,
        metrics: &[MetricId],
        input: &SimulationInput,
    ) -> Vec<CombinedPoint> {
        let series: Vec<TimeSeries> = metrics
            .iter()
            .map(|&m| self.generate_series(m, input))
            .collect();
        series::merge_by_year(&series)
    }

    /// Break the computation down for explanatory views.
    #[must_use]
    pub fn explain(&self, input: &SimulationInput) -> Explanation {
        explain::build(self, input)
    }

    fn series_to(&self, metric: MetricId, target: f64) -> TimeSeries {
        series::interpolate(
            metric,
            NEUTRAL_SCORE,
            target,
            self.config.start_year,
            self.config.end_year,
            self.config.curve,
        )
    }

    // Steps 1-4: everything except the scenario overlay.
    fn policy_driven(&self, input: &SimulationInput) -> MetricVector {
        let mut metrics = MetricVector::neutral();
        if input.has_no_selection() {
            return metrics;
        }

        for (policy, intensity) in input.selected() {
            let deflection = intensity.deflection();
            for effect in coefficients(policy) {
                metrics.add(effect.metric, effect.coefficient * deflection);
            }
        }

        let mut fired = 0usize;
        for (_, effect) in self.active_interactions(input) {
            effect.apply_to(&mut metrics);
            fired += 1;
        }

        debug!(
            target: "policysim::engine",
            selected = input.selected_policies.len(),
            interactions = fired,
            scenario = %input.scenario,
            "computed policy-driven metrics"
        );

        metrics.clamped()
    }

    /// Synergies and tensions whose pair is fully selected, in a fixed order.
    pub(crate) fn active_interactions<'a>(
        &self,
        input: &'a SimulationInput,
    ) -> impl Iterator<Item = (InteractionKind, &'static InteractionEffect)> + 'a {
        let enabled = self.config.include_interactions;
        input
            .active_pairs()
            .filter(move |_| enabled)
            .flat_map(|pair| {
                [InteractionKind::Synergy, InteractionKind::Tension]
                    .into_iter()
                    .filter_map(move |kind| lookup(kind, pair).map(|e| (kind, e)))
            })
    }
}

/// [`Engine::compute_metrics`] with the default configuration.
#[must_use]
pub fn compute_metrics(input: &SimulationInput) -> MetricVector {
    Engine::default().compute_metrics(input)
}

/// [`Engine::generate_series`] with the default configuration.
#[must_use]
pub fn generate_series(metric: MetricId, input: &SimulationInput) -> TimeSeries {
    Engine::default().generate_series(metric, input)
}
