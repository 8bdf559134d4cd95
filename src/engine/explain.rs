//! Per-lever and per-interaction breakdown of a computation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{MetricId, MetricVector, PolicyId, Trend};
use crate::coefficients::{coefficients, InteractionKind, MetricEffect, PolicyPair};
use crate::input::{Intensity, SimulationInput};
use crate::scenario::Scenario;

use super::Engine;

/// What one selected lever added, before clamping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyContribution {
    /// Lever.
    pub policy: PolicyId,
    /// Its effective slider position.
    pub intensity: Intensity,
    /// Scaled contribution per affected metric.
    pub effects: Vec<MetricEffect>,
}

/// A synergy or tension that fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveInteraction {
    /// Table the interaction came from.
    pub kind: InteractionKind,
    /// The two levers.
    pub pair: PolicyPair,
    /// Flat deltas applied.
    pub deltas: Vec<MetricEffect>,
    /// Narration.
    pub note: &'static str,
}

/// Full breakdown of one computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    /// One entry per selected lever, in id order.
    pub contributions: Vec<PolicyContribution>,
    /// Fired interactions, synergy before tension for each pair.
    pub interactions: Vec<ActiveInteraction>,
    /// Active scenario.
    pub scenario: Scenario,
    /// Offset the scenario applied.
    pub scenario_offset: MetricVector,
    /// Final scores, identical to `Engine::compute_metrics`.
    pub metrics: MetricVector,
    /// Direction of each final score relative to neutral, honoring polarity.
    pub trends: BTreeMap<MetricId, Trend>,
}

impl Explanation {
    /// Fired interactions of one kind.
    pub fn interactions_of(&self, kind: InteractionKind) -> impl Iterator<Item = &ActiveInteraction> {
        self.interactions.iter().filter(move |i| i.kind == kind)
    }

    /// Net linear contribution to a metric across all levers.
    #[must_use]
    pub fn linear_total(&self, metric: MetricId) -> f64 {
        self.contributions
            .iter()
            .flat_map(|c| c.effects.iter())
            .filter(|e| e.metric == metric)
            .map(|e| e.coefficient)
            .sum()
    }
}

pub(super) fn build(engine: &Engine, input: &SimulationInput) -> Explanation {
    let contributions = input
        .selected()
        .map(|(policy, intensity)| {
            let deflection = intensity.deflection();
            PolicyContribution {
                policy,
                intensity,
                effects: coefficients(policy)
                    .iter()
                    .map(|e| MetricEffect {
                        metric: e.metric,
                        coefficient: e.coefficient * deflection,
                    })
                    .collect(),
            }
        })
        .collect();

    let interactions = engine
        .active_interactions(input)
        .map(|(kind, effect)| ActiveInteraction {
            kind,
            pair: effect.pair,
            deltas: effect.deltas.to_vec(),
            note: effect.note,
        })
        .collect();

    let metrics = engine.compute_metrics(input);

    Explanation {
        contributions,
        interactions,
        scenario: input.scenario,
        scenario_offset: input.scenario.offset(),
        metrics,
        trends: metrics.trends_from(&MetricVector::neutral()),
    }
}
