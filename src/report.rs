//! Serializable snapshot of one complete computation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::MetricVector;
use crate::engine::{Engine, Explanation, TimeSeries};
use crate::error::{SimError, SimResult};
use crate::input::{InputFingerprint, SimulationInput};

/// Everything a front end needs to render one input state.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Digest of the input; equal fingerprints mean equal results.
    pub fingerprint: InputFingerprint,
    /// When the report was produced. Not part of the computation.
    pub generated_at: DateTime<Utc>,
    /// The input the report was computed from.
    pub input: SimulationInput,
    /// Current scores.
    pub metrics: MetricVector,
    /// One trajectory per metric, in display order.
    pub series: Vec<TimeSeries>,
    /// Breakdown of the computation.
    pub explanation: Explanation,
}

impl SimulationReport {
    /// Compute every view of `input`.
    ///
    /// Metrics go through [`Engine::compute_or_baseline`], so a report is
    /// always produced.
    #[must_use]
    pub fn build(engine: &Engine, input: &SimulationInput) -> Self {
        Self {
            fingerprint: input.fingerprint(),
            generated_at: Utc::now(),
            input: input.clone(),
            metrics: engine.compute_or_baseline(input),
            series: engine.generate_all_series(input),
            explanation: engine.explain(input),
        }
    }

    /// Render as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Internal` if serialization fails.
    pub fn to_json(&self, pretty: bool) -> SimResult<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(|e| SimError::internal(format!("failed to serialize report: {e}")))
    }
}
