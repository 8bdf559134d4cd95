//! # PolicySim - scoring engine for an education AI policy simulator
//!
//! A user moves intensity sliders for fifteen policy levers owned by five
//! stakeholder roles. PolicySim turns those slider positions into eight
//! outcome scores on a 0-100 scale and projects each score over 2025-2040.
//!
//! ## Core Concepts
//!
//! - **Policy lever**: an independently adjustable input, 0-100, neutral at 50
//! - **Outcome metric**: a derived score, 0-100, where higher is better or worse depending on polarity
//! - **Synergy / Tension**: flat bonuses or penalties that fire when both levers of a pair are selected
//! - **Scenario**: an external shock applied as an offset from the normal baseline
//!
//! The engine is a pure function: the caller owns the mutable input and asks
//! for a fresh result on every change.
//!
//! ## Usage
//!
//! ```
//! use policysim::{compute_metrics, generate_series, MetricId, PolicyId, Scenario, SimulationInput};
//!
//! let input = SimulationInput::new()
//!     .with_policy(PolicyId::ProtectStd, 100)
//!     .with_policy(PolicyId::ModelEvalStd, 100)
//!     .with_scenario(Scenario::Normal);
//!
//! let metrics = compute_metrics(&input);
//! assert!(metrics[MetricId::AiVulnerabilityIndex] < 50.0);
//!
//! let series = generate_series(MetricId::CommunityTrust, &input);
//! assert_eq!(series.points.len(), 16);
//! assert_eq!(series.last_value(), Some(metrics[MetricId::CommunityTrust]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod coefficients;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod scenario;

// Re-export primary types at crate root for convenience
pub use catalog::{
    MetricId, MetricVector, OutcomeMetric, Polarity, PolicyDefinition, PolicyId, Stakeholder,
    Trend, NEUTRAL_SCORE,
};
pub use coefficients::{
    coefficient_map, coefficients, synergy, tension, InteractionEffect, InteractionKind,
    MetricEffect, PolicyPair,
};
pub use config::EngineConfig;
pub use engine::{
    compute_metrics, generate_series, CombinedPoint, Engine, Explanation, SeriesCurve,
    SeriesPoint, TimeSeries,
};
pub use error::{ConfigError, ExecutionError, SimError, SimResult, ValidationError};
pub use input::{InputFingerprint, Intensity, RawSimulationInput, SimulationInput};
pub use report::SimulationReport;
pub use scenario::{apply_scenario, Scenario};
