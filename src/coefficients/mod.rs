//! Coefficient tables: linear per-lever effects plus pairwise interactions.
//!
//! All tables are static, hand-curated data. They are illustrative and not
//! calibrated against any real-world study.

pub mod interactions;
pub mod linear;

pub use interactions::{
    interactions_for, lookup, synergy, tension, InteractionEffect, InteractionKind, PolicyPair,
    SYNERGIES, TENSIONS,
};
pub use linear::{coefficient, coefficient_map, coefficients, MetricEffect};
