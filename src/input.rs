//! Simulation input: which levers are selected, how far each is pushed, and
//! which scenario is active.
//!
//! The presentation layer owns a mutable `SimulationInput` and hands the engine
//! a shared reference on every change. The engine only reads it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::catalog::PolicyId;
use crate::coefficients::PolicyPair;
use crate::error::ValidationError;
use crate::scenario::Scenario;

/// Lever intensity on the 0..=100 slider scale. 50 is neutral.
///
/// Construction never fails: values are rounded and clamped, and NaN becomes
/// neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    /// Lowest slider value.
    pub const MIN: Self = Self(0);
    /// No effect.
    pub const NEUTRAL: Self = Self(50);
    /// Highest slider value.
    pub const MAX: Self = Self(100);

    /// Clamp an integer into range.
    #[must_use]
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(0, i64::from(Self::MAX.0));
        Self(u8::try_from(clamped).unwrap_or(Self::NEUTRAL.0))
    }

    /// Round and clamp a real value. NaN maps to neutral.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::NEUTRAL;
        }
        Self(value.round().clamp(0.0, f64::from(Self::MAX.0)) as u8)
    }

    /// Raw slider value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Signed distance from neutral in `[-1.0, 1.0]`.
    #[must_use]
    pub fn deflection(self) -> f64 {
        (f64::from(self.0) - f64::from(Self::NEUTRAL.0)) / f64::from(Self::NEUTRAL.0)
    }

    /// True at exactly 50.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.0 == Self::NEUTRAL.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<u8> for Intensity {
    fn from(value: u8) -> Self {
        Self::new(i64::from(value))
    }
}

// Any JSON number is accepted and coerced.
impl<'de> Deserialize<'de> for Intensity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::from_f64)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete input snapshot for one computation.
///
/// Intensities of unselected levers are kept (the UI remembers slider
/// positions) but contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    /// Levers switched on.
    #[serde(default)]
    pub selected_policies: BTreeSet<PolicyId>,
    /// Slider positions; missing entries read as neutral.
    #[serde(default)]
    pub policy_intensities: BTreeMap<PolicyId, Intensity>,
    /// Active scenario.
    #[serde(default)]
    pub scenario: Scenario,
}

impl SimulationInput {
    /// Empty selection, neutral sliders, `Normal` scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `policy` and set its intensity.
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyId, intensity: impl Into<Intensity>) -> Self {
        self.selected_policies.insert(policy);
        self.policy_intensities.insert(policy, intensity.into());
        self
    }

    /// Select `policy` without touching its intensity.
    #[must_use]
    pub fn with_selected(mut self, policy: PolicyId) -> Self {
        self.selected_policies.insert(policy);
        self
    }

    /// Deselect `policy`; its slider position is kept.
    #[must_use]
    pub fn without(mut self, policy: PolicyId) -> Self {
        self.selected_policies.remove(&policy);
        self
    }

    /// Set a slider position without changing the selection.
    #[must_use]
    pub fn with_intensity(mut self, policy: PolicyId, intensity: impl Into<Intensity>) -> Self {
        self.policy_intensities.insert(policy, intensity.into());
        self
    }

    /// Switch scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Clear the selection, return every slider to neutral, and go back to `Normal`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Slider position of `policy`, neutral when unset.
    #[must_use]
    pub fn intensity_of(&self, policy: PolicyId) -> Intensity {
        self.policy_intensities
            .get(&policy)
            .copied()
            .unwrap_or_default()
    }

    /// True if `policy` is switched on.
    #[must_use]
    pub fn is_selected(&self, policy: PolicyId) -> bool {
        self.selected_policies.contains(&policy)
    }

    /// True when no lever is switched on.
    #[must_use]
    pub fn has_no_selection(&self) -> bool {
        self.selected_policies.is_empty()
    }

    /// Selected levers with their effective intensity, in id order.
    pub fn selected(&self) -> impl Iterator<Item = (PolicyId, Intensity)> + '_ {
        self.selected_policies
            .iter()
            .map(move |&p| (p, self.intensity_of(p)))
    }

    /// Every unordered pair of selected levers, in a fixed order.
    pub fn active_pairs(&self) -> impl Iterator<Item = PolicyPair> + '_ {
        self.selected_policies
            .iter()
            .enumerate()
            .flat_map(move |(i, &a)| {
                self.selected_policies
                    .iter()
                    .skip(i + 1)
                    .map(move |&b| PolicyPair::new(a, b))
            })
    }

    /// Digest of everything that affects the computed result.
    ///
    /// Unselected sliders are not hashed and an unset slider hashes like an
    /// explicit 50, so two inputs with equal fingerprints compute identical
    /// metrics.
    #[must_use]
    pub fn fingerprint(&self) -> InputFingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"policysim.input.v1");
        hasher.update(self.scenario.as_str().as_bytes());
        for (policy, intensity) in self.selected() {
            hasher.update(&[0xff]);
            hasher.update(policy.as_str().as_bytes());
            hasher.update(&[intensity.value()]);
        }
        InputFingerprint(hasher.finalize())
    }
}

/// Stable digest of a [`SimulationInput`]; renders as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputFingerprint(blake3::Hash);

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

impl Serialize for InputFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Loosely typed input as a browser front end sends it.
///
/// Every field is kept as raw JSON. [`Self::normalize`] turns it into a
/// [`SimulationInput`] without failing: unknown ids, `null`s and values of
/// the wrong JSON type are dropped and odd intensities are coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSimulationInput {
    /// Selected lever ids, normally an array of strings.
    #[serde(default)]
    pub selected_policies: Value,
    /// Slider values keyed by lever id, normally an object of numbers.
    #[serde(default)]
    pub policy_intensities: Value,
    /// Scenario id; absent or not a string means `NORMAL`.
    #[serde(default)]
    pub scenario: Value,
}

impl RawSimulationInput {
    /// Parse from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MalformedInput` if the text is not valid
    /// JSON or not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedInput {
            reason: e.to_string(),
        })
    }

    /// Best-effort conversion into a typed input.
    #[must_use]
    pub fn normalize(&self) -> SimulationInput {
        let mut input = SimulationInput::new();

        for raw in array_entries(&self.selected_policies, "selectedPolicies") {
            match raw.as_str().map(str::parse::<PolicyId>) {
                Some(Ok(policy)) => {
                    input.selected_policies.insert(policy);
                }
                Some(Err(err)) => debug!(target: "policysim::input", %err, "ignoring selected policy"),
                None => debug!(
                    target: "policysim::input",
                    value = %raw,
                    "ignoring non-string selected policy"
                ),
            }
        }

        match &self.policy_intensities {
            Value::Object(entries) => {
                for (raw, value) in entries {
                    let policy = match raw.parse::<PolicyId>() {
                        Ok(policy) => policy,
                        Err(err) => {
                            debug!(target: "policysim::input", %err, "ignoring intensity");
                            continue;
                        }
                    };
                    match coerce_intensity(value) {
                        Some(intensity) => {
                            input.policy_intensities.insert(policy, intensity);
                        }
                        None => debug!(
                            target: "policysim::input",
                            policy = %policy,
                            value = %value,
                            "non-numeric intensity, using neutral"
                        ),
                    }
                }
            }
            Value::Null => {}
            other => debug!(
                target: "policysim::input",
                value = %other,
                "ignoring policyIntensities that is not an object"
            ),
        }

        match &self.scenario {
            Value::String(raw) => match raw.parse::<Scenario>() {
                Ok(scenario) => input.scenario = scenario,
                Err(err) => debug!(target: "policysim::input", %err, "falling back to NORMAL"),
            },
            Value::Null => {}
            other => debug!(
                target: "policysim::input",
                value = %other,
                "non-string scenario, falling back to NORMAL"
            ),
        }

        input
    }
}

fn array_entries<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    match value {
        Value::Array(entries) => entries,
        Value::Null => &[],
        other => {
            debug!(target: "policysim::input", field, value = %other, "ignoring non-array field");
            &[]
        }
    }
}

fn coerce_intensity(value: &Value) -> Option<Intensity> {
    match value {
        Value::Number(n) => n.as_f64().map(Intensity::from_f64),
        Value::String(s) => s.trim().parse::<f64>().ok().map(Intensity::from_f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_clamps_and_rounds() {
        assert_eq!(Intensity::new(-20), Intensity::MIN);
        assert_eq!(Intensity::new(250), Intensity::MAX);
        assert_eq!(Intensity::from_f64(72.5).value(), 73);
        assert_eq!(Intensity::from_f64(72.4).value(), 72);
        assert_eq!(Intensity::from_f64(f64::NAN), Intensity::NEUTRAL);
        assert_eq!(Intensity::from_f64(f64::INFINITY), Intensity::MAX);
        assert_eq!(Intensity::from_f64(f64::NEG_INFINITY), Intensity::MIN);
    }

    #[test]
    fn deflection_spans_minus_one_to_one() {
        assert_eq!(Intensity::MIN.deflection(), -1.0);
        assert_eq!(Intensity::NEUTRAL.deflection(), 0.0);
        assert_eq!(Intensity::MAX.deflection(), 1.0);
        assert_eq!(Intensity::new(75).deflection(), 0.5);
    }

    #[test]
    fn intensity_deserializes_from_any_number() {
        let i: Intensity = serde_json::from_str("130").unwrap();
        assert_eq!(i, Intensity::MAX);
        let i: Intensity = serde_json::from_str("33.6").unwrap();
        assert_eq!(i.value(), 34);
        assert_eq!(serde_json::to_string(&i).unwrap(), "34");
    }

    #[test]
    fn missing_intensity_is_neutral() {
        let input = SimulationInput::new().with_selected(PolicyId::BiasAudit);
        assert_eq!(input.intensity_of(PolicyId::BiasAudit), Intensity::NEUTRAL);
    }

    #[test]
    fn active_pairs_cover_every_combination_once() {
        let input = SimulationInput::new()
            .with_policy(PolicyId::ProtectStd, 80)
            .with_policy(PolicyId::ModelEvalStd, 80)
            .with_policy(PolicyId::BiasAudit, 80);
        let pairs: Vec<_> = input.active_pairs().collect();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&PolicyPair::new(PolicyId::ModelEvalStd, PolicyId::ProtectStd)));

        let single = SimulationInput::new().with_policy(PolicyId::ProtectStd, 80);
        assert_eq!(single.active_pairs().count(), 0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut input = SimulationInput::new()
            .with_policy(PolicyId::EquityAccess, 90)
            .with_scenario(Scenario::FundingCut);
        input.reset();
        assert_eq!(input, SimulationInput::default());
        assert!(input.has_no_selection());
        assert_eq!(input.scenario, Scenario::Normal);
    }

    #[test]
    fn fingerprint_ignores_unselected_and_defaulted_sliders() {
        let a = SimulationInput::new()
            .with_selected(PolicyId::OpenStandards)
            .with_intensity(PolicyId::VendorPartnership, 90);
        let b = SimulationInput::new().with_policy(PolicyId::OpenStandards, 50);
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = b.clone().with_intensity(PolicyId::OpenStandards, 51);
        assert_ne!(b.fingerprint(), c.fingerprint());
        let d = b.clone().with_scenario(Scenario::DataBreach);
        assert_ne!(b.fingerprint(), d.fingerprint());
        assert_eq!(b.fingerprint().to_string().len(), 64);
    }

    #[test]
    fn raw_input_normalizes_leniently() {
        let raw = RawSimulationInput::from_json_str(
            r#"{
                "selectedPolicies": ["PROTECT_STD", "NOT_A_POLICY", "model_eval_std"],
                "policyIntensities": {
                    "PROTECT_STD": 140,
                    "MODEL_EVAL_STD": "72.6",
                    "BIAS_AUDIT": true,
                    "MYSTERY": 10
                },
                "scenario": "tool_bias"
            }"#,
        )
        .unwrap();
        let input = raw.normalize();
        assert_eq!(input.selected_policies.len(), 2);
        assert_eq!(input.intensity_of(PolicyId::ProtectStd), Intensity::MAX);
        assert_eq!(input.intensity_of(PolicyId::ModelEvalStd).value(), 73);
        assert_eq!(input.intensity_of(PolicyId::BiasAudit), Intensity::NEUTRAL);
        assert_eq!(input.scenario, Scenario::ToolBias);
    }

    #[test]
    fn deselecting_keeps_slider_position() {
        let input = SimulationInput::new()
            .with_policy(PolicyId::BiasAudit, 80)
            .with_policy(PolicyId::ParentConsent, 30)
            .without(PolicyId::BiasAudit);
        assert!(!input.is_selected(PolicyId::BiasAudit));
        assert!(input.is_selected(PolicyId::ParentConsent));
        assert_eq!(input.intensity_of(PolicyId::BiasAudit).value(), 80);
        assert!(!input.intensity_of(PolicyId::BiasAudit).is_neutral());

        let reselected = input.with_selected(PolicyId::BiasAudit);
        assert_eq!(reselected.intensity_of(PolicyId::BiasAudit).value(), 80);
    }

    #[test]
    fn only_fifty_is_neutral() {
        assert!(Intensity::default().is_neutral());
        assert!(Intensity::from_f64(f64::NAN).is_neutral());
        assert!(Intensity::from_f64(49.6).is_neutral());
        assert!(!Intensity::new(49).is_neutral());
        assert!(!Intensity::MAX.is_neutral());
    }

    #[test]
    fn raw_input_unknown_scenario_is_normal() {
        let raw = RawSimulationInput {
            scenario: Value::from("ALIENS"),
            ..RawSimulationInput::default()
        };
        assert_eq!(raw.normalize().scenario, Scenario::Normal);
    }

    #[test]
    fn raw_input_tolerates_nulls_and_wrong_types() {
        let raw = RawSimulationInput::from_json_str(
            r#"{"selectedPolicies": null, "policyIntensities": null, "scenario": null}"#,
        )
        .unwrap();
        assert_eq!(raw.normalize(), SimulationInput::new());

        let raw = RawSimulationInput::from_json_str(
            r#"{
                "selectedPolicies": ["PROTECT_STD", 7, null, {"id": "BIAS_AUDIT"}],
                "policyIntensities": [80],
                "scenario": 3
            }"#,
        )
        .unwrap();
        let input = raw.normalize();
        assert_eq!(input.selected().count(), 1);
        assert!(input.is_selected(PolicyId::ProtectStd));
        assert!(input.policy_intensities.is_empty());
        assert_eq!(input.scenario, Scenario::Normal);

        let raw = RawSimulationInput::from_json_str(r#"{"selectedPolicies": "PROTECT_STD"}"#).unwrap();
        assert!(raw.normalize().has_no_selection());
    }

    #[test]
    fn raw_input_rejects_non_object_json() {
        let err = RawSimulationInput::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedInput { .. }));
    }

    #[test]
    fn typed_input_round_trips_as_camel_case() {
        let input = SimulationInput::new()
            .with_policy(PolicyId::AiCurriculum, 65)
            .with_scenario(Scenario::DataBreach);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["selectedPolicies"][0], "AI_CURRICULUM");
        assert_eq!(json["policyIntensities"]["AI_CURRICULUM"], 65);
        assert_eq!(json["scenario"], "DATA_BREACH");
        let back: SimulationInput = serde_json::from_value(json).unwrap();
        assert_eq!(back, input);
    }
}
