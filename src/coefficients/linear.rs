//! Per-lever linear coefficients.
//!
//! A coefficient is the number of score points a lever adds to a metric at
//! full deflection (intensity 0 or 100). At intensity 50 the lever
//! contributes nothing; in between the contribution scales linearly with
//! `(intensity - 50) / 50`, so pulling a lever below neutral reverses its
//! effect.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{MetricId, PolicyId};

use MetricId::{
    AiLiteracy, AiVulnerabilityIndex, BudgetStrain, CommunityTrust, DigitalEquity,
    EmploymentImpact, InnovationIndex, TeacherSatisfaction,
};

/// Signed effect of one lever (or interaction) on one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricEffect {
    /// Affected metric.
    pub metric: MetricId,
    /// Score points at full strength.
    pub coefficient: f64,
}

const fn fx(metric: MetricId, coefficient: f64) -> MetricEffect {
    MetricEffect { metric, coefficient }
}

const AI_PD_FUNDING: &[MetricEffect] = &[
    fx(AiLiteracy, 12.0),
    fx(TeacherSatisfaction, 14.0),
    fx(InnovationIndex, 5.0),
    fx(EmploymentImpact, 4.0),
    fx(BudgetStrain, 10.0),
];

const INFRA_INVEST: &[MetricEffect] = &[
    fx(DigitalEquity, 15.0),
    fx(InnovationIndex, 6.0),
    fx(AiLiteracy, 5.0),
    fx(BudgetStrain, 14.0),
    fx(AiVulnerabilityIndex, 4.0),
];

const PROCUREMENT_STD: &[MetricEffect] = &[
    fx(AiVulnerabilityIndex, -10.0),
    fx(CommunityTrust, 6.0),
    fx(InnovationIndex, -5.0),
    fx(BudgetStrain, 3.0),
];

const AI_CURRICULUM: &[MetricEffect] = &[
    fx(AiLiteracy, 16.0),
    fx(EmploymentImpact, 8.0),
    fx(TeacherSatisfaction, -4.0),
    fx(BudgetStrain, 4.0),
];

const TEACHER_AUTONOMY: &[MetricEffect] = &[
    fx(TeacherSatisfaction, 15.0),
    fx(InnovationIndex, 6.0),
    fx(DigitalEquity, -5.0),
    fx(AiVulnerabilityIndex, 4.0),
];

const ASSESSMENT_REFORM: &[MetricEffect] = &[
    fx(AiLiteracy, 7.0),
    fx(EmploymentImpact, 5.0),
    fx(CommunityTrust, 4.0),
    fx(TeacherSatisfaction, -5.0),
];

const PARENT_CONSENT: &[MetricEffect] = &[
    fx(CommunityTrust, 12.0),
    fx(AiVulnerabilityIndex, -5.0),
    fx(InnovationIndex, -6.0),
    fx(TeacherSatisfaction, -3.0),
];

const COMMUNITY_OVERSIGHT: &[MetricEffect] = &[
    fx(CommunityTrust, 14.0),
    fx(AiVulnerabilityIndex, -4.0),
    fx(InnovationIndex, -4.0),
    fx(BudgetStrain, 3.0),
];

const EQUITY_ACCESS: &[MetricEffect] = &[
    fx(DigitalEquity, 18.0),
    fx(CommunityTrust, 5.0),
    fx(AiLiteracy, 4.0),
    fx(BudgetStrain, 9.0),
];

const VENDOR_PARTNERSHIP: &[MetricEffect] = &[
    fx(InnovationIndex, 14.0),
    fx(EmploymentImpact, 5.0),
    fx(BudgetStrain, -6.0),
    fx(CommunityTrust, -7.0),
    fx(AiVulnerabilityIndex, 8.0),
];

const OPEN_STANDARDS: &[MetricEffect] = &[
    fx(InnovationIndex, 8.0),
    fx(DigitalEquity, 6.0),
    fx(BudgetStrain, -4.0),
    fx(AiVulnerabilityIndex, -3.0),
];

const INNOVATION_SANDBOX: &[MetricEffect] = &[
    fx(InnovationIndex, 16.0),
    fx(EmploymentImpact, 6.0),
    fx(AiLiteracy, 5.0),
    fx(TeacherSatisfaction, 3.0),
    fx(AiVulnerabilityIndex, 6.0),
];

const PROTECT_STD: &[MetricEffect] = &[
    fx(AiVulnerabilityIndex, -12.0),
    fx(CommunityTrust, 10.0),
    fx(InnovationIndex, -4.0),
    fx(BudgetStrain, 4.0),
];

const MODEL_EVAL_STD: &[MetricEffect] = &[
    fx(AiVulnerabilityIndex, -10.0),
    fx(CommunityTrust, 4.0),
    fx(InnovationIndex, -3.0),
    fx(BudgetStrain, 3.0),
];

const BIAS_AUDIT: &[MetricEffect] = &[
    fx(DigitalEquity, 8.0),
    fx(CommunityTrust, 8.0),
    fx(AiVulnerabilityIndex, -6.0),
    fx(BudgetStrain, 4.0),
];

/// Linear coefficients for a lever. Metrics not listed are unaffected.
#[must_use]
pub const fn coefficients(policy: PolicyId) -> &'static [MetricEffect] {
    match policy {
        PolicyId::AiPdFunding => AI_PD_FUNDING,
        PolicyId::InfraInvest => INFRA_INVEST,
        PolicyId::ProcurementStd => PROCUREMENT_STD,
        PolicyId::AiCurriculum => AI_CURRICULUM,
        PolicyId::TeacherAutonomy => TEACHER_AUTONOMY,
        PolicyId::AssessmentReform => ASSESSMENT_REFORM,
        PolicyId::ParentConsent => PARENT_CONSENT,
        PolicyId::CommunityOversight => COMMUNITY_OVERSIGHT,
        PolicyId::EquityAccess => EQUITY_ACCESS,
        PolicyId::VendorPartnership => VENDOR_PARTNERSHIP,
        PolicyId::OpenStandards => OPEN_STANDARDS,
        PolicyId::InnovationSandbox => INNOVATION_SANDBOX,
        PolicyId::ProtectStd => PROTECT_STD,
        PolicyId::ModelEvalStd => MODEL_EVAL_STD,
        PolicyId::BiasAudit => BIAS_AUDIT,
    }
}

/// Coefficient of `policy` on `metric`; zero when the lever does not touch it.
#[must_use]
pub fn coefficient(policy: PolicyId, metric: MetricId) -> f64 {
    coefficients(policy)
        .iter()
        .find(|e| e.metric == metric)
        .map_or(0.0, |e| e.coefficient)
}

/// Coefficients keyed by metric, for explanatory views.
#[must_use]
pub fn coefficient_map(policy: PolicyId) -> BTreeMap<MetricId, f64> {
    coefficients(policy)
        .iter()
        .map(|e| (e.metric, e.coefficient))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_lever_affects_something() {
        for p in PolicyId::ALL {
            assert!(!coefficients(p).is_empty(), "{p} has no coefficients");
        }
    }

    #[test]
    fn no_metric_listed_twice_for_a_lever() {
        for p in PolicyId::ALL {
            let map = coefficient_map(p);
            assert_eq!(map.len(), coefficients(p).len(), "{p} repeats a metric");
        }
    }

    #[test]
    fn coefficient_lookup_defaults_to_zero() {
        assert_eq!(coefficient(PolicyId::ProtectStd, MetricId::AiVulnerabilityIndex), -12.0);
        assert_eq!(coefficient(PolicyId::ProtectStd, MetricId::EmploymentImpact), 0.0);
    }

    #[test]
    fn safeguards_lower_vulnerability() {
        for p in [PolicyId::ProtectStd, PolicyId::ModelEvalStd, PolicyId::BiasAudit] {
            assert!(coefficient(p, MetricId::AiVulnerabilityIndex) < 0.0, "{p}");
        }
    }
}
