//! Pairwise synergy and tension tables.
//!
//! An interaction fires when both levers of its pair are selected. Its deltas
//! are flat score points: they do not scale with either lever's intensity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{MetricId, MetricVector, PolicyId};
use crate::error::ValidationError;

use super::linear::MetricEffect;

use MetricId::{
    AiLiteracy, AiVulnerabilityIndex, BudgetStrain, CommunityTrust, DigitalEquity,
    EmploymentImpact, InnovationIndex, TeacherSatisfaction,
};

/// Unordered pair of levers, stored with the lower id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[PolicyId; 2]", from = "[PolicyId; 2]")]
pub struct PolicyPair {
    first: PolicyId,
    second: PolicyId,
}

impl PolicyPair {
    /// Build the canonical pair; argument order does not matter.
    #[must_use]
    pub const fn new(a: PolicyId, b: PolicyId) -> Self {
        if (a as u8) <= (b as u8) {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lower member.
    #[must_use]
    pub const fn first(&self) -> PolicyId {
        self.first
    }

    /// Higher member.
    #[must_use]
    pub const fn second(&self) -> PolicyId {
        self.second
    }

    /// True if `policy` is one of the two members.
    #[must_use]
    pub fn contains(&self, policy: PolicyId) -> bool {
        self.first == policy || self.second == policy
    }

    /// The member that is not `policy`, if `policy` belongs to the pair.
    #[must_use]
    pub fn partner_of(&self, policy: PolicyId) -> Option<PolicyId> {
        if self.first == policy {
            Some(self.second)
        } else if self.second == policy {
            Some(self.first)
        } else {
            None
        }
    }
}

impl From<[PolicyId; 2]> for PolicyPair {
    fn from([a, b]: [PolicyId; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<PolicyPair> for [PolicyId; 2] {
    fn from(pair: PolicyPair) -> Self {
        [pair.first, pair.second]
    }
}

impl fmt::Display for PolicyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

/// Parses `"A+B"`, `"A|B"` or `"A,B"` in either order.
impl FromStr for PolicyPair {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(['+', '|', ',']);
        let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ValidationError::UnknownPolicy { id: s.to_string() });
        };
        Ok(Self::new(a.parse()?, b.parse()?))
    }
}

/// Which table an interaction comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Bonus from levers that reinforce each other.
    Synergy,
    /// Penalty from levers that pull against each other.
    Tension,
}

impl InteractionKind {
    /// The static table for this kind.
    #[must_use]
    pub const fn table(self) -> &'static [InteractionEffect] {
        match self {
            Self::Synergy => SYNERGIES,
            Self::Tension => TENSIONS,
        }
    }
}

/// Flat metric deltas that apply while both levers of `pair` are selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionEffect {
    /// The two levers.
    pub pair: PolicyPair,
    /// Score points added per metric.
    pub deltas: &'static [MetricEffect],
    /// One-line narration for explanatory views.
    pub note: &'static str,
}

impl InteractionEffect {
    /// Add every delta to `metrics`.
    pub fn apply_to(&self, metrics: &mut MetricVector) {
        for d in self.deltas {
            metrics.add(d.metric, d.coefficient);
        }
    }

    /// Delta on one metric; zero when not listed.
    #[must_use]
    pub fn delta(&self, metric: MetricId) -> f64 {
        self.deltas
            .iter()
            .filter(|d| d.metric == metric)
            .map(|d| d.coefficient)
            .sum()
    }
}

const fn d(metric: MetricId, coefficient: f64) -> MetricEffect {
    MetricEffect { metric, coefficient }
}

const fn pair(a: PolicyId, b: PolicyId) -> PolicyPair {
    PolicyPair::new(a, b)
}

/// Synergy table.
pub static SYNERGIES: &[InteractionEffect] = &[
    InteractionEffect {
        pair: pair(PolicyId::ProtectStd, PolicyId::ModelEvalStd),
        deltas: &[d(AiVulnerabilityIndex, -6.0), d(CommunityTrust, 3.0)],
        note: "Data protection and model evaluation close each other's gaps",
    },
    InteractionEffect {
        pair: pair(PolicyId::AiPdFunding, PolicyId::AiCurriculum),
        deltas: &[d(AiLiteracy, 6.0), d(TeacherSatisfaction, 4.0)],
        note: "Trained teachers deliver the AI curriculum with confidence",
    },
    InteractionEffect {
        pair: pair(PolicyId::InfraInvest, PolicyId::EquityAccess),
        deltas: &[d(DigitalEquity, 7.0), d(AiLiteracy, 2.0)],
        note: "New devices reach the students who lacked them",
    },
    InteractionEffect {
        pair: pair(PolicyId::OpenStandards, PolicyId::ProcurementStd),
        deltas: &[d(AiVulnerabilityIndex, -4.0), d(BudgetStrain, -3.0)],
        note: "Interoperable procurement avoids lock-in and unvetted tools",
    },
    InteractionEffect {
        pair: pair(PolicyId::BiasAudit, PolicyId::CommunityOversight),
        deltas: &[d(CommunityTrust, 6.0), d(DigitalEquity, 3.0)],
        note: "Audit findings are reviewed in public",
    },
    InteractionEffect {
        pair: pair(PolicyId::InnovationSandbox, PolicyId::ModelEvalStd),
        deltas: &[d(InnovationIndex, 4.0), d(AiVulnerabilityIndex, -3.0)],
        note: "Pilots are evaluated before they scale",
    },
    InteractionEffect {
        pair: pair(PolicyId::TeacherAutonomy, PolicyId::AiPdFunding),
        deltas: &[d(TeacherSatisfaction, 5.0), d(InnovationIndex, 3.0)],
        note: "Teachers trained in AI use their autonomy well",
    },
    InteractionEffect {
        pair: pair(PolicyId::ParentConsent, PolicyId::ProtectStd),
        deltas: &[d(CommunityTrust, 5.0)],
        note: "Families see both consent and safeguards",
    },
    InteractionEffect {
        pair: pair(PolicyId::AssessmentReform, PolicyId::AiCurriculum),
        deltas: &[
            d(AiLiteracy, 4.0),
            d(EmploymentImpact, 3.0),
            d(TeacherSatisfaction, -2.0),
        ],
        note: "Assessments measure what the new curriculum teaches, at a workload cost",
    },
];

/// Tension table.
pub static TENSIONS: &[InteractionEffect] = &[
    InteractionEffect {
        pair: pair(PolicyId::VendorPartnership, PolicyId::ProtectStd),
        deltas: &[
            d(InnovationIndex, -4.0),
            d(BudgetStrain, 4.0),
            d(CommunityTrust, -3.0),
        ],
        note: "Vendors must retrofit products to meet data protection rules",
    },
    InteractionEffect {
        pair: pair(PolicyId::InnovationSandbox, PolicyId::ParentConsent),
        deltas: &[d(InnovationIndex, -5.0), d(CommunityTrust, -3.0)],
        note: "Consent requirements slow pilot enrollment",
    },
    InteractionEffect {
        pair: pair(PolicyId::VendorPartnership, PolicyId::CommunityOversight),
        deltas: &[d(CommunityTrust, -4.0), d(InnovationIndex, -3.0)],
        note: "The oversight board contests vendor influence",
    },
    InteractionEffect {
        pair: pair(PolicyId::InfraInvest, PolicyId::AiPdFunding),
        deltas: &[d(BudgetStrain, 6.0)],
        note: "Two large spending programs compete for the same budget",
    },
    InteractionEffect {
        pair: pair(PolicyId::EquityAccess, PolicyId::InnovationSandbox),
        deltas: &[d(DigitalEquity, -4.0), d(BudgetStrain, 3.0)],
        note: "Pilots concentrate resources in a few schools",
    },
    InteractionEffect {
        pair: pair(PolicyId::TeacherAutonomy, PolicyId::ProcurementStd),
        deltas: &[d(TeacherSatisfaction, -4.0), d(AiVulnerabilityIndex, 2.0)],
        note: "Teachers work around the approved tool list",
    },
];

/// Look up a pair in one table.
#[must_use]
pub fn lookup(kind: InteractionKind, pair: PolicyPair) -> Option<&'static InteractionEffect> {
    kind.table().iter().find(|e| e.pair == pair)
}

/// Synergy between two levers, in either order.
#[must_use]
pub fn synergy(a: PolicyId, b: PolicyId) -> Option<&'static InteractionEffect> {
    lookup(InteractionKind::Synergy, PolicyPair::new(a, b))
}

/// Tension between two levers, in either order.
#[must_use]
pub fn tension(a: PolicyId, b: PolicyId) -> Option<&'static InteractionEffect> {
    lookup(InteractionKind::Tension, PolicyPair::new(a, b))
}

/// Every interaction a lever takes part in, synergies first.
pub fn interactions_for(
    policy: PolicyId,
) -> impl Iterator<Item = (InteractionKind, &'static InteractionEffect)> {
    let synergies = SYNERGIES
        .iter()
        .map(|e| (InteractionKind::Synergy, e));
    let tensions = TENSIONS.iter().map(|e| (InteractionKind::Tension, e));
    synergies
        .chain(tensions)
        .filter(move |(_, e)| e.pair.contains(policy))
}
