//! Policy levers and the stakeholder roles that own them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stakeholder role that owns a group of levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stakeholder {
    /// Superintendent and district office.
    DistrictAdmin,
    /// Principals and curriculum leads.
    EducationLeader,
    /// Parents and community groups.
    CommunityRep,
    /// Vendors of classroom AI tools.
    EdTechIndustry,
    /// Researchers and ethics boards.
    ResearchEthics,
}

impl Stakeholder {
    /// All stakeholders in display order.
    pub const ALL: [Self; 5] = [
        Self::DistrictAdmin,
        Self::EducationLeader,
        Self::CommunityRep,
        Self::EdTechIndustry,
        Self::ResearchEthics,
    ];

    /// Human-readable role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DistrictAdmin => "District Administrator",
            Self::EducationLeader => "Education Leader",
            Self::CommunityRep => "Community Representative",
            Self::EdTechIndustry => "EdTech Industry",
            Self::ResearchEthics => "Research & Ethics",
        }
    }

    /// Levers owned by this role, in display order.
    pub fn policies(self) -> impl Iterator<Item = PolicyId> {
        PolicyId::ALL
            .into_iter()
            .filter(move |p| p.stakeholder() == self)
    }
}

impl fmt::Display for Stakeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a policy lever.
///
/// The set is closed: adding a lever means adding a variant, and every
/// table keyed by policy is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyId {
    /// Funding for teacher professional development on AI.
    AiPdFunding,
    /// Devices, connectivity and compute for schools.
    InfraInvest,
    /// Procurement standards for AI tools.
    ProcurementStd,
    /// AI literacy in the curriculum.
    AiCurriculum,
    /// Teacher discretion over classroom AI use.
    TeacherAutonomy,
    /// Assessment redesigned for AI-assisted work.
    AssessmentReform,
    /// Parental consent before student data reaches AI tools.
    ParentConsent,
    /// Community board reviewing AI deployments.
    CommunityOversight,
    /// Equal access to AI tools across schools.
    EquityAccess,
    /// Partnerships with AI vendors.
    VendorPartnership,
    /// Interoperability and open data standards.
    OpenStandards,
    /// Supervised pilots of new AI tools.
    InnovationSandbox,
    /// Student data protection standards.
    ProtectStd,
    /// Evaluation standards for AI models before use.
    ModelEvalStd,
    /// Regular bias audits of deployed tools.
    BiasAudit,
}

impl PolicyId {
    /// Number of levers.
    pub const COUNT: usize = 15;

    /// All levers in display order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AiPdFunding,
        Self::InfraInvest,
        Self::ProcurementStd,
        Self::AiCurriculum,
        Self::TeacherAutonomy,
        Self::AssessmentReform,
        Self::ParentConsent,
        Self::CommunityOversight,
        Self::EquityAccess,
        Self::VendorPartnership,
        Self::OpenStandards,
        Self::InnovationSandbox,
        Self::ProtectStd,
        Self::ModelEvalStd,
        Self::BiasAudit,
    ];

    /// Stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiPdFunding => "AI_PD_FUNDING",
            Self::InfraInvest => "INFRA_INVEST",
            Self::ProcurementStd => "PROCUREMENT_STD",
            Self::AiCurriculum => "AI_CURRICULUM",
            Self::TeacherAutonomy => "TEACHER_AUTONOMY",
            Self::AssessmentReform => "ASSESSMENT_REFORM",
            Self::ParentConsent => "PARENT_CONSENT",
            Self::CommunityOversight => "COMMUNITY_OVERSIGHT",
            Self::EquityAccess => "EQUITY_ACCESS",
            Self::VendorPartnership => "VENDOR_PARTNERSHIP",
            Self::OpenStandards => "OPEN_STANDARDS",
            Self::InnovationSandbox => "INNOVATION_SANDBOX",
            Self::ProtectStd => "PROTECT_STD",
            Self::ModelEvalStd => "MODEL_EVAL_STD",
            Self::BiasAudit => "BIAS_AUDIT",
        }
    }

    /// Human-readable lever name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AiPdFunding => "AI Professional Development Funding",
            Self::InfraInvest => "Device & Connectivity Investment",
            Self::ProcurementStd => "AI Procurement Standards",
            Self::AiCurriculum => "AI Literacy Curriculum",
            Self::TeacherAutonomy => "Teacher Autonomy over AI Tools",
            Self::AssessmentReform => "AI-Aware Assessment Reform",
            Self::ParentConsent => "Parental Consent & Transparency",
            Self::CommunityOversight => "Community Oversight Board",
            Self::EquityAccess => "Equitable Access Program",
            Self::VendorPartnership => "Vendor Partnership Program",
            Self::OpenStandards => "Open Interoperability Standards",
            Self::InnovationSandbox => "Innovation Sandbox Pilots",
            Self::ProtectStd => "Student Data Protection Standards",
            Self::ModelEvalStd => "AI Model Evaluation Standards",
            Self::BiasAudit => "Algorithmic Bias Audits",
        }
    }

    /// Owning stakeholder.
    #[must_use]
    pub const fn stakeholder(self) -> Stakeholder {
        match self {
            Self::AiPdFunding | Self::InfraInvest | Self::ProcurementStd => {
                Stakeholder::DistrictAdmin
            }
            Self::AiCurriculum | Self::TeacherAutonomy | Self::AssessmentReform => {
                Stakeholder::EducationLeader
            }
            Self::ParentConsent | Self::CommunityOversight | Self::EquityAccess => {
                Stakeholder::CommunityRep
            }
            Self::VendorPartnership | Self::OpenStandards | Self::InnovationSandbox => {
                Stakeholder::EdTechIndustry
            }
            Self::ProtectStd | Self::ModelEvalStd | Self::BiasAudit => Stakeholder::ResearchEthics,
        }
    }

    /// Full static definition.
    #[must_use]
    pub const fn definition(self) -> PolicyDefinition {
        PolicyDefinition {
            id: self,
            name: self.name(),
            stakeholder: self.stakeholder(),
        }
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownPolicy { id: s.to_string() })
    }
}

/// Static description of a policy lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyDefinition {
    /// Lever id.
    pub id: PolicyId,
    /// Display name.
    pub name: &'static str,
    /// Owning role.
    pub stakeholder: Stakeholder,
}
