use serde::{Deserialize, Serialize};

/// A management discipline that deliverables are grouped under.
///
/// Every catalogue entry belongs to exactly one area; areas are fixed
/// reference data, not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Change Management")]
    ChangeManagement,
    #[serde(rename = "Risk Management")]
    RiskManagement,
    #[serde(rename = "Financial Management")]
    FinancialManagement,
    #[serde(rename = "Technical Management")]
    TechnicalManagement,
    #[serde(rename = "Stakeholder Management")]
    StakeholderManagement,
}

impl Area {
    pub const ALL: [Area; 5] = [
        Self::ChangeManagement,
        Self::RiskManagement,
        Self::FinancialManagement,
        Self::TechnicalManagement,
        Self::StakeholderManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChangeManagement => "Change Management",
            Self::RiskManagement => "Risk Management",
            Self::FinancialManagement => "Financial Management",
            Self::TechnicalManagement => "Technical Management",
            Self::StakeholderManagement => "Stakeholder Management",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Change Management" => Some(Self::ChangeManagement),
            "Risk Management" => Some(Self::RiskManagement),
            "Financial Management" => Some(Self::FinancialManagement),
            "Technical Management" => Some(Self::TechnicalManagement),
            "Stakeholder Management" => Some(Self::StakeholderManagement),
            _ => None,
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
