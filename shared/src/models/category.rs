//! Certificate validity categories

use serde::{Deserialize, Serialize};

/// Length of time a certificate stays valid after issuance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "unit", content = "amount", rename_all = "snake_case")]
pub enum ValidityPeriod {
    Years(u32),
    Months(u32),
}

impl ValidityPeriod {
    /// Total length expressed in calendar months
    pub fn in_months(&self) -> u32 {
        match self {
            ValidityPeriod::Years(years) => years * 12,
            ValidityPeriod::Months(months) => *months,
        }
    }
}

impl std::fmt::Display for ValidityPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidityPeriod::Years(1) => write!(f, "1 year"),
            ValidityPeriod::Years(n) => write!(f, "{} years", n),
            ValidityPeriod::Months(1) => write!(f, "1 month"),
            ValidityPeriod::Months(n) => write!(f, "{} months", n),
        }
    }
}

/// Certificate categories tracked by the compliance panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ValidityCategory {
    /// Occupational health certificate (Atestado de Saúde Ocupacional)
    Aso,
    /// Electrical installations safety
    Nr10,
    /// Material handling and transport
    Nr11,
    /// Machinery and equipment safety
    Nr12,
    /// Ergonomics
    Nr17,
    /// Construction industry safety
    Nr18,
    /// Confined spaces
    Nr33,
    /// Work at height
    Nr35,
    /// Personal protective equipment
    Epi,
}

impl ValidityCategory {
    /// Every category, in the order the panel shows its tabs
    pub const ALL: [ValidityCategory; 9] = [
        ValidityCategory::Aso,
        ValidityCategory::Nr10,
        ValidityCategory::Nr11,
        ValidityCategory::Nr12,
        ValidityCategory::Nr17,
        ValidityCategory::Nr18,
        ValidityCategory::Nr33,
        ValidityCategory::Nr35,
        ValidityCategory::Epi,
    ];

    pub fn validity_period(&self) -> ValidityPeriod {
        match self {
            ValidityCategory::Aso => ValidityPeriod::Years(1),
            ValidityCategory::Nr10
            | ValidityCategory::Nr11
            | ValidityCategory::Nr12
            | ValidityCategory::Nr17
            | ValidityCategory::Nr18
            | ValidityCategory::Nr33
            | ValidityCategory::Nr35 => ValidityPeriod::Years(2),
            ValidityCategory::Epi => ValidityPeriod::Months(4),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidityCategory::Aso => "aso",
            ValidityCategory::Nr10 => "nr10",
            ValidityCategory::Nr11 => "nr11",
            ValidityCategory::Nr12 => "nr12",
            ValidityCategory::Nr17 => "nr17",
            ValidityCategory::Nr18 => "nr18",
            ValidityCategory::Nr33 => "nr33",
            ValidityCategory::Nr35 => "nr35",
            ValidityCategory::Epi => "epi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ValidityCategory::Aso => "Occupational Health Certificate",
            ValidityCategory::Nr10 => "NR10 Electrical Safety",
            ValidityCategory::Nr11 => "NR11 Material Handling",
            ValidityCategory::Nr12 => "NR12 Machinery Safety",
            ValidityCategory::Nr17 => "NR17 Ergonomics",
            ValidityCategory::Nr18 => "NR18 Construction Safety",
            ValidityCategory::Nr33 => "NR33 Confined Spaces",
            ValidityCategory::Nr35 => "NR35 Work at Height",
            ValidityCategory::Epi => "Protective Equipment",
        }
    }

    pub fn display_name_pt(&self) -> &'static str {
        match self {
            ValidityCategory::Aso => "Atestado de Saúde Ocupacional",
            ValidityCategory::Nr10 => "NR10 Segurança em Eletricidade",
            ValidityCategory::Nr11 => "NR11 Movimentação de Materiais",
            ValidityCategory::Nr12 => "NR12 Máquinas e Equipamentos",
            ValidityCategory::Nr17 => "NR17 Ergonomia",
            ValidityCategory::Nr18 => "NR18 Construção Civil",
            ValidityCategory::Nr33 => "NR33 Espaços Confinados",
            ValidityCategory::Nr35 => "NR35 Trabalho em Altura",
            ValidityCategory::Epi => "Equipamento de Proteção Individual",
        }
    }
}

impl std::fmt::Display for ValidityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Error returned when a category code is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown certificate category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for ValidityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        ValidityCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == code)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
