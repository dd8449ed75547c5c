//! Information criteria used for lag-order selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VarError;

/// Criterion minimised when choosing the VAR lag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformationCriterion {
    /// Akaike
    #[default]
    Aic,
    /// Schwarz / Bayesian
    Bic,
    /// Hannan-Quinn
    Hqic,
    /// Final prediction error
    Fpe,
}

impl InformationCriterion {
    pub const ALL: [InformationCriterion; 4] = [
        InformationCriterion::Aic,
        InformationCriterion::Bic,
        InformationCriterion::Hqic,
        InformationCriterion::Fpe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InformationCriterion::Aic => "aic",
            InformationCriterion::Bic => "bic",
            InformationCriterion::Hqic => "hqic",
            InformationCriterion::Fpe => "fpe",
        }
    }
}

impl fmt::Display for InformationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for InformationCriterion {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aic" => Ok(InformationCriterion::Aic),
            "bic" | "sc" | "sic" => Ok(InformationCriterion::Bic),
            "hqic" | "hq" => Ok(InformationCriterion::Hqic),
            "fpe" => Ok(InformationCriterion::Fpe),
            other => Err(VarError::invalid_parameter(
                "criterion",
                format!("unknown criterion '{}', use aic, bic, hqic or fpe", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criteria() {
        assert_eq!("AIC".parse::<InformationCriterion>().unwrap(), InformationCriterion::Aic);
        assert_eq!("sc".parse::<InformationCriterion>().unwrap(), InformationCriterion::Bic);
        assert_eq!(" hq ".parse::<InformationCriterion>().unwrap(), InformationCriterion::Hqic);
        assert_eq!("fpe".parse::<InformationCriterion>().unwrap(), InformationCriterion::Fpe);
        assert!("mdl".parse::<InformationCriterion>().is_err());
    }

    #[test]
    fn test_display_and_default() {
        assert_eq!(InformationCriterion::default(), InformationCriterion::Aic);
        assert_eq!(InformationCriterion::Hqic.to_string(), "HQIC");
        assert_eq!(InformationCriterion::Fpe.as_str(), "fpe");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&InformationCriterion::Bic).unwrap();
        assert_eq!(json, "\"bic\"");
        let back: InformationCriterion = serde_json::from_str("\"hqic\"").unwrap();
        assert_eq!(back, InformationCriterion::Hqic);
    }
}
