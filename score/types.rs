// ========================================================================================
//                             High-Level Data Contracts
// ========================================================================================

// This file is ONLY for types that are SHARED BETWEEN FILES, not types that only are used in one file.

use crate::validate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A published QRISK2 model release. Each release carries its own complete set of
/// coefficient tables, transform exponents and baseline survival curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVersion {
    V2011,
    V2012,
    V2015,
}

impl ModelVersion {
    pub const ALL: [ModelVersion; 3] = [ModelVersion::V2011, ModelVersion::V2012, ModelVersion::V2015];

    /// The label the model was published under.
    pub fn label(self) -> &'static str {
        match self {
            ModelVersion::V2011 => "QRISK2-2011",
            ModelVersion::V2012 => "QRISK2-2012",
            ModelVersion::V2015 => "QRISK2-2015",
        }
    }

    /// Parses a release identifier such as `2015`, `qrisk2-2015` or `QRISK2_2015`.
    /// Returns `None` for anything that does not name a known release.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let year = match trimmed.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("qrisk2") => match trimmed.get(6..7) {
                Some("-") | Some("_") => &trimmed[7..],
                _ => return None,
            },
            _ => trimmed,
        };
        match year {
            "2011" => Some(ModelVersion::V2011),
            "2012" => Some(ModelVersion::V2012),
            "2015" => Some(ModelVersion::V2015),
            _ => None,
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selects between the two parallel coefficient sets of a release. The male and
/// female models are fitted separately and are not mirror images of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            _ => Err(DomainError::UnknownSex(text.trim().to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// Smoking category, ordered by exposure. The discriminant is the index used by
/// the smoking adjustment vector and the smoking x age interaction branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    NonSmoker = 0,
    ExSmoker = 1,
    /// Fewer than 10 cigarettes a day.
    Light = 2,
    /// 10 to 19 cigarettes a day.
    Moderate = 3,
    /// 20 or more cigarettes a day.
    Heavy = 4,
}

impl SmokingStatus {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(SmokingStatus::NonSmoker),
            1 => Ok(SmokingStatus::ExSmoker),
            2 => Ok(SmokingStatus::Light),
            3 => Ok(SmokingStatus::Moderate),
            4 => Ok(SmokingStatus::Heavy),
            other => Err(DomainError::UnknownSmokingCode(other)),
        }
    }
}

/// Self-assigned ethnicity category. `NotRecorded` and `White` form the reference
/// group and carry no adjustment in any release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    NotRecorded = 0,
    White = 1,
    Indian = 2,
    Pakistani = 3,
    Bangladeshi = 4,
    OtherAsian = 5,
    BlackCaribbean = 6,
    BlackAfrican = 7,
    Chinese = 8,
    Other = 9,
}

impl Ethnicity {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Ethnicity::NotRecorded),
            1 => Ok(Ethnicity::White),
            2 => Ok(Ethnicity::Indian),
            3 => Ok(Ethnicity::Pakistani),
            4 => Ok(Ethnicity::Bangladeshi),
            5 => Ok(Ethnicity::OtherAsian),
            6 => Ok(Ethnicity::BlackCaribbean),
            7 => Ok(Ethnicity::BlackAfrican),
            8 => Ok(Ethnicity::Chinese),
            9 => Ok(Ethnicity::Other),
            other => Err(DomainError::UnknownEthnicityCode(other)),
        }
    }
}

/// The caller-supplied record for one evaluation.
///
/// This is the union of the inputs accepted by every release. A release that has
/// no coefficient for an input (type 1 diabetes before 2015, prior CVD in every
/// release) simply never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years.
    pub age: f64,
    /// Body mass index in kg/m^2.
    pub bmi: f64,
    /// Townsend deprivation score of the patient's postcode.
    pub townsend: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic_bp: f64,
    /// Total cholesterol / HDL cholesterol ratio.
    pub cholesterol_ratio: f64,
    pub smoking: SmokingStatus,
    pub ethnicity: Ethnicity,
    pub atrial_fibrillation: bool,
    pub rheumatoid_arthritis: bool,
    /// Chronic kidney disease.
    pub renal_disease: bool,
    pub treated_hypertension: bool,
    pub type1_diabetes: bool,
    pub type2_diabetes: bool,
    /// Coronary heart disease in a first degree relative under 60.
    pub family_history: bool,
    /// Existing cardiovascular disease. Accepted for completeness; no published
    /// release has a coefficient for it.
    #[serde(default)]
    pub prior_cvd: bool,
}
