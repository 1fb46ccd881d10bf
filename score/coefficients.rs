use crate::types::{ModelVersion, Sex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

// --- Public Data Structures ---
// These structs are the complete definition of one fitted model. The built-in
// releases live as `const` literals under `tables/`; the same structure is what
// gets written to and read from a TOML table file.

/// Number of entries in every baseline survival vector. Index 0 is a sentinel;
/// follow-up years 1 to 15 index the remaining entries directly.
pub const SURVIVAL_TABLE_LEN: usize = 16;
/// Largest follow-up year any release publishes a baseline survival for.
pub const MAX_FOLLOW_UP_YEAR: u32 = (SURVIVAL_TABLE_LEN - 1) as u32;
pub const ETHNICITY_CATEGORIES: usize = 10;
pub const SMOKING_CATEGORIES: usize = 5;

/// One fractional polynomial form, applied to an input that has already been
/// scaled by 1/10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", content = "power", rename_all = "snake_case")]
pub enum FractionalPolynomial {
    /// `x^p`
    Power(f64),
    /// `x^p * ln(x)`
    PowerLog(f64),
    /// `ln(x)`
    Log,
}

impl FractionalPolynomial {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            FractionalPolynomial::Power(p) => x.powf(p),
            FractionalPolynomial::PowerLog(p) => x.powf(p) * x.ln(),
            FractionalPolynomial::Log => x.ln(),
        }
    }

    /// The exponent of a power form; `None` for the plain logarithm.
    pub fn power(self) -> Option<f64> {
        match self {
            FractionalPolynomial::Power(p) | FractionalPolynomial::PowerLog(p) => Some(p),
            FractionalPolynomial::Log => None,
        }
    }
}

/// Which fractional polynomial forms a model applies to age and BMI. Age always
/// yields two derived variables; BMI yields one or two depending on the release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSpec {
    pub age_1: FractionalPolynomial,
    pub age_2: FractionalPolynomial,
    pub bmi_1: FractionalPolynomial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_2: Option<FractionalPolynomial>,
}

/// A value per continuous model variable. The same shape carries the centring
/// constants, the main-effect coefficients and the centred covariates of one
/// patient. `bmi_2` is `None` for releases with a single BMI term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousTerms {
    pub age_1: f64,
    pub age_2: f64,
    pub bmi_1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_2: Option<f64>,
    pub cholesterol_ratio: f64,
    pub systolic_bp: f64,
    pub townsend: f64,
}

impl ContinuousTerms {
    fn values(&self) -> impl Iterator<Item = f64> {
        [
            Some(self.age_1),
            Some(self.age_2),
            Some(self.bmi_1),
            self.bmi_2,
            Some(self.cholesterol_ratio),
            Some(self.systolic_bp),
            Some(self.townsend),
        ]
        .into_iter()
        .flatten()
    }
}

/// Main-effect coefficients of the binary risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionEffects {
    pub atrial_fibrillation: f64,
    pub rheumatoid_arthritis: f64,
    pub renal_disease: f64,
    pub treated_hypertension: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type1_diabetes: Option<f64>,
    pub type2_diabetes: f64,
    pub family_history: f64,
}

impl ConditionEffects {
    fn values(&self) -> impl Iterator<Item = f64> {
        [
            Some(self.atrial_fibrillation),
            Some(self.rheumatoid_arthritis),
            Some(self.renal_disease),
            Some(self.treated_hypertension),
            self.type1_diabetes,
            Some(self.type2_diabetes),
            Some(self.family_history),
        ]
        .into_iter()
        .flatten()
    }
}

/// Interaction coefficients between one derived age variable and the other
/// risk factors. `smoking[k]` applies to smoking category `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeInteractions {
    pub smoking: [f64; SMOKING_CATEGORIES - 1],
    pub atrial_fibrillation: f64,
    pub renal_disease: f64,
    pub treated_hypertension: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type1_diabetes: Option<f64>,
    pub type2_diabetes: f64,
    pub bmi_1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_2: Option<f64>,
    pub family_history: f64,
    pub systolic_bp: f64,
    pub townsend: f64,
}

impl AgeInteractions {
    fn values(&self) -> impl Iterator<Item = f64> {
        let scalars = [
            Some(self.atrial_fibrillation),
            Some(self.renal_disease),
            Some(self.treated_hypertension),
            self.type1_diabetes,
            Some(self.type2_diabetes),
            Some(self.bmi_1),
            self.bmi_2,
            Some(self.family_history),
            Some(self.systolic_bp),
            Some(self.townsend),
        ];
        self.smoking
            .into_iter()
            .chain(scalars.into_iter().flatten())
    }
}

/// The complete, immutable definition of one (release, sex) model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub version: ModelVersion,
    pub sex: Sex,
    /// Indexed by `Ethnicity::index()`. Entries 0 and 1 are zero.
    pub ethnicity: [f64; ETHNICITY_CATEGORIES],
    /// Indexed by `SmokingStatus::index()`. Entry 0 is zero.
    pub smoking: [f64; SMOKING_CATEGORIES],
    /// Baseline survival by follow-up year; entry 0 is an unused sentinel.
    pub survival: [f64; SURVIVAL_TABLE_LEN],
    pub transforms: TransformSpec,
    pub centering: ContinuousTerms,
    pub continuous: ContinuousTerms,
    pub conditions: ConditionEffects,
    pub age_1_interactions: AgeInteractions,
    pub age_2_interactions: AgeInteractions,
}

/// Custom error type for table loading, saving and consistency checks.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read or write coefficient table file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML coefficient table: {0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("Failed to serialize coefficient table to TOML format: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
    #[error("Coefficient table for {version} {sex} is inconsistent: {reason}")]
    Inconsistent {
        version: ModelVersion,
        sex: Sex,
        reason: String,
    },
}

impl CoefficientTable {
    /// Whether this model has a second BMI variable.
    #[inline]
    pub fn has_second_bmi_term(&self) -> bool {
        self.transforms.bmi_2.is_some()
    }

    /// Whether this model has a type 1 diabetes term.
    #[inline]
    pub fn models_type1_diabetes(&self) -> bool {
        self.conditions.type1_diabetes.is_some()
    }

    /// Rejects tables whose optional terms are not present in every block that
    /// needs them, whose reference categories carry an adjustment, or whose
    /// survival entries are not probabilities.
    pub fn check_consistency(&self) -> Result<(), TableError> {
        let bmi_2_blocks = [
            self.transforms.bmi_2.is_some(),
            self.centering.bmi_2.is_some(),
            self.continuous.bmi_2.is_some(),
            self.age_1_interactions.bmi_2.is_some(),
            self.age_2_interactions.bmi_2.is_some(),
        ];
        if bmi_2_blocks.iter().any(|&present| present != bmi_2_blocks[0]) {
            return Err(self.inconsistent(
                "the second BMI term must appear in transforms, centering, continuous and both interaction blocks, or in none",
            ));
        }

        let type1_blocks = [
            self.conditions.type1_diabetes.is_some(),
            self.age_1_interactions.type1_diabetes.is_some(),
            self.age_2_interactions.type1_diabetes.is_some(),
        ];
        if type1_blocks.iter().any(|&present| present != type1_blocks[0]) {
            return Err(self.inconsistent(
                "the type 1 diabetes term must appear in conditions and both interaction blocks, or in none",
            ));
        }

        if self.ethnicity[0] != 0.0 || self.ethnicity[1] != 0.0 {
            return Err(self.inconsistent(
                "ethnicity categories 0 and 1 are the reference group and must be zero",
            ));
        }
        if let Some((block, value)) = self.numeric_entries().find(|(_, v)| !v.is_finite()) {
            return Err(self.inconsistent(&format!(
                "{block} holds a non-finite value ({value})"
            )));
        }

        if self.smoking[0] != 0.0 {
            return Err(self.inconsistent("smoking category 0 must be zero"));
        }

        for (year, &s) in self.survival.iter().enumerate().skip(1) {
            if !(s > 0.0 && s <= 1.0) {
                return Err(self.inconsistent(&format!(
                    "baseline survival for year {year} must lie in (0, 1], found {s}"
                )));
            }
        }
        Ok(())
    }

    /// Every number in the table, labelled with the block it belongs to.
    fn numeric_entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        let transforms = &self.transforms;
        let powers = [
            Some(transforms.age_1),
            Some(transforms.age_2),
            Some(transforms.bmi_1),
            transforms.bmi_2,
        ]
        .into_iter()
        .flatten()
        .filter_map(FractionalPolynomial::power);

        let labelled = |block: &'static str| move |value: f64| (block, value);
        self.ethnicity
            .iter()
            .copied()
            .map(labelled("ethnicity"))
            .chain(self.smoking.iter().copied().map(labelled("smoking")))
            .chain(self.survival.iter().copied().map(labelled("survival")))
            .chain(powers.map(labelled("transforms")))
            .chain(self.centering.values().map(labelled("centering")))
            .chain(self.continuous.values().map(labelled("continuous")))
            .chain(self.conditions.values().map(labelled("conditions")))
            .chain(self.age_1_interactions.values().map(labelled("age_1_interactions")))
            .chain(self.age_2_interactions.values().map(labelled("age_2_interactions")))
    }

    fn inconsistent(&self, reason: &str) -> TableError {
        TableError::Inconsistent {
            version: self.version,
            sex: self.sex,
            reason: reason.to_string(),
        }
    }

    /// Saves the table to a file in a human-readable TOML format.
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut file = BufWriter::new(fs::File::create(path)?);
        file.write_all(toml_string.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Loads a table from a TOML file and checks it before handing it out.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let toml_string = fs::read_to_string(path)?;
        let table: CoefficientTable = toml::from_str(&toml_string)?;
        table.check_consistency()?;
        Ok(table)
    }
}
