// ========================================================================================
//
//                          The evaluation entry point
//
// ========================================================================================
//
// A `RiskModel` is one (release, sex) table plus the algorithm. Evaluation is the
// pipeline validate -> transform -> linear predictor -> survival conversion, with no
// state carried between calls.

use crate::coefficients::{CoefficientTable, TableError};
use crate::predictor::linear_predictor;
use crate::registry;
use crate::survival::{absolute_risk, baseline_survival};
use crate::transform::centered_covariates;
use crate::types::{ModelVersion, PatientProfile, Sex};
use crate::validate::{DomainError, validate_profile};
use log::{trace, warn};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),
    #[error("follow-up year {year} is outside the survival table (valid years are 1 to {max})")]
    InvalidFollowUpYear { year: u32, max: u32 },
    #[error("invalid patient input: {0}")]
    Domain(#[from] DomainError),
    #[error(
        "{version} {sex} produced a non-finite {quantity} ({value}); an input lies far outside the range the model was fitted on"
    )]
    NonFiniteResult {
        version: ModelVersion,
        sex: Sex,
        quantity: &'static str,
        value: f64,
    },
}

/// The outcome of one evaluation, including the intermediates of the survival
/// conversion so that callers can check `100 - risk = 100 * S^exp(a)` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub version: ModelVersion,
    pub sex: Sex,
    pub follow_up_year: u32,
    /// The linear predictor `a`.
    pub linear_predictor: f64,
    /// The baseline survival `S` at `follow_up_year`.
    pub baseline_survival: f64,
    /// `100 * (1 - S^exp(a))`, unclamped.
    pub risk_percent: f64,
}

impl Evaluation {
    /// Whether the percentage lies in the nominal band [0, 100).
    pub fn is_within_band(&self) -> bool {
        (0.0..100.0).contains(&self.risk_percent)
    }
}

/// One fitted model, ready to evaluate patients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskModel {
    table: CoefficientTable,
}

impl RiskModel {
    /// Wraps a table after checking that its blocks agree with each other.
    pub fn new(table: CoefficientTable) -> Result<Self, TableError> {
        table.check_consistency()?;
        Ok(Self { table })
    }

    /// Wraps one of the built-in tables, which are covered by the table tests.
    pub(crate) const fn published(table: CoefficientTable) -> Self {
        Self { table }
    }

    #[inline]
    pub fn version(&self) -> ModelVersion {
        self.table.version
    }

    #[inline]
    pub fn sex(&self) -> Sex {
        self.table.sex
    }

    #[inline]
    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// The linear predictor `a` for a validated profile.
    ///
    /// Inputs that pass validation can still overflow the fractional polynomial
    /// transforms when they are extreme; such a predictor is an error, never a value.
    pub fn linear_predictor(&self, profile: &PatientProfile) -> Result<f64, RiskError> {
        validate_profile(profile)?;
        let covariates = centered_covariates(&self.table, profile);
        let a = linear_predictor(&self.table, &covariates, profile);
        self.require_finite("linear predictor", a)
    }

    fn require_finite(&self, quantity: &'static str, value: f64) -> Result<f64, RiskError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RiskError::NonFiniteResult {
                version: self.version(),
                sex: self.sex(),
                quantity,
                value,
            })
        }
    }

    /// Scores one patient at the given follow-up year.
    pub fn evaluate(&self, profile: &PatientProfile, follow_up_year: u32) -> Result<Evaluation, RiskError> {
        let baseline = baseline_survival(&self.table, follow_up_year)?;
        let a = self.linear_predictor(profile)?;
        let risk_percent = self.require_finite("risk percentage", absolute_risk(baseline, a))?;

        trace!(
            "{} {}: a = {a}, S({follow_up_year}) = {baseline}, risk = {risk_percent}",
            self.version(),
            self.sex()
        );

        if profile.prior_cvd {
            warn!(
                "{} is not defined for patients with existing cardiovascular disease; scoring anyway",
                self.version()
            );
        }

        let evaluation = Evaluation {
            version: self.version(),
            sex: self.sex(),
            follow_up_year,
            linear_predictor: a,
            baseline_survival: baseline,
            risk_percent,
        };
        if !evaluation.is_within_band() {
            warn!(
                "{} {} produced an out-of-band risk of {risk_percent}%",
                self.version(),
                self.sex()
            );
        }
        Ok(evaluation)
    }

    /// Convenience wrapper returning only the percentage.
    pub fn risk_percent(&self, profile: &PatientProfile, follow_up_year: u32) -> Result<f64, RiskError> {
        Ok(self.evaluate(profile, follow_up_year)?.risk_percent)
    }
}

/// Scores one patient against a built-in published model.
pub fn evaluate(
    version: ModelVersion,
    sex: Sex,
    profile: &PatientProfile,
    follow_up_year: u32,
) -> Result<Evaluation, RiskError> {
    registry::builtin()
        .resolve(version, sex)?
        .evaluate(profile, follow_up_year)
}
