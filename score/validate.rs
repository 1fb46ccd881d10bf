// Input checks applied before a profile reaches the transform stage.
//
// The published formulas are silent about bad input: a non-positive age or BMI is
// fed straight into `pow`/`ln` and comes out as NaN or infinity. Every public entry
// point runs `validate_profile` first. Values that pass here but are extreme enough
// to overflow the transforms are caught after the arithmetic, as
// `RiskError::NonFiniteResult`, so a caller always receives either a finite score or
// an error. Physiological plausibility (e.g. a BMI of 80) is not judged here.

use crate::types::PatientProfile;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{field} must be greater than zero (found {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number (found {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("smoking category {0} is not one of 0 (non-smoker) to 4 (heavy smoker)")]
    UnknownSmokingCode(u8),
    #[error("ethnicity category {0} is not one of 0 (not recorded) to 9 (other)")]
    UnknownEthnicityCode(u8),
    #[error("unrecognised sex '{0}'; expected 'male' or 'female'")]
    UnknownSex(String),
}

/// Checks that every continuous input lies in the domain of its formula.
pub fn validate_profile(profile: &PatientProfile) -> Result<(), DomainError> {
    require_positive("age", profile.age)?;
    require_positive("bmi", profile.bmi)?;
    require_finite("townsend", profile.townsend)?;
    require_finite("systolic_bp", profile.systolic_bp)?;
    require_finite("cholesterol_ratio", profile.cholesterol_ratio)?;
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), DomainError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ethnicity, SmokingStatus};

    fn profile() -> PatientProfile {
        PatientProfile {
            age: 50.0,
            bmi: 26.0,
            townsend: 0.0,
            systolic_bp: 125.0,
            cholesterol_ratio: 4.0,
            smoking: SmokingStatus::NonSmoker,
            ethnicity: Ethnicity::White,
            atrial_fibrillation: false,
            rheumatoid_arthritis: false,
            renal_disease: false,
            treated_hypertension: false,
            type1_diabetes: false,
            type2_diabetes: false,
            family_history: false,
            prior_cvd: false,
        }
    }

    #[test]
    fn accepts_ordinary_profile() {
        assert!(validate_profile(&profile()).is_ok());
    }

    #[test]
    fn negative_deprivation_scores_are_valid() {
        let mut p = profile();
        p.townsend = -4.5;
        assert!(validate_profile(&p).is_ok());
    }

    #[test]
    fn rejects_zero_bmi_and_negative_age() {
        let mut p = profile();
        p.bmi = 0.0;
        assert_eq!(
            validate_profile(&p),
            Err(DomainError::NonPositive {
                field: "bmi",
                value: 0.0
            })
        );

        let mut p = profile();
        p.age = -1.0;
        assert!(matches!(
            validate_profile(&p),
            Err(DomainError::NonPositive { field: "age", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut p = profile();
        p.systolic_bp = f64::NAN;
        assert!(matches!(
            validate_profile(&p),
            Err(DomainError::NonFinite {
                field: "systolic_bp",
                ..
            })
        ));

        let mut p = profile();
        p.age = f64::INFINITY;
        assert!(matches!(
            validate_profile(&p),
            Err(DomainError::NonFinite { field: "age", .. })
        ));
    }
}
