// ========================================================================================
//
//                       The transform stage: raw inputs to model space
//
// ========================================================================================
//
// Age and BMI are scaled by 1/10 and reshaped by the fractional polynomial forms of the
// selected table. Every derived continuous variable then has the table's centring
// constant subtracted. The centring constants are the fitting cohort's means; they do
// not change the ranking of patients under one model, but any deviation breaks the
// absolute risk.
//
// No domain checks happen here. A non-positive age or BMI produces NaN or infinity.

use crate::coefficients::{CoefficientTable, ContinuousTerms};
use crate::types::PatientProfile;

/// Applies the table's fractional polynomial forms to age and BMI, without centring.
pub fn derive_continuous(table: &CoefficientTable, profile: &PatientProfile) -> ContinuousTerms {
    let transforms = &table.transforms;
    let dage = profile.age / 10.0;
    let dbmi = profile.bmi / 10.0;

    ContinuousTerms {
        age_1: transforms.age_1.apply(dage),
        age_2: transforms.age_2.apply(dage),
        bmi_1: transforms.bmi_1.apply(dbmi),
        bmi_2: transforms.bmi_2.map(|form| form.apply(dbmi)),
        cholesterol_ratio: profile.cholesterol_ratio,
        systolic_bp: profile.systolic_bp,
        townsend: profile.townsend,
    }
}

/// Subtracts the centring constant of every continuous variable.
///
/// A second BMI term survives only if the table centres it; the consistency check
/// on `CoefficientTable` guarantees the two agree.
pub fn center(derived: ContinuousTerms, centering: &ContinuousTerms) -> ContinuousTerms {
    ContinuousTerms {
        age_1: derived.age_1 - centering.age_1,
        age_2: derived.age_2 - centering.age_2,
        bmi_1: derived.bmi_1 - centering.bmi_1,
        bmi_2: derived
            .bmi_2
            .zip(centering.bmi_2)
            .map(|(value, mean)| value - mean),
        cholesterol_ratio: derived.cholesterol_ratio - centering.cholesterol_ratio,
        systolic_bp: derived.systolic_bp - centering.systolic_bp,
        townsend: derived.townsend - centering.townsend,
    }
}

/// The full stage: the centred covariates consumed by the linear predictor.
#[inline]
pub fn centered_covariates(table: &CoefficientTable, profile: &PatientProfile) -> ContinuousTerms {
    center(derive_continuous(table, profile), &table.centering)
}
