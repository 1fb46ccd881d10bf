// ========================================================================================
//
//                   The linear predictor: one scalar from a centred profile
//
// ========================================================================================
//
// Terms are accumulated in one fixed order so that results are bit-reproducible
// against the published calculators:
//
//   1. ethnicity adjustment
//   2. smoking adjustment
//   3. continuous main effects: age_1, age_2, bmi_1, [bmi_2], ratio, SBP, Townsend
//   4. binary main effects: AF, RA, renal, treated hypertension, [type 1], type 2,
//      family history
//   5. age_1 interactions: smoking branch, AF, renal, treated hypertension, [type 1],
//      type 2, bmi_1, [bmi_2], family history, SBP, Townsend
//   6. age_2 interactions, same order as 5
//
// Bracketed terms exist only in tables that carry them. Absent binary factors add
// nothing at all rather than a zero product.

use crate::coefficients::{AgeInteractions, CoefficientTable, ContinuousTerms};
use crate::types::{PatientProfile, SmokingStatus};

/// Builds the linear predictor `a` for one profile whose continuous covariates have
/// already been transformed and centred against the same table.
pub fn linear_predictor(
    table: &CoefficientTable,
    covariates: &ContinuousTerms,
    profile: &PatientProfile,
) -> f64 {
    let mut a = 0.0;

    a += table.ethnicity[profile.ethnicity.index()];
    a += table.smoking[profile.smoking.index()];

    add_continuous_effects(&mut a, &table.continuous, covariates);
    add_condition_effects(&mut a, table, profile);

    add_age_interactions(
        &mut a,
        covariates.age_1,
        &table.age_1_interactions,
        covariates,
        profile,
    );
    add_age_interactions(
        &mut a,
        covariates.age_2,
        &table.age_2_interactions,
        covariates,
        profile,
    );

    a
}

fn add_continuous_effects(a: &mut f64, coefficients: &ContinuousTerms, covariates: &ContinuousTerms) {
    *a += covariates.age_1 * coefficients.age_1;
    *a += covariates.age_2 * coefficients.age_2;
    *a += covariates.bmi_1 * coefficients.bmi_1;
    if let (Some(value), Some(coefficient)) = (covariates.bmi_2, coefficients.bmi_2) {
        *a += value * coefficient;
    }
    *a += covariates.cholesterol_ratio * coefficients.cholesterol_ratio;
    *a += covariates.systolic_bp * coefficients.systolic_bp;
    *a += covariates.townsend * coefficients.townsend;
}

fn add_condition_effects(a: &mut f64, table: &CoefficientTable, profile: &PatientProfile) {
    let effects = &table.conditions;
    if profile.atrial_fibrillation {
        *a += effects.atrial_fibrillation;
    }
    if profile.rheumatoid_arthritis {
        *a += effects.rheumatoid_arthritis;
    }
    if profile.renal_disease {
        *a += effects.renal_disease;
    }
    if profile.treated_hypertension {
        *a += effects.treated_hypertension;
    }
    if profile.type1_diabetes {
        if let Some(coefficient) = effects.type1_diabetes {
            *a += coefficient;
        }
    }
    if profile.type2_diabetes {
        *a += effects.type2_diabetes;
    }
    if profile.family_history {
        *a += effects.family_history;
    }
}

/// Interactions of one derived age variable with every other factor. The smoking
/// interaction is a branch: exactly one of four coefficients fires for a smoker and
/// none for a non-smoker.
fn add_age_interactions(
    a: &mut f64,
    age: f64,
    coefficients: &AgeInteractions,
    covariates: &ContinuousTerms,
    profile: &PatientProfile,
) {
    match profile.smoking {
        SmokingStatus::NonSmoker => {}
        smoker => *a += age * coefficients.smoking[smoker.index() - 1],
    }
    if profile.atrial_fibrillation {
        *a += age * coefficients.atrial_fibrillation;
    }
    if profile.renal_disease {
        *a += age * coefficients.renal_disease;
    }
    if profile.treated_hypertension {
        *a += age * coefficients.treated_hypertension;
    }
    if profile.type1_diabetes {
        if let Some(coefficient) = coefficients.type1_diabetes {
            *a += age * coefficient;
        }
    }
    if profile.type2_diabetes {
        *a += age * coefficients.type2_diabetes;
    }
    *a += age * covariates.bmi_1 * coefficients.bmi_1;
    if let (Some(bmi_2), Some(coefficient)) = (covariates.bmi_2, coefficients.bmi_2) {
        *a += age * bmi_2 * coefficient;
    }
    if profile.family_history {
        *a += age * coefficients.family_history;
    }
    *a += age * covariates.systolic_bp * coefficients.systolic_bp;
    *a += age * covariates.townsend * coefficients.townsend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{QRISK2_2012_MALE, QRISK2_2015_FEMALE, QRISK2_2015_MALE};
    use crate::transform::centered_covariates;
    use crate::types::Ethnicity;
    use approx::assert_relative_eq;

    fn baseline_profile() -> PatientProfile {
        PatientProfile {
            age: 60.0,
            bmi: 25.0,
            townsend: 0.0,
            systolic_bp: 130.0,
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

    fn predictor(table: &CoefficientTable, profile: &PatientProfile) -> f64 {
        linear_predictor(table, &centered_covariates(table, profile), profile)
    }

    #[test]
    fn reference_ethnicity_groups_contribute_nothing() {
        let table = QRISK2_2015_MALE;
        let white = baseline_profile();
        let mut not_recorded = baseline_profile();
        not_recorded.ethnicity = Ethnicity::NotRecorded;
        assert_eq!(predictor(&table, &white), predictor(&table, &not_recorded));
    }

    #[test]
    fn ethnicity_is_a_pure_additive_shift() {
        let table = QRISK2_2015_FEMALE;
        let base = predictor(&table, &baseline_profile());
        let mut chinese = baseline_profile();
        chinese.ethnicity = Ethnicity::Chinese;
        assert_relative_eq!(
            predictor(&table, &chinese) - base,
            table.ethnicity[Ethnicity::Chinese.index()],
            epsilon = 1e-12
        );
    }

    #[test]
    fn rheumatoid_arthritis_has_no_age_interaction() {
        let table = QRISK2_2012_MALE;
        let mut young = baseline_profile();
        young.age = 40.0;
        let mut old = baseline_profile();
        old.age = 75.0;

        let shift = |mut p: PatientProfile| {
            let without = predictor(&table, &p);
            p.rheumatoid_arthritis = true;
            predictor(&table, &p) - without
        };

        assert_relative_eq!(shift(young), table.conditions.rheumatoid_arthritis, epsilon = 1e-12);
        assert_relative_eq!(shift(old), table.conditions.rheumatoid_arthritis, epsilon = 1e-12);
    }

    #[test]
    fn smoking_interaction_fires_exactly_one_branch() {
        let table = QRISK2_2015_MALE;
        let mut smoker = baseline_profile();
        smoker.smoking = SmokingStatus::Moderate;
        let centred = centered_covariates(&table, &smoker);

        let expected_shift = table.smoking[3]
            + centred.age_1 * table.age_1_interactions.smoking[2]
            + centred.age_2 * table.age_2_interactions.smoking[2];
        let observed_shift = predictor(&table, &smoker) - predictor(&table, &baseline_profile());
        assert_relative_eq!(observed_shift, expected_shift, epsilon = 1e-12);
    }

    #[test]
    fn type1_diabetes_is_ignored_by_models_without_the_term() {
        let table = QRISK2_2012_MALE;
        let mut diabetic = baseline_profile();
        diabetic.type1_diabetes = true;
        assert_eq!(predictor(&table, &diabetic), predictor(&table, &baseline_profile()));
    }

    #[test]
    fn type1_diabetes_raises_the_2015_predictor() {
        let table = QRISK2_2015_FEMALE;
        let mut diabetic = baseline_profile();
        diabetic.type1_diabetes = true;
        assert!(predictor(&table, &diabetic) > predictor(&table, &baseline_profile()));
    }
}
