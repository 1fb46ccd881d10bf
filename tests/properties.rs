use approx::assert_relative_eq;
use qrisk::registry::{self, ModelRegistry};
use qrisk::{Ethnicity, ModelVersion, PatientProfile, RiskError, Sex, SmokingStatus, evaluate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const ETHNICITIES: [Ethnicity; 10] = [
    Ethnicity::NotRecorded,
    Ethnicity::White,
    Ethnicity::Indian,
    Ethnicity::Pakistani,
    Ethnicity::Bangladeshi,
    Ethnicity::OtherAsian,
    Ethnicity::BlackCaribbean,
    Ethnicity::BlackAfrican,
    Ethnicity::Chinese,
    Ethnicity::Other,
];

const SMOKING: [SmokingStatus; 5] = [
    SmokingStatus::NonSmoker,
    SmokingStatus::ExSmoker,
    SmokingStatus::Light,
    SmokingStatus::Moderate,
    SmokingStatus::Heavy,
];

fn all_models() -> impl Iterator<Item = (ModelVersion, Sex)> {
    ModelVersion::ALL
        .into_iter()
        .flat_map(|version| [(version, Sex::Male), (version, Sex::Female)])
}

fn baseline_patient() -> PatientProfile {
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

fn random_patient(rng: &mut StdRng) -> PatientProfile {
    PatientProfile {
        age: rng.gen_range(25.0..84.0),
        bmi: rng.gen_range(20.0..40.0),
        townsend: rng.gen_range(-7.0..11.0),
        systolic_bp: rng.gen_range(70.0..210.0),
        cholesterol_ratio: rng.gen_range(1.0..11.0),
        smoking: SMOKING[rng.gen_range(0..SMOKING.len())],
        ethnicity: ETHNICITIES[rng.gen_range(0..ETHNICITIES.len())],
        atrial_fibrillation: rng.gen_bool(0.1),
        rheumatoid_arthritis: rng.gen_bool(0.1),
        renal_disease: rng.gen_bool(0.1),
        treated_hypertension: rng.gen_bool(0.3),
        type1_diabetes: rng.gen_bool(0.05),
        type2_diabetes: rng.gen_bool(0.1),
        family_history: rng.gen_bool(0.2),
        prior_cvd: false,
    }
}

#[test]
fn evaluation_is_pure() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let patient = random_patient(&mut rng);
        let year = rng.gen_range(1..=15);
        for (version, sex) in all_models() {
            let first = evaluate(version, sex, &patient, year).unwrap();
            let second = evaluate(version, sex, &patient, year).unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn plausible_patients_score_a_valid_percentage() {
    let mut rng = StdRng::seed_from_u64(2015);
    for _ in 0..500 {
        let patient = random_patient(&mut rng);
        let year = rng.gen_range(1..=15);
        for (version, sex) in all_models() {
            let evaluation = evaluate(version, sex, &patient, year).unwrap();
            assert!(
                evaluation.is_within_band(),
                "{version} {sex}: {patient:?} scored {}",
                evaluation.risk_percent
            );
        }
    }
}

#[test]
fn risk_and_individual_survival_sum_to_one_hundred() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let patient = random_patient(&mut rng);
        for (version, sex) in all_models() {
            let e = evaluate(version, sex, &patient, 10).unwrap();
            assert_relative_eq!(
                100.0 - e.risk_percent,
                100.0 * e.baseline_survival.powf(e.linear_predictor.exp()),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn follow_up_year_bounds() {
    let patient = baseline_patient();
    for (version, sex) in all_models() {
        assert!(evaluate(version, sex, &patient, 1).is_ok());
        assert!(evaluate(version, sex, &patient, 15).is_ok());
        for year in [0, 16] {
            assert_eq!(
                evaluate(version, sex, &patient, year).unwrap_err(),
                RiskError::InvalidFollowUpYear { year, max: 15 }
            );
        }
    }
}

#[test]
fn longer_horizons_never_lower_the_risk() {
    let patient = baseline_patient();
    for (version, sex) in all_models() {
        let risks: Vec<f64> = (1..=15)
            .map(|year| evaluate(version, sex, &patient, year).unwrap().risk_percent)
            .collect();
        assert!(risks.windows(2).all(|w| w[1] > w[0]), "{version} {sex}: {risks:?}");
    }
}

#[test]
fn reference_categories_carry_no_adjustment() {
    let white = baseline_patient();
    let mut unrecorded = baseline_patient();
    unrecorded.ethnicity = Ethnicity::NotRecorded;
    for (version, sex) in all_models() {
        let a = evaluate(version, sex, &white, 10).unwrap();
        let b = evaluate(version, sex, &unrecorded, 10).unwrap();
        assert_eq!(a.linear_predictor, b.linear_predictor);
    }
}

#[test]
fn ethnicity_shifts_the_predictor_by_its_coefficient() {
    for (version, sex) in all_models() {
        let table = registry::builtin().resolve(version, sex).unwrap().table();
        let base = evaluate(version, sex, &baseline_patient(), 10)
            .unwrap()
            .linear_predictor;
        for ethnicity in ETHNICITIES {
            let mut patient = baseline_patient();
            patient.ethnicity = ethnicity;
            let shifted = evaluate(version, sex, &patient, 10).unwrap().linear_predictor;
            assert_relative_eq!(shifted - base, table.ethnicity[ethnicity.index()], epsilon = 1e-12);
        }
    }
}

#[test]
fn heavier_smoking_means_higher_risk() {
    for (version, sex) in all_models() {
        let risks: Vec<f64> = SMOKING
            .iter()
            .map(|&smoking| {
                let mut patient = baseline_patient();
                patient.smoking = smoking;
                evaluate(version, sex, &patient, 10).unwrap().risk_percent
            })
            .collect();
        assert!(risks.windows(2).all(|w| w[1] > w[0]), "{version} {sex}: {risks:?}");
    }
}

#[test]
fn risk_rises_with_age_over_the_validated_range() {
    for (version, sex) in all_models() {
        let mut previous = f64::NEG_INFINITY;
        for age in 35..=74 {
            let mut patient = baseline_patient();
            patient.age = f64::from(age);
            let risk = evaluate(version, sex, &patient, 10).unwrap().risk_percent;
            assert!(risk > previous, "{version} {sex}: risk fell at age {age}");
            previous = risk;
        }
    }
}

#[test]
fn parallel_scoring_matches_sequential_scoring() {
    let mut rng = StdRng::seed_from_u64(99);
    let patients: Vec<PatientProfile> = (0..2_000).map(|_| random_patient(&mut rng)).collect();
    let sequential: Vec<f64> = patients
        .iter()
        .map(|p| evaluate(ModelVersion::V2012, Sex::Female, p, 10).unwrap().risk_percent)
        .collect();
    let parallel: Vec<f64> = patients
        .par_iter()
        .map(|p| evaluate(ModelVersion::V2012, Sex::Female, p, 10).unwrap().risk_percent)
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn unregistered_models_are_unsupported() {
    let empty = ModelRegistry::empty();
    assert!(matches!(
        empty.resolve(ModelVersion::V2015, Sex::Male),
        Err(RiskError::UnsupportedModel(_))
    ));
    assert!(matches!(
        registry::builtin().resolve_label("QRISK3-2017", Sex::Male),
        Err(RiskError::UnsupportedModel(_))
    ));
}
