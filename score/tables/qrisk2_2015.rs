//! QRISK2-2015: adds type 1 diabetes as a separate risk factor and replaces the
//! single BMI term with an inverse-square / inverse-square-log pair.

use crate::coefficients::{
    AgeInteractions, CoefficientTable, ConditionEffects, ContinuousTerms, FractionalPolynomial,
    TransformSpec,
};
use crate::types::{ModelVersion, Sex};

pub const QRISK2_2015_MALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2015,
    sex: Sex::Male,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.31733214304819191, // Indian
        0.47385907860811155, // Pakistani
        0.51713146559681455, // Bangladeshi
        0.13703011573664192, // other Asian
        -0.38855223049726639, // black Caribbean
        -0.38124954853121945, // black African
        -0.40644613816509945, // Chinese
        -0.22857155213773361, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.26844791581580202, // ex-smoker
        0.63076749738775917, // light
        0.71780788833786957, // moderate
        0.87041725334654851, // heavy
    ],
    survival: [
        0.0,
        0.998205721378326,
        0.996380507946014,
        0.994511783123016,
        0.992520809173584,
        0.990338504314423,
        0.988223373889923,
        0.98605340719223,
        0.983751118183136,
        0.981297850608826,
        0.97879421710968,
        0.976175725460052,
        0.973336458206177,
        0.970354199409485,
        0.967230498790741,
        0.963918387889862,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(-1.0),
        age_2: FractionalPolynomial::Power(2.0),
        bmi_1: FractionalPolynomial::Power(-2.0),
        bmi_2: Some(FractionalPolynomial::PowerLog(-2.0)),
    },
    centering: ContinuousTerms {
        age_1: 0.233734160661697,
        age_2: 18.304403305053711,
        bmi_1: 0.146269768476486,
        bmi_2: Some(0.140587374567986),
        cholesterol_ratio: 4.321151256561279,
        systolic_bp: 130.58975219726562,
        townsend: 0.551009356975555,
    },
    continuous: ContinuousTerms {
        age_1: -18.043731255037727,
        age_2: 0.023648645425430694,
        bmi_1: 2.5388084343581578,
        bmi_2: Some(-9.1034725871528597),
        cholesterol_ratio: 0.16843976361369095,
        systolic_bp: 0.010500308938075482,
        townsend: 0.032380163763448759,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 1.0363048000259454,
        rheumatoid_arthritis: 0.25199531347910126,
        renal_disease: 0.8359352886995286,
        treated_hypertension: 0.66034596959178626,
        type1_diabetes: Some(1.3309170433446138),
        type2_diabetes: 0.94543488927744179,
        family_history: 0.59860378971362815,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            0.61868646993796839,
            1.5522017055600055,
            2.4407210657517648,
            3.5140494491884624,
        ],
        atrial_fibrillation: 8.0382925558108482,
        renal_disease: -1.6389521229064483,
        treated_hypertension: 8.4621771382346651,
        type1_diabetes: Some(5.4977016563835504),
        type2_diabetes: 3.397474748876669,
        bmi_1: 33.84898810127676,
        bmi_2: Some(-140.67070254048971),
        family_history: 2.0858333154353321,
        systolic_bp: 0.050128366883072054,
        townsend: -0.19882682171868507,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            -0.0040893975066796338,
            -0.0056065852346001768,
            -0.0018261006189440492,
            -0.001499715729617329,
        ],
        atrial_fibrillation: 0.0052471594895864343,
        renal_disease: -0.017966358619354639,
        treated_hypertension: 0.0092088445323379176,
        type1_diabetes: Some(0.0047493510223424558),
        type2_diabetes: -0.0048113775783491563,
        bmi_1: 0.062741075751394565,
        bmi_2: Some(-0.23829149093857321),
        family_history: -0.004997114921328101,
        systolic_bp: -0.000052370098795143509,
        townsend: -0.0012518116569283104,
    },
};

pub const QRISK2_2015_FEMALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2015,
    sex: Sex::Female,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.25740993498319259, // Indian
        0.61297954305717794, // Pakistani
        0.33621598416696213, // Bangladeshi
        0.15125173032243364, // other Asian
        -0.17941562596577681, // black Caribbean
        -0.35034236100577454, // black African
        -0.27783724832332168, // Chinese
        -0.1592734122665366, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.21193771087603852, // ex-smoker
        0.66186343796859415, // light
        0.75707145871323056, // moderate
        0.9496298251457036, // heavy
    ],
    survival: [
        0.0,
        0.999128758907318,
        0.998222172260284,
        0.997292637825012,
        0.996305286884308,
        0.995250642299652,
        0.994234919548035,
        0.993183135986328,
        0.992080569267273,
        0.99092823266983,
        0.989747583866119,
        0.988448619842529,
        0.987112879753113,
        0.985681176185608,
        0.984169244766235,
        0.982512056827545,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(0.5),
        age_2: FractionalPolynomial::Power(1.0),
        bmi_1: FractionalPolynomial::Power(-2.0),
        bmi_2: Some(FractionalPolynomial::PowerLog(-2.0)),
    },
    centering: ContinuousTerms {
        age_1: 2.086397409439087,
        age_2: 4.353054523468018,
        bmi_1: 0.152244374155998,
        bmi_2: Some(0.143282383680344),
        cholesterol_ratio: 3.50665545463562,
        systolic_bp: 125.0400390625,
        townsend: 0.416743695735931,
    },
    continuous: ContinuousTerms {
        age_1: 4.4417863976316578,
        age_2: 0.028163721067299918,
        bmi_1: 0.89423653047106633,
        bmi_2: Some(-6.5748047596104335),
        cholesterol_ratio: 0.14339005616214209,
        systolic_bp: 0.012897179584361372,
        townsend: 0.066477263001143885,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 1.6284780236484424,
        rheumatoid_arthritis: 0.29012331040887707,
        renal_disease: 1.0043796680368302,
        treated_hypertension: 0.61804305627881295,
        type1_diabetes: Some(1.8400348250874599),
        type2_diabetes: 1.1711626412196512,
        family_history: 0.51472612036651955,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            0.74644061443916665,
            0.25685417118796666,
            -1.5452226707866523,
            -1.7113013709043405,
        ],
        atrial_fibrillation: -7.0177986441269269,
        renal_disease: -2.968401925645439,
        treated_hypertension: -4.2219906452967848,
        type1_diabetes: Some(1.683576954604008),
        type2_diabetes: -2.9371798540034648,
        bmi_1: 0.17971962070446823,
        bmi_2: Some(40.242816676065814),
        family_history: 0.14399792407539067,
        systolic_bp: -0.036257523389977446,
        townsend: 0.37351380314334426,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            -0.1927057741748231,
            -0.15269650634589327,
            0.23135639765214294,
            0.23071650138682967,
        ],
        atrial_fibrillation: 1.1395776028337732,
        renal_disease: 0.43569632083309406,
        treated_hypertension: 0.72659471088872396,
        type1_diabetes: Some(-0.63209777662756539),
        type2_diabetes: 0.40232704348710868,
        bmi_1: 0.13192766227118777,
        bmi_2: Some(-7.3211322435546409),
        family_history: -0.13302600182737204,
        systolic_bp: 0.0045842850495397955,
        townsend: -0.095237030084599078,
    },
};
