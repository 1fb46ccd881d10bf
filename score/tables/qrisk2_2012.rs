//! QRISK2-2012: refitted on the 2012 cohort with the same transform shapes and
//! covariate set as QRISK2-2011.

use crate::coefficients::{
    AgeInteractions, CoefficientTable, ConditionEffects, ContinuousTerms, FractionalPolynomial,
    TransformSpec,
};
use crate::types::{ModelVersion, Sex};

pub const QRISK2_2012_MALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2012,
    sex: Sex::Male,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.31631174109447102, // Indian
        0.60918791048827925, // Pakistani
        0.59584360062393693, // Bangladeshi
        0.11422858413168223, // other Asian
        -0.34892156743188302, // black Caribbean
        -0.36035710550946176, // black African
        -0.26661732608814143, // Chinese
        -0.12080188478576465, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.26842900472246523, // ex-smoker
        0.50049208029836645, // light
        0.63747586550708979, // moderate
        0.74236313975561985, // heavy
    ],
    survival: [
        0.0,
        0.996994316577911,
        0.993941843509674,
        0.990756928920746,
        0.987367391586304,
        0.983686089515686,
        0.979941785335541,
        0.975925624370575,
        0.971652328968048,
        0.967043697834015,
        0.962060630321503,
        0.956596851348877,
        0.951202630996704,
        0.945618212223053,
        0.938979923725128,
        0.932796955108643,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(-2.0),
        age_2: FractionalPolynomial::PowerLog(-2.0),
        bmi_1: FractionalPolynomial::Log,
        bmi_2: None,
    },
    centering: ContinuousTerms {
        age_1: 0.044809196144342,
        age_2: 0.069573938846588,
        bmi_1: 0.970408320426941,
        bmi_2: None,
        cholesterol_ratio: 4.462830543518066,
        systolic_bp: 133.35781860351562,
        townsend: -0.35681214928627,
    },
    continuous: ContinuousTerms {
        age_1: 47.316392167327066,
        age_2: -101.23621636219923,
        bmi_1: 0.54247027155274075,
        bmi_2: None,
        cholesterol_ratio: 0.14425456165644909,
        systolic_bp: 0.0080703627452139003,
        townsend: 0.036481756744207817,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 0.75467274041724008,
        rheumatoid_arthritis: 0.30891976100595508,
        renal_disease: 0.74410804991019142,
        treated_hypertension: 0.49782224024315608,
        type1_diabetes: None,
        type2_diabetes: 0.77762786199042744,
        family_history: 0.69651558001960545,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            -3.8805330901643544,
            -16.703193409578148,
            -15.37376918681772,
            -17.645295270956119,
        ],
        atrial_fibrillation: -7.0282038602850179,
        renal_disease: -17.014640295678451,
        treated_hypertension: 33.96252655838952,
        type1_diabetes: None,
        type2_diabetes: 12.788559857321239,
        bmi_1: 3.2680340443282705,
        bmi_2: None,
        family_history: -17.921920007920914,
        systolic_bp: -0.15110501422594008,
        townsend: -2.5502442789058666,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            7.9708926855593845,
            23.685939197792148,
            23.137077220880442,
            26.867373464737938,
        ],
        atrial_fibrillation: 14.45183543627291,
        renal_disease: 28.270233105364685,
        treated_hypertension: -18.816691001356414,
        type1_diabetes: None,
        type2_diabetes: 0.96298821246400557,
        bmi_1: 10.551375339943302,
        bmi_2: None,
        family_history: 26.604685389705551,
        systolic_bp: 0.29108707921578802,
        townsend: 3.0069917093360048,
    },
};

pub const QRISK2_2012_FEMALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2012,
    sex: Sex::Female,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.21632820937508235, // Indian
        0.69046875081868586, // Pakistani
        0.34226850533456926, // Bangladeshi
        0.073100828835080831, // other Asian
        -0.098939661085253566, // black Caribbean
        -0.23523211780623826, // black African
        -0.29563161921584258, // Chinese
        -0.10101237417302018, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.20332326893261859, // ex-smoker
        0.48204164138279071, // light
        0.61260175026690544, // moderate
        0.7481362046722807, // heavy
    ],
    survival: [
        0.0,
        0.998272597789764,
        0.996482193470001,
        0.994584262371063,
        0.992607414722443,
        0.990407526493073,
        0.988208174705505,
        0.985817015171051,
        0.983284771442413,
        0.980540335178375,
        0.977537572383881,
        0.974311947822571,
        0.971061646938324,
        0.9676553606987,
        0.963695406913757,
        0.959843873977661,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(0.5),
        age_2: FractionalPolynomial::Power(2.0),
        bmi_1: FractionalPolynomial::Power(0.5),
        bmi_2: None,
    },
    centering: ContinuousTerms {
        age_1: 2.214729070663452,
        age_2: 24.05926513671875,
        bmi_1: 1.606468081474304,
        bmi_2: None,
        cholesterol_ratio: 3.708646535873413,
        systolic_bp: 129.99024963378906,
        townsend: -0.485970288515091,
    },
    continuous: ContinuousTerms {
        age_1: 5.0327322737460403,
        age_2: -0.010819028556009847,
        bmi_1: 0.47236851188048573,
        bmi_2: None,
        cholesterol_ratio: 0.13258469781178642,
        systolic_bp: 0.01058659338933114,
        townsend: 0.059745836615512596,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 1.3260722293533254,
        rheumatoid_arthritis: 0.36261451132961547,
        renal_disease: 0.76361918534664242,
        treated_hypertension: 0.54208867363636892,
        type1_diabetes: None,
        type2_diabetes: 0.89398642494544134,
        family_history: 0.59971578095133482,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            0.17737735806677993,
            -0.32774353932693095,
            -1.1532771847454322,
            -1.5396928677197224,
        ],
        atrial_fibrillation: -4.6084283441445892,
        renal_disease: -2.6400602815968979,
        treated_hypertension: -2.2479789428920025,
        type1_diabetes: None,
        type2_diabetes: -1.8452128842162694,
        bmi_1: -3.0850905786159868,
        bmi_2: None,
        family_history: -0.24807791446923921,
        systolic_bp: -0.013245369289010524,
        townsend: -0.036939656631361693,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            -0.0051475082686792311,
            -0.00053197731047539072,
            0.010509170847423789,
            0.015478203705056093,
        ],
        atrial_fibrillation: 0.050745417884445011,
        renal_disease: 0.034325913032226874,
        treated_hypertension: 0.025778359160855802,
        type1_diabetes: None,
        type2_diabetes: 0.017977210965000191,
        bmi_1: 0.034500456051012977,
        bmi_2: None,
        family_history: -0.0062437412993034047,
        systolic_bp: -0.000029509490770991976,
        townsend: -0.0010621576948374419,
    },
};
