//! QRISK2-2011: the first open release of QRISK2. Age enters through an
//! inverse-square pair for men and a square-root/square pair for women; BMI
//! has a single term. There is no type 1 diabetes coefficient.

use crate::coefficients::{
    AgeInteractions, CoefficientTable, ConditionEffects, ContinuousTerms, FractionalPolynomial,
    TransformSpec,
};
use crate::types::{ModelVersion, Sex};

pub const QRISK2_2011_MALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2011,
    sex: Sex::Male,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.29512017222265091, // Indian
        0.57745360841419557, // Pakistani
        0.58567890510393561, // Bangladeshi
        0.15573641242445102, // other Asian
        -0.4239684807026608, // black Caribbean
        -0.52985352791098639, // black African
        -0.34095605551067926, // Chinese
        -0.2547523360677878, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.26826883916112776, // ex-smoker
        0.50421854393416277, // light
        0.61865596420786984, // moderate
        0.75848093713107034, // heavy
    ],
    survival: [
        0.0,
        0.997251808643341,
        0.994411587715149,
        0.991577506065369,
        0.98843115568161,
        0.98508495092392,
        0.981717884540558,
        0.978166103363037,
        0.97457629442215,
        0.970824301242828,
        0.966860234737396,
        0.962876856327057,
        0.958815157413483,
        0.954597651958466,
        0.950800955295563,
        0.946760058403015,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(-2.0),
        age_2: FractionalPolynomial::PowerLog(-2.0),
        bmi_1: FractionalPolynomial::Log,
        bmi_2: None,
    },
    centering: ContinuousTerms {
        age_1: 0.044995188713074,
        age_2: 0.069769531488419,
        bmi_1: 0.967867195606232,
        bmi_2: None,
        cholesterol_ratio: 4.458122253417969,
        systolic_bp: 133.24819946289062,
        townsend: -0.164980158209801,
    },
    continuous: ContinuousTerms {
        age_1: 47.440923143257152,
        age_2: -103.96947785481335,
        bmi_1: 0.44542126588796782,
        bmi_2: None,
        cholesterol_ratio: 0.1531415988987079,
        systolic_bp: 0.008648110165589782,
        townsend: 0.032661685496224238,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 0.67249753457085182,
        rheumatoid_arthritis: 0.28446758036295539,
        renal_disease: 0.79344283847143438,
        treated_hypertension: 0.55019286731942429,
        type1_diabetes: None,
        type2_diabetes: 0.81027360624766853,
        family_history: 0.75096252549160936,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            -1.8114868938741493,
            -14.017892535548945,
            -12.2971507354086,
            -9.5995358645940403,
        ],
        atrial_fibrillation: -29.922928300989838,
        renal_disease: -55.554745781447508,
        treated_hypertension: 31.018645246324326,
        type1_diabetes: None,
        type2_diabetes: -19.879608794470244,
        bmi_1: 16.343708280978742,
        bmi_2: None,
        family_history: -26.317591423931624,
        systolic_bp: -0.22886637783694899,
        townsend: -2.8512030583797006,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            6.3639267384563913,
            19.375617501205724,
            18.841564504919479,
            19.705940924328388,
        ],
        atrial_fibrillation: 31.155757262658451,
        renal_disease: 59.00280819091396,
        treated_hypertension: -14.619123938696021,
        type1_diabetes: None,
        type2_diabetes: 29.201578302956563,
        bmi_1: -2.9965983324865419,
        bmi_2: None,
        family_history: 35.682932396859897,
        systolic_bp: 0.36473401471960243,
        townsend: 3.3173634478389573,
    },
};

pub const QRISK2_2011_FEMALE: CoefficientTable = CoefficientTable {
    version: ModelVersion::V2011,
    sex: Sex::Female,
    ethnicity: [
        0.0, // not recorded
        0.0, // white
        0.27019974850158474, // Indian
        0.58499258162221979, // Pakistani
        0.29282934372548736, // Bangladeshi
        0.045716959879045262, // other Asian
        -0.09410876199835877, // black Caribbean
        -0.55153621084141202, // black African
        -0.32763717335216208, // Chinese
        -0.13325417447459287, // other
    ],
    smoking: [
        0.0, // non-smoker
        0.23277028105498029, // ex-smoker
        0.48755846156358001, // light
        0.62778345201293984, // moderate
        0.76593093598352624, // heavy
    ],
    survival: [
        0.0,
        0.998361468315125,
        0.996678650379181,
        0.99499785900116,
        0.993098974227905,
        0.991098940372467,
        0.989080786705017,
        0.98695957660675,
        0.98481959104538,
        0.982504785060883,
        0.980139017105103,
        0.977676749229431,
        0.975248038768768,
        0.972871840000153,
        0.97053050994873,
        0.968057155609131,
    ],
    transforms: TransformSpec {
        age_1: FractionalPolynomial::Power(0.5),
        age_2: FractionalPolynomial::Power(2.0),
        bmi_1: FractionalPolynomial::Power(0.5),
        bmi_2: None,
    },
    centering: ContinuousTerms {
        age_1: 2.212557792663574,
        age_2: 23.965053558349609,
        bmi_1: 1.605302810668945,
        bmi_2: None,
        cholesterol_ratio: 3.710259437561035,
        systolic_bp: 129.84271240234375,
        townsend: -0.301369071006775,
    },
    continuous: ContinuousTerms {
        age_1: 5.3451763070030678,
        age_2: -0.014126998066528543,
        bmi_1: 0.42651635817396105,
        bmi_2: None,
        cholesterol_ratio: 0.14262738628806085,
        systolic_bp: 0.011652645055112952,
        townsend: 0.059631115336357191,
    },
    conditions: ConditionEffects {
        atrial_fibrillation: 1.2229035784229223,
        rheumatoid_arthritis: 0.32700746085385957,
        renal_disease: 0.78203596295411515,
        treated_hypertension: 0.54817348363115603,
        type1_diabetes: None,
        type2_diabetes: 0.85909189823248766,
        family_history: 0.64383146172465788,
    },
    age_1_interactions: AgeInteractions {
        smoking: [
            0.57153890847826705,
            -0.5974287351563502,
            -1.2334443621176749,
            -1.7283153973048535,
        ],
        atrial_fibrillation: -3.8277394672781142,
        renal_disease: -2.9025720400215884,
        treated_hypertension: -1.9524720689086561,
        type1_diabetes: None,
        type2_diabetes: -1.6599035893675749,
        bmi_1: -4.2607595722174354,
        bmi_2: None,
        family_history: -0.084359221900763046,
        systolic_bp: -0.01874411445993783,
        townsend: 0.015836845082047014,
    },
    age_2_interactions: AgeInteractions {
        smoking: [
            -0.012190813287691827,
            0.0045599556763008383,
            0.012735521497938558,
            0.018371922351253608,
        ],
        atrial_fibrillation: 0.041138324099685396,
        renal_disease: 0.035711195671512874,
        treated_hypertension: 0.020053559624191336,
        type1_diabetes: None,
        type2_diabetes: 0.016378765097141805,
        bmi_1: 0.055334909162920387,
        bmi_2: None,
        family_history: -0.010070752832885353,
        systolic_bp: 0.000048655850493983563,
        townsend: -0.0019506535670581145,
    },
};
