// The published coefficient tables, one `const` per (release, sex).
//
// These literals are the whole of the models' fitted state. Every digit is copied
// from the published calculators, and scores only match theirs while these stay
// untouched.

mod qrisk2_2011;
mod qrisk2_2012;
mod qrisk2_2015;

pub use qrisk2_2011::{QRISK2_2011_FEMALE, QRISK2_2011_MALE};
pub use qrisk2_2012::{QRISK2_2012_FEMALE, QRISK2_2012_MALE};
pub use qrisk2_2015::{QRISK2_2015_FEMALE, QRISK2_2015_MALE};

use crate::coefficients::CoefficientTable;

/// Every built-in table, in release order with the male model first.
pub const ALL: [CoefficientTable; 6] = [
    QRISK2_2011_MALE,
    QRISK2_2011_FEMALE,
    QRISK2_2012_MALE,
    QRISK2_2012_FEMALE,
    QRISK2_2015_MALE,
    QRISK2_2015_FEMALE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModelVersion, Sex};
    use std::collections::HashSet;

    #[test]
    fn every_release_has_both_sexes_exactly_once() {
        let keys: HashSet<(ModelVersion, Sex)> =
            ALL.iter().map(|table| (table.version, table.sex)).collect();
        assert_eq!(keys.len(), ALL.len());
        for version in ModelVersion::ALL {
            assert!(keys.contains(&(version, Sex::Male)));
            assert!(keys.contains(&(version, Sex::Female)));
        }
    }

    #[test]
    fn baseline_survival_decreases_with_follow_up() {
        for table in ALL {
            assert_eq!(table.survival[0], 0.0);
            for year in 2..table.survival.len() {
                assert!(
                    table.survival[year] < table.survival[year - 1],
                    "{} {} survival not decreasing at year {year}",
                    table.version,
                    table.sex
                );
            }
        }
    }

    #[test]
    fn only_2015_models_have_two_bmi_terms_and_type1_diabetes() {
        for table in ALL {
            let is_2015 = table.version == ModelVersion::V2015;
            assert_eq!(table.has_second_bmi_term(), is_2015);
            assert_eq!(table.models_type1_diabetes(), is_2015);
        }
    }

    #[test]
    fn published_reference_constants_spot_check() {
        assert_eq!(QRISK2_2015_MALE.survival[10], 0.978794217109680);
        assert_eq!(QRISK2_2015_MALE.centering.systolic_bp, 130.589752197265620);
        assert_eq!(QRISK2_2015_FEMALE.smoking[4], 0.9496298251457036);
        assert_eq!(QRISK2_2011_MALE.centering.townsend, -0.164980158209801);
        assert_eq!(
            QRISK2_2012_FEMALE.age_2_interactions.systolic_bp,
            -0.0000295094907709919760000
        );
        assert_eq!(QRISK2_2011_FEMALE.ethnicity[9], -0.1332541744745928700000000);
    }
}
