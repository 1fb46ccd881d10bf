use crate::coefficients::{CoefficientTable, MAX_FOLLOW_UP_YEAR};
use crate::engine::RiskError;

/// Looks up the baseline survival of the reference patient at `year`.
///
/// Year 0 is the table's sentinel entry and is rejected along with anything past
/// the last published year.
pub fn baseline_survival(table: &CoefficientTable, year: u32) -> Result<f64, RiskError> {
    if year == 0 || year > MAX_FOLLOW_UP_YEAR {
        return Err(RiskError::InvalidFollowUpYear {
            year,
            max: MAX_FOLLOW_UP_YEAR,
        });
    }
    Ok(table.survival[year as usize])
}

/// Converts a linear predictor into an absolute risk percentage:
/// `100 * (1 - S^exp(a))`.
///
/// The result is not clamped. Physiologically plausible inputs land in [0, 100);
/// extreme ones may not, and that is left for the caller to judge.
#[inline]
pub fn absolute_risk(baseline_survival: f64, linear_predictor: f64) -> f64 {
    100.0 * (1.0 - baseline_survival.powf(linear_predictor.exp()))
}

/// The individual's survival probability, `S^exp(a)`.
#[inline]
pub fn individual_survival(baseline_survival: f64, linear_predictor: f64) -> f64 {
    baseline_survival.powf(linear_predictor.exp())
}
