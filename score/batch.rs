//! # Batch Scoring
//!
//! Scores a whole cohort read from a tab-separated file and writes one result row
//! per patient, in input order.
//!
//! - Strict Schema: column names are fixed. Every input of the patient profile has
//!   its own column; `prior_cvd` is the only optional one.
//! - All-or-nothing: a malformed or out-of-domain row aborts the run and is reported
//!   by its line number. No partial output is written.
//! - Evaluation is parallel over rows; output order always matches input order.

use crate::engine::{Evaluation, RiskError};
use crate::registry::ModelRegistry;
use crate::types::{Ethnicity, ModelVersion, PatientProfile, Sex, SmokingStatus};
use crate::validate::DomainError;
use rayon::prelude::*;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// The columns every input file must carry, in the order written by `template`.
pub const INPUT_COLUMNS: [&str; 17] = [
    "iid",
    "sex",
    "age",
    "bmi",
    "townsend",
    "systolic_bp",
    "cholesterol_ratio",
    "smoking",
    "ethnicity",
    "atrial_fibrillation",
    "rheumatoid_arthritis",
    "renal_disease",
    "treated_hypertension",
    "type1_diabetes",
    "type2_diabetes",
    "family_history",
    "prior_cvd",
];

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error reading or writing tab-separated data: {0}")]
    Csv(#[from] csv::Error),
    #[error(
        "The input header has an unrecognised column '{0}'. Expected only: {columns}",
        columns = INPUT_COLUMNS.join(", ")
    )]
    UnknownColumn(String),
    #[error("Line {line}: the record could not be read: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("Line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: RiskError,
    },
}

/// What to score every row against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub version: ModelVersion,
    pub follow_up_year: u32,
}

/// Totals reported once a batch has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub rows: usize,
    pub out_of_band: usize,
}

#[derive(Debug, Deserialize)]
struct InputRow {
    iid: String,
    sex: String,
    age: f64,
    bmi: f64,
    townsend: f64,
    systolic_bp: f64,
    cholesterol_ratio: f64,
    smoking: u8,
    ethnicity: u8,
    #[serde(deserialize_with = "flag")]
    atrial_fibrillation: bool,
    #[serde(deserialize_with = "flag")]
    rheumatoid_arthritis: bool,
    #[serde(deserialize_with = "flag")]
    renal_disease: bool,
    #[serde(deserialize_with = "flag")]
    treated_hypertension: bool,
    #[serde(deserialize_with = "flag")]
    type1_diabetes: bool,
    #[serde(deserialize_with = "flag")]
    type2_diabetes: bool,
    #[serde(deserialize_with = "flag")]
    family_history: bool,
    #[serde(default, deserialize_with = "flag")]
    prior_cvd: bool,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    iid: &'a str,
    model: &'static str,
    sex: Sex,
    years: u32,
    linear_predictor: f64,
    risk_percent: f64,
}

/// One parsed input record, remembered with the line it came from.
struct Patient {
    line: u64,
    iid: String,
    sex: Sex,
    profile: PatientProfile,
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let text = String::deserialize(deserializer)?;
    match text.trim() {
        "0" | "false" | "FALSE" => Ok(false),
        "1" | "true" | "TRUE" => Ok(true),
        other => Err(D::Error::custom(format!("expected 0 or 1, found '{other}'"))),
    }
}

impl InputRow {
    fn into_patient(self, line: u64) -> Result<Patient, DomainError> {
        Ok(Patient {
            line,
            sex: Sex::parse(&self.sex)?,
            profile: PatientProfile {
                age: self.age,
                bmi: self.bmi,
                townsend: self.townsend,
                systolic_bp: self.systolic_bp,
                cholesterol_ratio: self.cholesterol_ratio,
                smoking: SmokingStatus::from_code(self.smoking)?,
                ethnicity: Ethnicity::from_code(self.ethnicity)?,
                atrial_fibrillation: self.atrial_fibrillation,
                rheumatoid_arthritis: self.rheumatoid_arthritis,
                renal_disease: self.renal_disease,
                treated_hypertension: self.treated_hypertension,
                type1_diabetes: self.type1_diabetes,
                type2_diabetes: self.type2_diabetes,
                family_history: self.family_history,
                prior_cvd: self.prior_cvd,
            },
            iid: self.iid,
        })
    }
}

/// Scores the file at `input` and writes the results to `output`.
pub fn score_file(
    input: &Path,
    output: &Path,
    request: BatchRequest,
    registry: &ModelRegistry,
) -> Result<BatchSummary, BatchError> {
    log::info!("Reading patients from '{}'", input.display());
    let reader = BufReader::new(File::open(input)?);

    // Score into memory first so that a bad row never leaves a half-written file.
    let mut buffer = Vec::new();
    let summary = score_reader(reader, &mut buffer, request, registry)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writer.write_all(&buffer)?;
    writer.flush()?;
    log::info!("Wrote {} results to '{}'", summary.rows, output.display());
    Ok(summary)
}

/// Scores tab-separated patient records from `reader` into `writer`.
pub fn score_reader<R: Read, W: Write>(
    reader: R,
    writer: W,
    request: BatchRequest,
    registry: &ModelRegistry,
) -> Result<BatchSummary, BatchError> {
    let patients = read_patients(reader)?;
    log::info!(
        "Scoring {} patients with {} at {} years",
        patients.len(),
        request.version,
        request.follow_up_year
    );

    let results: Vec<Result<Evaluation, BatchError>> = patients
        .par_iter()
        .map(|patient| {
            registry
                .resolve(request.version, patient.sex)
                .and_then(|model| model.evaluate(&patient.profile, request.follow_up_year))
                .map_err(|source| BatchError::Row {
                    line: patient.line,
                    source,
                })
        })
        .collect();

    let mut evaluations = Vec::with_capacity(results.len());
    for result in results {
        evaluations.push(result?);
    }

    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    let mut summary = BatchSummary::default();
    for (patient, evaluation) in patients.iter().zip(&evaluations) {
        out.serialize(OutputRow {
            iid: &patient.iid,
            model: evaluation.version.label(),
            sex: evaluation.sex,
            years: evaluation.follow_up_year,
            linear_predictor: evaluation.linear_predictor,
            risk_percent: evaluation.risk_percent,
        })?;
        summary.rows += 1;
        if !evaluation.is_within_band() {
            summary.out_of_band += 1;
        }
    }
    out.flush()?;

    if summary.out_of_band > 0 {
        log::warn!(
            "{} of {} patients scored outside the 0 to 100 percent band",
            summary.out_of_band,
            summary.rows
        );
    }
    Ok(summary)
}

fn read_patients<R: Read>(reader: R) -> Result<Vec<Patient>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    if let Some(unknown) = headers.iter().find(|column| !INPUT_COLUMNS.contains(column)) {
        return Err(BatchError::UnknownColumn(unknown.to_string()));
    }

    let mut patients = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let row: InputRow = record
            .deserialize(Some(&headers))
            .map_err(|err| BatchError::Malformed {
                line,
                reason: err.to_string(),
            })?;
        let patient = row.into_patient(line).map_err(|err| BatchError::Row {
            line,
            source: RiskError::from(err),
        })?;
        patients.push(patient);
    }
    Ok(patients)
}

/// A header line naming every input column, for users building an input file.
pub fn template() -> String {
    INPUT_COLUMNS.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::tempdir;

    fn request(version: ModelVersion) -> BatchRequest {
        BatchRequest {
            version,
            follow_up_year: 10,
        }
    }

    fn input(rows: &[&str]) -> String {
        let mut text = template();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    const BASE_MALE: &str = "p1\tmale\t60\t25\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0\t0";
    const BASE_FEMALE: &str = "p2\tF\t60\t25\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0\t0";

    fn score(text: &str, version: ModelVersion) -> Result<(BatchSummary, String), BatchError> {
        let mut out = Vec::new();
        let summary = score_reader(text.as_bytes(), &mut out, request(version), registry::builtin())?;
        Ok((summary, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn rows_are_scored_in_input_order() {
        let (summary, output) =
            score(&input(&[BASE_MALE, BASE_FEMALE]), ModelVersion::V2011).unwrap();
        assert_eq!(summary, BatchSummary { rows: 2, out_of_band: 0 });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "iid\tmodel\tsex\tyears\tlinear_predictor\trisk_percent");
        assert!(lines[1].starts_with("p1\tQRISK2-2011\tmale\t10\t"));
        assert!(lines[2].starts_with("p2\tQRISK2-2011\tfemale\t10\t"));

        let risk: f64 = lines[1].rsplit('\t').next().unwrap().parse().unwrap();
        assert_relative_eq!(risk, 10.25139927727432, max_relative = 1e-12);
    }

    #[test]
    fn prior_cvd_column_is_optional() {
        let header = INPUT_COLUMNS[..16].join("\t");
        let row = "p1\tmale\t60\t25\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0";
        let text = format!("{header}\n{row}\n");
        let (summary, _) = score(&text, ModelVersion::V2015).unwrap();
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn misspelled_optional_column_is_rejected() {
        let header = template().replace("prior_cvd", "prior_cv");
        let row = "p1\tmale\t60\t25\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0\t1";
        let text = format!("{header}\n{row}\n");
        match score(&text, ModelVersion::V2015) {
            Err(BatchError::UnknownColumn(column)) => assert_eq!(column, "prior_cv"),
            other => panic!("expected an unknown column error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_flag_aborts_with_its_line() {
        let bad = "p3\tmale\t60\t25\t0\t130\t4\t0\t1\tyes\t0\t0\t0\t0\t0\t0\t0";
        match score(&input(&[BASE_MALE, bad]), ModelVersion::V2012) {
            Err(BatchError::Malformed { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("yes"), "{reason}");
            }
            other => panic!("expected a malformed row error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_domain_rows_abort_with_their_line() {
        let zero_bmi = "p4\tfemale\t60\t0\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0\t0";
        match score(&input(&[BASE_FEMALE, zero_bmi]), ModelVersion::V2015) {
            Err(BatchError::Row { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, RiskError::Domain(DomainError::NonPositive { .. })));
            }
            other => panic!("expected a domain error, got {other:?}"),
        }

        let bad_ethnicity = "p5\tfemale\t60\t25\t0\t130\t4\t0\t12\t0\t0\t0\t0\t0\t0\t0\t0";
        match score(&input(&[bad_ethnicity]), ModelVersion::V2015) {
            Err(BatchError::Row { line: 2, source }) => {
                assert_eq!(source, RiskError::Domain(DomainError::UnknownEthnicityCode(12)));
            }
            other => panic!("expected an ethnicity error, got {other:?}"),
        }
    }

    #[test]
    fn failed_batches_leave_no_output_file() {
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("cohort.tsv");
        let output_path = dir.path().join("scores.tsv");
        let bad = "p6\tunknown\t60\t25\t0\t130\t4\t0\t1\t0\t0\t0\t0\t0\t0\t0\t0";
        fs::write(&input_path, input(&[bad])).unwrap();

        let err = score_file(
            &input_path,
            &output_path,
            request(ModelVersion::V2011),
            registry::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Row { line: 2, .. }));
        assert!(!output_path.exists());
    }

    #[test]
    fn unregistered_sex_is_reported_per_row() {
        let mut registry = ModelRegistry::empty();
        registry.register(crate::tables::QRISK2_2015_MALE).unwrap();
        let mut out = Vec::new();
        let err = score_reader(
            input(&[BASE_MALE, BASE_FEMALE]).as_bytes(),
            &mut out,
            request(ModelVersion::V2015),
            &registry,
        )
        .unwrap_err();
        match err {
            BatchError::Row { line: 3, source: RiskError::UnsupportedModel(_) } => {}
            other => panic!("expected UnsupportedModel on line 3, got {other:?}"),
        }
    }
}
