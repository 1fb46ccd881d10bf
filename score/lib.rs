#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(clippy::no_effect_underscore_binding)]
//! Versioned QRISK2 cardiovascular risk scoring.
//!
//! Every published release (2011, 2012, 2015) is a pair of fitted Cox models, one
//! per sex. A model is pure data, a `CoefficientTable`; one shared algorithm turns
//! a `PatientProfile` into the percentage risk of a cardiovascular event within a
//! follow-up horizon of 1 to 15 years.

pub mod batch;
pub mod coefficients;
pub mod engine;
pub mod predictor;
pub mod registry;
pub mod survival;
pub mod tables;
pub mod transform;
pub mod types;
pub mod validate;

pub use coefficients::{CoefficientTable, TableError};
pub use engine::{Evaluation, RiskError, RiskModel, evaluate};
pub use registry::ModelRegistry;
pub use types::{Ethnicity, ModelVersion, PatientProfile, Sex, SmokingStatus};
pub use validate::DomainError;
