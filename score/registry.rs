// ========================================================================================
//
//                     Model registry: (release, sex) -> fitted model
//
// ========================================================================================
//
// The published releases are loaded once into a process-wide registry that is never
// mutated afterwards, so any number of threads may resolve and evaluate against it
// without synchronisation. Callers who want to score against a replacement table
// build their own registry with `ModelRegistry::empty` or by cloning the built-ins.

use crate::coefficients::{CoefficientTable, TableError};
use crate::engine::{RiskError, RiskModel};
use crate::tables;
use crate::types::{ModelVersion, Sex};
use log::debug;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static BUILTIN: OnceLock<ModelRegistry> = OnceLock::new();

/// The registry holding every published release, built on first use.
pub fn builtin() -> &'static ModelRegistry {
    BUILTIN.get_or_init(ModelRegistry::published)
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<(ModelVersion, Sex), RiskModel>,
}

impl ModelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    fn published() -> Self {
        let models: BTreeMap<_, _> = tables::ALL
            .into_iter()
            .map(|table| ((table.version, table.sex), RiskModel::published(table)))
            .collect();
        debug!("Registered {} published QRISK2 models", models.len());
        Self { models }
    }

    /// Adds a table, replacing any model already registered for its (release, sex).
    /// The table must pass its consistency check first.
    pub fn register(&mut self, table: CoefficientTable) -> Result<(), TableError> {
        let model = RiskModel::new(table)?;
        let replaced = self.models.insert((table.version, table.sex), model).is_some();
        debug!(
            "{} {} model {}",
            table.version,
            table.sex,
            if replaced { "replaced" } else { "registered" }
        );
        Ok(())
    }

    /// Looks up the model for one (release, sex) pair.
    pub fn resolve(&self, version: ModelVersion, sex: Sex) -> Result<&RiskModel, RiskError> {
        self.models
            .get(&(version, sex))
            .ok_or_else(|| RiskError::UnsupportedModel(format!("{version} {sex}")))
    }

    /// Looks up a model from a free-form release label such as `"2012"` or `"QRISK2-2015"`.
    pub fn resolve_label(&self, label: &str, sex: Sex) -> Result<&RiskModel, RiskError> {
        let version = ModelVersion::parse(label)
            .ok_or_else(|| RiskError::UnsupportedModel(label.trim().to_string()))?;
        self.resolve(version, sex)
    }

    /// Every registered model, ordered by release and then sex.
    pub fn models(&self) -> impl Iterator<Item = &RiskModel> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
