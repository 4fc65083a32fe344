//! Dataset catalog collaborator
//!
//! The catalog is reference data maintained outside this crate: which dataset
//! identifiers exist, which file each one lives in, which model run produced
//! it, and the calendar timestamps of its time axis. The API layer consumes it
//! through the narrow [`Catalog`] trait; [`MemoryCatalog`] is an in-memory
//! implementation for embedding and tests.

use crate::errors::{ClimoStatError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// One variable stored in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    /// Short machine name, e.g. `tasmax`.
    pub name: String,
    /// Long human-readable description, e.g. `Maximum daily temperature`.
    pub long_name: String,
}

/// Reference record for one gridded-data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Globally unique identifier clients use to request this file.
    pub unique_id: String,
    /// Path of the NetCDF file on disk.
    pub filename: PathBuf,
    /// Application-level ensemble the dataset belongs to, e.g. `ce`.
    pub ensemble: String,
    /// Originating institution.
    pub institution: String,
    /// Model short name, e.g. `CGCM3`.
    pub model_id: String,
    /// Model long name.
    pub model_name: String,
    /// Emission scenario short name, e.g. `historical+rcp85`.
    pub experiment: String,
    /// Run name, e.g. `r1i1p1`.
    pub ensemble_member: String,
    /// Variables stored in the file.
    pub variables: Vec<VariableInfo>,
    /// Identifier of the timeset describing the file's time axis.
    pub timeset_id: String,
}

/// Read-only lookup interface over the dataset catalog.
///
/// `find_dataset` distinguishes "identifier unknown" (`Ok(None)`, a soft miss
/// the API turns into an empty map) from backend failures (`Err`).
pub trait Catalog {
    /// Look up one dataset by its unique identifier.
    fn find_dataset(&self, unique_id: &str) -> Result<Option<Dataset>>;

    /// Search for dataset identifiers by ensemble, model, emission scenario
    /// and variable. Empty `model` / `emission` filters match everything.
    /// `timestep` restricts matches to datasets whose time axis is long
    /// enough to contain the 1-based index.
    fn find_dataset_ids(
        &self,
        ensemble: &str,
        model: &str,
        emission: &str,
        variable: &str,
        timestep: Option<usize>,
    ) -> Result<Vec<String>>;

    /// Ordered calendar timestamps of a timeset.
    fn timestamps_for(&self, timeset_id: &str) -> Result<Vec<DateTime<Utc>>>;
}

/// In-memory catalog backed by hash maps.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    datasets: HashMap<String, Dataset>,
    timesets: HashMap<String, Vec<DateTime<Utc>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset record, replacing any record with the same id.
    pub fn add_dataset(&mut self, dataset: Dataset) {
        self.datasets.insert(dataset.unique_id.clone(), dataset);
    }

    /// Register a timeset. Timestamps must already be strictly ordered.
    pub fn add_timeset(&mut self, timeset_id: &str, timestamps: Vec<DateTime<Utc>>) {
        self.timesets.insert(timeset_id.to_string(), timestamps);
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn find_dataset(&self, unique_id: &str) -> Result<Option<Dataset>> {
        Ok(self.datasets.get(unique_id).cloned())
    }

    fn find_dataset_ids(
        &self,
        ensemble: &str,
        model: &str,
        emission: &str,
        variable: &str,
        timestep: Option<usize>,
    ) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .datasets
            .values()
            .filter(|ds| ds.ensemble == ensemble)
            .filter(|ds| model.is_empty() || ds.model_id == model)
            .filter(|ds| emission.is_empty() || ds.experiment == emission)
            .filter(|ds| ds.variables.iter().any(|v| v.name == variable))
            .filter(|ds| match timestep {
                None => true,
                Some(t) => self
                    .timesets
                    .get(&ds.timeset_id)
                    .map_or(false, |ts| t >= 1 && t <= ts.len()),
            })
            .map(|ds| ds.unique_id.clone())
            .collect();

        // Hash map order is arbitrary; sort so repeated searches agree.
        ids.sort();
        Ok(ids)
    }

    fn timestamps_for(&self, timeset_id: &str) -> Result<Vec<DateTime<Utc>>> {
        self.timesets
            .get(timeset_id)
            .cloned()
            .ok_or_else(|| ClimoStatError::TimesetNotFound {
                timeset: timeset_id.to_string(),
            })
    }
}
