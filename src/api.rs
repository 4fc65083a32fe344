//! Public request surface: per-file stats, multi-file stats, and metadata
//!
//! All three calls share one soft-miss contract: an identifier (or search)
//! that matches nothing in the catalog yields an empty map, never an error.
//! Any failure after a dataset *was* found (missing variable, unreadable
//! file, malformed region, empty clip) propagates as a hard error, so callers
//! can tell "nothing matched" apart from "the match is broken".

use crate::catalog::Catalog;
use crate::errors::Result;
use crate::extract;
use crate::region::Region;
use crate::stats;
use crate::temporal;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Summary-statistics record for one (dataset, variable, time, area) request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResult {
    pub mean: f64,
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Unmasked cells that contributed to the statistics.
    pub ncells: usize,
    /// Physical units as recorded in the file, e.g. `K`.
    pub units: String,
    /// Representative ISO-8601 UTC timestamp of the selected time window.
    pub time: String,
}

/// Model-run metadata for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetadata {
    pub institution: String,
    pub model_id: String,
    pub model_name: String,
    pub experiment: String,
    pub ensemble_member: String,
    /// Variable short name mapped to its long description.
    pub variables: HashMap<String, String>,
}

/// Look up model-run metadata for one dataset identifier.
///
/// Returns an empty map when the identifier is unknown to the catalog.
pub fn metadata_for<C: Catalog>(
    catalog: &C,
    unique_id: &str,
) -> Result<HashMap<String, FileMetadata>> {
    let mut results = HashMap::new();

    let dataset = match catalog.find_dataset(unique_id)? {
        Some(ds) => ds,
        None => return Ok(results),
    };

    let variables = dataset
        .variables
        .iter()
        .map(|v| (v.name.clone(), v.long_name.clone()))
        .collect();

    results.insert(
        dataset.unique_id,
        FileMetadata {
            institution: dataset.institution,
            model_id: dataset.model_id,
            model_name: dataset.model_name,
            experiment: dataset.experiment,
            ensemble_member: dataset.ensemble_member,
            variables,
        },
    );
    Ok(results)
}

/// Compute summary statistics for one dataset, keyed by its identifier.
///
/// * `timestep`: `None` aggregates across all timesteps, `Some(t)` selects
///   the single 1-based timestep `t`.
/// * `area`: optional WKT polygon clipping the grid; `None` means whole grid.
///
/// Returns an empty map when the identifier is unknown. Every downstream
/// failure on a found dataset is a hard error. The file handle lives for the
/// duration of this call only.
pub fn stats_for<C: Catalog>(
    catalog: &C,
    unique_id: &str,
    timestep: Option<usize>,
    area: Option<&str>,
    variable: &str,
) -> Result<HashMap<String, StatsResult>> {
    let mut results = HashMap::new();

    let dataset = match catalog.find_dataset(unique_id)? {
        Some(ds) => ds,
        None => return Ok(results),
    };

    let region = area.map(Region::from_wkt).transpose()?;

    let file = netcdf::open(&dataset.filename)?;
    let grid = extract::extract(&file, variable, timestep, region.as_ref())?;
    let summary = stats::reduce(&grid)?;
    let units = extract::units(&file, variable)?;

    let timestamps = catalog.timestamps_for(&dataset.timeset_id)?;
    let timeval = temporal::resolve(&timestamps, timestep)?;

    results.insert(
        dataset.unique_id,
        StatsResult {
            mean: summary.mean,
            stdev: summary.stdev,
            min: summary.min,
            max: summary.max,
            median: summary.median,
            ncells: summary.ncells,
            units,
            time: temporal::format_utc(timeval),
        },
    );
    Ok(results)
}

/// Compute statistics for every dataset matching a catalog search.
///
/// Fans [`stats_for`] out across the matching identifiers in parallel and
/// merges the single-entry maps. An empty search yields an empty map; the
/// first hard error on any matched dataset aborts the whole call. The
/// per-dataset requests are independent, so evaluation order does not affect
/// the merged result.
#[allow(clippy::too_many_arguments)]
pub fn multi_stats<C: Catalog + Sync>(
    catalog: &C,
    ensemble: &str,
    model: &str,
    emission: &str,
    timestep: Option<usize>,
    area: Option<&str>,
    variable: &str,
) -> Result<HashMap<String, StatsResult>> {
    let ids = catalog.find_dataset_ids(ensemble, model, emission, variable, timestep)?;

    let per_file: Vec<HashMap<String, StatsResult>> = ids
        .par_iter()
        .map(|id| stats_for(catalog, id, timestep, area, variable))
        .collect::<Result<Vec<_>>>()?;

    let mut merged = HashMap::new();
    for map in per_file {
        merged.extend(map);
    }
    Ok(merged)
}
