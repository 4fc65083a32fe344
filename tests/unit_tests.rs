//! Unit tests for climostat modules
//!
//! Covers error formatting, region parsing, temporal resolution, the masked
//! grid type, and NetCDF extraction against files written on the fly.

use chrono::{DateTime, TimeZone, Utc};
use climostat::{
    errors::{ClimoStatError, Result},
    extract::{extract, units},
    masked::MaskedGrid,
    parallel::ParallelConfig,
    region::Region,
    stats::reduce,
    temporal,
};
use ndarray::{Array1, Array3};
use netcdf::{create, open};
use std::path::Path;
use tempfile::tempdir;

fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Write a (time=2, lat=2, lon=2) tasmax file. Cell (0, 1, 1) carries the
/// fill value; everything else is `base + flat_index`.
fn write_small_file(path: &Path, base: f64) {
    let mut values: Vec<f64> = (0..8).map(|k| base + k as f64).collect();
    values[3] = -9999.0; // (0, 1, 1)

    let mut file = create(path).expect("Failed to create NetCDF file");
    file.add_dimension("time", 2).unwrap();
    file.add_dimension("lat", 2).unwrap();
    file.add_dimension("lon", 2).unwrap();

    let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat.put(Array1::from_vec(vec![45.0, 55.0]).view(), ..).unwrap();
    let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon.put(Array1::from_vec(vec![-120.0, -110.0]).view(), ..)
        .unwrap();

    let mut var = file
        .add_variable::<f64>("tasmax", &["time", "lat", "lon"])
        .unwrap();
    var.put_attribute("units", "K").unwrap();
    var.put_attribute("long_name", "Maximum daily temperature")
        .unwrap();
    var.put_attribute("_FillValue", -9999.0f64).unwrap();
    let arr = Array3::from_shape_vec((2, 2, 2), values).unwrap();
    var.put(arr.view(), ..).unwrap();
}

#[test]
fn test_error_types() {
    let var_err = ClimoStatError::VariableNotFound {
        var: "tasmax".to_string(),
    };
    assert!(format!("{}", var_err).contains("Variable 'tasmax' not found"));

    let step_err = ClimoStatError::TimestepOutOfRange { index: 13, len: 12 };
    assert!(format!("{}", step_err).contains("Timestep 13"));

    let wkt_err = ClimoStatError::InvalidWkt("Expected POLYGON format".to_string());
    assert!(format!("{}", wkt_err).contains("Invalid WKT region"));

    let generic_err = ClimoStatError::Generic("Test error".to_string());
    assert_eq!(format!("{}", generic_err), "Test error");

    assert!(format!("{}", ClimoStatError::EmptyRegion).contains("masked"));
}

#[test]
fn test_region_parsing_and_containment() -> Result<()> {
    let region = Region::from_wkt("POLYGON((-125 40, -115 40, -115 60, -125 60, -125 40))")?;
    assert_eq!(region.num_points(), 5);

    assert!(region.contains(-120.0, 45.0));
    assert!(region.contains(-120.0, 55.0));
    assert!(!region.contains(-110.0, 45.0));
    assert!(!region.contains(-120.0, 65.0));

    assert_eq!(region.bbox(), (-125.0, 40.0, -115.0, 60.0));

    // Case-insensitive keyword, tolerant whitespace
    let lower = Region::from_wkt("  polygon((0 0, 10 0, 10 10, 0 10, 0 0))  ")?;
    assert!(lower.contains(5.0, 5.0));

    Ok(())
}

#[test]
fn test_region_parsing_failures() {
    for bad in [
        "POINT(1 2)",
        "POLYGON",
        "POLYGON((0 0, 1 1, 0 0))",
        "POLYGON((0 0, 1 x, 1 1, 0 0))",
        "POLYGON((0 0, 1 0, 1 1, 0 0), (0 0, 1 0, 1 1, 0 0))",
        "POLYGON((0 0, 1 0, 1 1, 0 0))garbage",
    ] {
        match Region::from_wkt(bad) {
            Err(ClimoStatError::InvalidWkt(_)) => {}
            other => panic!("Expected InvalidWkt for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_temporal_midpoint_no_selector() -> Result<()> {
    let stamps = vec![ts(2000, 1, 1), ts(2000, 1, 3)];
    let resolved = temporal::resolve(&stamps, None)?;
    assert_eq!(temporal::format_utc(resolved), "2000-01-02T00:00:00Z");
    Ok(())
}

#[test]
fn test_temporal_exact_selector() -> Result<()> {
    let stamps = vec![ts(2000, 1, 1), ts(2000, 1, 3)];
    let resolved = temporal::resolve(&stamps, Some(2))?;
    assert_eq!(temporal::format_utc(resolved), "2000-01-03T00:00:00Z");
    Ok(())
}

#[test]
fn test_temporal_selector_out_of_range() {
    let stamps = vec![ts(2000, 1, 1), ts(2000, 1, 3)];
    match temporal::resolve(&stamps, Some(3)) {
        Err(ClimoStatError::TimestepOutOfRange { index: 3, len: 2 }) => {}
        other => panic!("Expected TimestepOutOfRange, got {:?}", other),
    }
    // The selector is 1-based; 0 is the "all timesteps" sentinel upstream and
    // never a valid index here.
    assert!(temporal::resolve(&stamps, Some(0)).is_err());
}

#[test]
fn test_temporal_empty_timeset() {
    match temporal::resolve(&[], None) {
        Err(ClimoStatError::EmptyTimeset) => {}
        other => panic!("Expected EmptyTimeset, got {:?}", other),
    }
}

#[test]
fn test_mean_datetime_with_time_of_day() -> Result<()> {
    let a = Utc.with_ymd_and_hms(1985, 6, 30, 0, 0, 0).unwrap();
    let b = Utc.with_ymd_and_hms(1985, 7, 1, 0, 0, 0).unwrap();
    let mid = temporal::mean_datetime(&[a, b])?;
    assert_eq!(temporal::format_utc(mid), "1985-06-30T12:00:00Z");
    Ok(())
}

#[test]
fn test_masked_grid_compressed_order() {
    let data = Array3::from_shape_vec((1, 2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let mut grid = MaskedGrid::from_data(data);
    assert_eq!(grid.ncells(), 4);
    assert_eq!(grid.compressed(), vec![1.0, 2.0, 3.0, 4.0]);

    grid.mask_where(|_, j, i| j == 0 && i == 1);
    assert_eq!(grid.ncells(), 3);
    assert_eq!(grid.compressed(), vec![1.0, 3.0, 4.0]);
    assert!(grid.is_masked(0, 0, 1));
}

#[test]
fn test_masked_grid_union_mask() {
    let data = Array3::from_shape_vec((1, 1, 2), vec![1.0, 2.0]).unwrap();
    let mut mask = Array3::from_elem((1, 1, 2), false);
    mask[[0, 0, 0]] = true;
    let mut grid = MaskedGrid::new(data, mask).unwrap();

    // Predicate keeps everything; the pre-existing mask must survive.
    grid.mask_where(|_, _, _| false);
    assert_eq!(grid.ncells(), 1);
    assert_eq!(grid.compressed(), vec![2.0]);
}

#[test]
fn test_masked_grid_shape_mismatch() {
    let data = Array3::from_shape_vec((1, 1, 2), vec![1.0, 2.0]).unwrap();
    let mask = Array3::from_elem((1, 2, 2), false);
    assert!(MaskedGrid::new(data, mask).is_err());
}

#[test]
fn test_extract_full_grid_masks_fill_values() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.nc");
    write_small_file(&path, 10.0);

    let file = open(&path)?;
    let grid = extract(&file, "tasmax", None, None)?;

    assert_eq!(grid.dim(), (2, 2, 2));
    assert_eq!(grid.ncells(), 7);
    assert!(grid.is_masked(0, 1, 1));
    assert_eq!(grid.value(0, 0, 0), 10.0);
    assert_eq!(grid.value(1, 1, 1), 17.0);

    let summary = reduce(&grid)?;
    assert_eq!(summary.ncells, 7);
    assert_eq!(summary.min, 10.0);
    assert_eq!(summary.max, 17.0);

    Ok(())
}

#[test]
fn test_extract_single_timestep() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.nc");
    write_small_file(&path, 10.0);

    let file = open(&path)?;

    // Timestep 2 holds values 14..=17, all valid.
    let grid = extract(&file, "tasmax", Some(2), None)?;
    assert_eq!(grid.dim(), (1, 2, 2));
    assert_eq!(grid.ncells(), 4);
    assert_eq!(grid.compressed(), vec![14.0, 15.0, 16.0, 17.0]);

    // Timestep 1 carries the fill cell.
    let grid = extract(&file, "tasmax", Some(1), None)?;
    assert_eq!(grid.ncells(), 3);

    match extract(&file, "tasmax", Some(3), None) {
        Err(ClimoStatError::TimestepOutOfRange { index: 3, len: 2 }) => {}
        other => panic!("Expected TimestepOutOfRange, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_extract_region_clip() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.nc");
    write_small_file(&path, 10.0);

    let file = open(&path)?;

    // Covers only the lon = -120 column.
    let region = Region::from_wkt("POLYGON((-125 40, -115 40, -115 60, -125 60, -125 40))")?;
    let grid = extract(&file, "tasmax", None, Some(&region))?;

    // 2 timesteps x 2 lats x 1 lon; the fill cell sits outside the clip.
    assert_eq!(grid.ncells(), 4);
    assert_eq!(grid.compressed(), vec![10.0, 12.0, 14.0, 16.0]);

    // A polygon far from the grid masks everything; the reducer refuses it.
    let far = Region::from_wkt("POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))")?;
    let empty = extract(&file, "tasmax", None, Some(&far))?;
    assert_eq!(empty.ncells(), 0);
    match reduce(&empty) {
        Err(ClimoStatError::EmptyRegion) => {}
        other => panic!("Expected EmptyRegion, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_extract_missing_variable_and_bad_shape() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.nc");
    write_small_file(&path, 10.0);

    let file = open(&path)?;

    match extract(&file, "pr", None, None) {
        Err(ClimoStatError::VariableNotFound { var }) => assert_eq!(var, "pr"),
        other => panic!("Expected VariableNotFound, got {:?}", other),
    }

    // The 1-D lat coordinate variable is not a (time, y, x) grid.
    match extract(&file, "lat", None, None) {
        Err(ClimoStatError::GridShape { ndim: 1, .. }) => {}
        other => panic!("Expected GridShape, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_units_lookup() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.nc");
    write_small_file(&path, 10.0);

    let file = open(&path)?;
    assert_eq!(units(&file, "tasmax")?, "K");

    // lat has no units attribute; that is an empty string, not an error.
    assert_eq!(units(&file, "lat")?, "");

    match units(&file, "pr") {
        Err(ClimoStatError::VariableNotFound { var }) => assert_eq!(var, "pr"),
        other => panic!("Expected VariableNotFound, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores = ParallelConfig::all_cores();
    assert!(all_cores.num_threads.unwrap() > 0);

    assert!(default_config.current_threads() > 0);
}
