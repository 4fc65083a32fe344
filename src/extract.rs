//! Array extraction from NetCDF files
//!
//! This module turns a (variable, timestep, region) request against an open
//! NetCDF file into a [`MaskedGrid`]: a single timestep or the full time axis,
//! clipped to a polygon, with source fill values masked out.

use crate::errors::{ClimoStatError, Result};
use crate::masked::MaskedGrid;
use crate::region::Region;
use ndarray::Array3;
use netcdf::{AttributeValue, File};

/// Extract a masked (time, y, x) grid for one variable.
///
/// * `timestep`: `None` reads every timestep; `Some(t)` reads the single
///   1-based timestep `t` (the result keeps a unit time axis).
/// * `region`: cells whose centre falls outside the polygon are masked out.
///   `None` keeps the full spatial extent.
///
/// The final mask is the union of "flagged missing in the source" (fill
/// value or non-finite) and "outside the region".
pub fn extract(
    file: &File,
    var_name: &str,
    timestep: Option<usize>,
    region: Option<&Region>,
) -> Result<MaskedGrid> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| ClimoStatError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(ClimoStatError::GridShape {
            var: var_name.to_string(),
            ndim: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let (data_vec, read_nt) = match timestep {
        Some(t) => {
            if t == 0 || t > nt {
                return Err(ClimoStatError::TimestepOutOfRange { index: t, len: nt });
            }
            let values = var.get_values::<f64, _>((t - 1..t, 0..ny, 0..nx))?;
            (values, 1)
        }
        None => {
            let values = var.get_values::<f64, _>(..)?;
            (values, nt)
        }
    };

    let data = Array3::from_shape_vec((read_nt, ny, nx), data_vec)?;

    // Source mask: declared fill value plus non-finite cells.
    let fill_value = fill_value_of(&var)?;
    let mask = data.mapv(|v| !v.is_finite() || fill_value.map_or(false, |fv| v == fv));

    let mut grid = MaskedGrid::new(data, mask)?;

    if let Some(poly) = region {
        let lats = coordinate_values(file, &dims[1].name(), ny)?;
        let lons = coordinate_values(file, &dims[2].name(), nx)?;

        // Precompute one containment decision per spatial cell; it applies to
        // every timestep.
        let mut outside = vec![false; ny * nx];
        for j in 0..ny {
            for i in 0..nx {
                outside[j * nx + i] = !poly.contains(lons[i], lats[j]);
            }
        }
        grid.mask_where(|_, j, i| outside[j * nx + i]);
    }

    Ok(grid)
}

/// Look up the physical units string recorded for a variable.
///
/// A variable without a `units` attribute yields an empty string; a missing
/// variable is an error.
pub fn units(file: &File, var_name: &str) -> Result<String> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| ClimoStatError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    match var.attribute("units") {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(s) => Ok(s),
            other => Err(ClimoStatError::Generic(format!(
                "units attribute of '{}' is not a string: {:?}",
                var_name, other
            ))),
        },
        None => Ok(String::new()),
    }
}

/// Read the declared `_FillValue` (or `missing_value`) of a variable, if any.
fn fill_value_of(var: &netcdf::Variable) -> Result<Option<f64>> {
    for name in ["_FillValue", "missing_value"] {
        if let Some(attr) = var.attribute(name) {
            let fv = match attr.value()? {
                AttributeValue::Float(v) => Some(v as f64),
                AttributeValue::Double(v) => Some(v),
                AttributeValue::Int(v) => Some(v as f64),
                AttributeValue::Short(v) => Some(v as f64),
                _ => None,
            };
            if fv.is_some() {
                return Ok(fv);
            }
        }
    }
    Ok(None)
}

/// Read the 1D coordinate variable named after a spatial dimension.
fn coordinate_values(file: &File, dim_name: &str, expected_len: usize) -> Result<Vec<f64>> {
    let var = file
        .variable(dim_name)
        .ok_or_else(|| ClimoStatError::CoordinateNotFound {
            dim: dim_name.to_string(),
        })?;

    let values = var.get_values::<f64, _>(..)?;
    if values.len() != expected_len {
        return Err(ClimoStatError::Generic(format!(
            "Coordinate variable '{}' has {} values, expected {}",
            dim_name,
            values.len(),
            expected_len
        )));
    }

    Ok(values)
}
