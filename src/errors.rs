//! Centralized error handling for climostat
//!
//! This module provides structured error types used throughout the crate,
//! enabling better error context and type safety than a generic `Box<dyn Error>`.
//!
//! The taxonomy mirrors the request lifecycle: a dataset identifier that is
//! unknown to the catalog is a *soft* condition surfaced as an empty result
//! map by [`crate::api`], while everything that fails after a dataset was
//! found surfaces as one of these variants.

use std::fmt;

/// Main error type for climostat operations
#[derive(Debug)]
pub enum ClimoStatError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Coordinate variable for a spatial dimension not found in the file
    CoordinateNotFound { dim: String },

    /// Variable does not have the (time, y, x) layout the extractor expects
    GridShape { var: String, ndim: usize },

    /// Requested 1-based timestep is outside the file's time axis
    TimestepOutOfRange { index: usize, len: usize },

    /// The timeset identifier is unknown to the catalog
    TimesetNotFound { timeset: String },

    /// The timeset backing a dataset has no timestamps
    EmptyTimeset,

    /// Malformed WKT region geometry
    InvalidWkt(String),

    /// Every cell was masked after clipping; the reduction is undefined
    EmptyRegion,

    /// Catalog backend failure (not a missing identifier, which is a soft miss)
    CatalogError(String),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Generic error
    Generic(String),
}

impl fmt::Display for ClimoStatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClimoStatError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            ClimoStatError::IoError(e) => write!(f, "I/O error: {}", e),
            ClimoStatError::ArrayError(e) => write!(f, "Array error: {}", e),
            ClimoStatError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            ClimoStatError::CoordinateNotFound { dim } => write!(
                f,
                "Coordinate variable for dimension '{}' not found in file",
                dim
            ),
            ClimoStatError::GridShape { var, ndim } => write!(
                f,
                "Variable '{}' has {} dimensions, expected 3 (time, y, x)",
                var, ndim
            ),
            ClimoStatError::TimestepOutOfRange { index, len } => write!(
                f,
                "Timestep {} is out of range for a time axis of length {}",
                index, len
            ),
            ClimoStatError::TimesetNotFound { timeset } => {
                write!(f, "Timeset '{}' not found in catalog", timeset)
            }
            ClimoStatError::EmptyTimeset => write!(f, "Time axis contains no timestamps"),
            ClimoStatError::InvalidWkt(msg) => write!(f, "Invalid WKT region: {}", msg),
            ClimoStatError::EmptyRegion => write!(
                f,
                "All cells are masked after clipping; statistics are undefined"
            ),
            ClimoStatError::CatalogError(msg) => write!(f, "Catalog error: {}", msg),
            ClimoStatError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            ClimoStatError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ClimoStatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClimoStatError::NetCDFError(e) => Some(e),
            ClimoStatError::IoError(e) => Some(e),
            ClimoStatError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for ClimoStatError {
    fn from(error: netcdf::Error) -> Self {
        ClimoStatError::NetCDFError(error)
    }
}

impl From<std::io::Error> for ClimoStatError {
    fn from(error: std::io::Error) -> Self {
        ClimoStatError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for ClimoStatError {
    fn from(error: ndarray::ShapeError) -> Self {
        ClimoStatError::ArrayError(error)
    }
}

impl From<String> for ClimoStatError {
    fn from(error: String) -> Self {
        ClimoStatError::Generic(error)
    }
}

impl From<&str> for ClimoStatError {
    fn from(error: &str) -> Self {
        ClimoStatError::Generic(error.to_string())
    }
}

/// Result type alias for climostat operations
pub type Result<T> = std::result::Result<T, ClimoStatError>;
