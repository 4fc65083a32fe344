//! climostat: regional summary statistics over gridded climate model output
//!
//! A Rust library for computing summary statistics (mean, median, standard
//! deviation, min, max, valid-cell count) over a spatial and temporal subset
//! of NetCDF climate model output, and for resolving metadata about the model
//! run that produced a dataset.
//!
//! ## Key Features
//!
//! - **Masked extraction**: fill-value-aware reads of (time, y, x) grids,
//!   clipped to a WKT polygon region
//! - **Robust reductions**: min/max/mean/median/population-stdev over the
//!   unmasked cells only, with an explicit error for an empty clip
//! - **Temporal resolution**: exact timestep lookup or calendar midpoint of a
//!   whole time axis, reported as ISO-8601 UTC
//! - **Catalog-driven API**: per-file and multi-file statistics keyed by
//!   dataset identifier, with a soft-miss contract for unknown identifiers
//! - **Parallel fan-out**: independent datasets evaluated with Rayon
//!
//! ## Module Organization
//!
//! - [`api`]: the request surface (`stats_for`, `multi_stats`, `metadata_for`)
//! - [`catalog`]: the dataset catalog trait and an in-memory implementation
//! - [`extract`]: masked array extraction from NetCDF files
//! - [`stats`]: summary-statistic reduction over a masked grid
//! - [`temporal`]: representative-timestamp resolution
//! - [`region`]: WKT polygon parsing and point-in-polygon testing
//! - [`masked`]: the masked 3D grid type
//! - [`parallel`]: Rayon thread pool configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use climostat::prelude::*;
//!
//! let mut catalog = MemoryCatalog::new();
//! // ... register datasets and timesets ...
//!
//! // Statistics for one dataset, all timesteps, clipped to a polygon.
//! let area = "POLYGON((-130 45, -110 45, -110 60, -130 60, -130 45))";
//! let results = climostat::api::stats_for(
//!     &catalog,
//!     "tasmax_monClim_CGCM3_historical_run1",
//!     None,
//!     Some(area),
//!     "tasmax",
//! ).unwrap();
//!
//! for (id, record) in &results {
//!     println!("{}: mean {} {} at {}", id, record.mean, record.units, record.time);
//! }
//! ```

// Core modules
pub mod api;
pub mod catalog;
pub mod errors;
pub mod extract;
pub mod masked;
pub mod parallel;
pub mod region;
pub mod stats;
pub mod temporal;

// Direct re-exports for the public API
pub use api::{FileMetadata, StatsResult};
pub use catalog::{Catalog, Dataset, MemoryCatalog, VariableInfo};
pub use errors::{ClimoStatError, Result};
pub use masked::MaskedGrid;
pub use region::Region;
pub use stats::GridSummary;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::api::{metadata_for, multi_stats, stats_for, FileMetadata, StatsResult};
    pub use crate::catalog::{Catalog, Dataset, MemoryCatalog, VariableInfo};
    pub use crate::errors::{ClimoStatError, Result};
    pub use crate::masked::MaskedGrid;
    pub use crate::parallel::ParallelConfig;
    pub use crate::region::Region;
    pub use crate::stats::GridSummary;
}
