//! Defines command-line interface options using `clap` for the climostat binary.

use clap::Parser;
use std::path::PathBuf;

/// A CLI tool for summarizing gridded NetCDF climate output
#[derive(Parser, Debug)]
#[command(
    version,
    name = "climostat",
    about = "Regional summary statistics for NetCDF climate model output"
)]
pub struct Args {
    /// Path to the NetCDF file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Short name of the variable to summarize
    #[arg(short = 'V', long)]
    pub variable: Option<String>,

    /// 1-based timestep to select; 0 or absent averages across all timesteps
    #[arg(short = 's', long, default_value_t = 0)]
    pub timestep: usize,

    /// WKT POLYGON clipping the grid to a region, e.g. "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0))"
    #[arg(short, long)]
    pub area: Option<String>,

    /// Number of threads for parallel processing. Defaults to Rayon's choice.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// List all variables in the NetCDF file instead of computing statistics
    #[arg(long)]
    pub list_vars: bool,
}

impl Args {
    /// Timestep selector with the CLI's zero sentinel mapped to `None`.
    pub fn timestep_selector(&self) -> Option<usize> {
        if self.timestep == 0 {
            None
        } else {
            Some(self.timestep)
        }
    }
}
