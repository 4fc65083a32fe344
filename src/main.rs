//! Entry point for the climostat binary.
//! Opens one NetCDF file and prints a summary-statistics record as JSON, or
//! lists the file's variables.

use clap::Parser;

mod cli;

use cli::Args;
use climostat::errors::Result;
use climostat::parallel::ParallelConfig;
use climostat::region::Region;
use climostat::{extract, stats};

fn main() -> Result<()> {
    let args = Args::parse();

    ParallelConfig::new(args.threads).setup_global_pool()?;

    let file = netcdf::open(&args.file)?;

    if args.list_vars {
        list_variables(&args, &file);
        return Ok(());
    }

    let variable = args
        .variable
        .as_deref()
        .ok_or("Either --variable or --list-vars is required")?;

    let region = args.area.as_deref().map(Region::from_wkt).transpose()?;

    let grid = extract::extract(&file, variable, args.timestep_selector(), region.as_ref())?;
    let summary = stats::reduce(&grid)?;
    let units = extract::units(&file, variable)?;

    let record = serde_json::json!({
        "variable": variable,
        "units": units,
        "stats": summary,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?
    );

    Ok(())
}

fn list_variables(args: &Args, file: &netcdf::File) {
    println!("Variables in {}:", args.file.display());
    for var in file.variables() {
        let dims: Vec<String> = var
            .dimensions()
            .iter()
            .map(|d| format!("{}[{}]", d.name(), d.len()))
            .collect();
        println!("- {} ({})", var.name(), dims.join(", "));
    }
}
