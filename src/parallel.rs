//! Parallel processing configuration
//!
//! The multi-file fan-out in [`crate::api::multi_stats`] runs on Rayon's
//! global thread pool. This module lets the front end size that pool.

use crate::errors::{ClimoStatError, Result};
use rayon::ThreadPoolBuilder;

/// Configuration for the global Rayon thread pool.
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration. `None` keeps Rayon's default.
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Configuration that uses all available CPU cores.
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    /// Configuration that uses a specific number of threads.
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Set up the global Rayon thread pool with this configuration.
    ///
    /// The global pool can only be built once per process; call this before
    /// the first parallel operation.
    pub fn setup_global_pool(&self) -> Result<()> {
        if let Some(num_threads) = self.num_threads {
            ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    ClimoStatError::ThreadPoolError(format!(
                        "Failed to initialize thread pool with {} threads: {}",
                        num_threads, e
                    ))
                })?;
        }
        Ok(())
    }

    /// Number of threads the pool is currently using.
    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }
}
