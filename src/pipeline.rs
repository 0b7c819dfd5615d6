// THEORY:
// The `pipeline` module is the top-level API of the difference engine. It chains
// the scanner and the clusterer behind one call and records how long each stage
// took, which is what a visual-regression tool or a benchmark driver wants.

use crate::core_modules::diff_scanner::diff_scanner;
use crate::core_modules::spatial_clusterer::spatial_clusterer;
use crate::error::Result;
use std::time::{Duration, Instant};

// Re-export key data structures for the public API.
pub use crate::core_modules::diff_scanner::CompareOptions;
pub use crate::core_modules::geometry::{Coordinate, Rectangle};
pub use crate::core_modules::raster::RasterBuffer;
pub use crate::core_modules::spatial_clusterer::ClusterOptions;

/// Configuration for the DiffPipeline, one section per stage.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffConfig {
    pub compare: CompareOptions,
    pub cluster: ClusterOptions,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiffReport {
    /// Differing coordinates in row-major order.
    pub differences: Vec<Coordinate>,
    /// Bounding rectangles of the clustered differences, in no particular order.
    pub regions: Vec<Rectangle>,
    pub compare_elapsed: Duration,
    pub cluster_elapsed: Duration,
}

impl DiffReport {
    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }

    pub fn difference_count(&self) -> usize {
        self.differences.len()
    }
}

/// Runs the scan and the clustering stage back to back.
#[derive(Debug, Clone, Default)]
pub struct DiffPipeline {
    config: DiffConfig,
}

impl DiffPipeline {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, first: &RasterBuffer<'_>, second: &RasterBuffer<'_>) -> Result<DiffReport> {
        // Stage 1: pixel scan
        let started = Instant::now();
        let differences = diff_scanner::compare(first, second, &self.config.compare)?;
        let compare_elapsed = started.elapsed();

        // Stage 2: spatial grouping
        let started = Instant::now();
        let regions = spatial_clusterer::cluster(&differences, &self.config.cluster);
        let cluster_elapsed = started.elapsed();

        log::info!(
            "diffed {}x{} in {:?}: {} differences, {} regions clustered in {:?}",
            first.width(),
            first.height(),
            compare_elapsed,
            differences.len(),
            regions.len(),
            cluster_elapsed
        );

        Ok(DiffReport {
            differences,
            regions,
            compare_elapsed,
            cluster_elapsed,
        })
    }
}
