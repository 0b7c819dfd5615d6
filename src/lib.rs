// THEORY:
// This file is the main entry point for the `bitmap_diff` library crate.
// It defines the public API exposed to external consumers (visual-regression
// tools, the `diff_tester` binary, benchmarks).
//
// The engine is two pure, stateless stages used in sequence:
// 1.  **Difference Scanning** (`diff_scanner`): walks two equally-sized 3-byte
//     rasters and emits every coordinate whose pixel bytes differ.
// 2.  **Spatial Clustering** (`spatial_clusterer`): folds those coordinates into
//     a minimal set of bounding rectangles under a distance threshold.
//
// `DiffPipeline` chains both stages and times them. Everything to do with image
// files, drawing and command-line handling lives outside this crate.

pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use core_modules::diff_scanner::{CompareOptions, diff_scanner::compare};
pub use core_modules::geometry::{Coordinate, Rectangle};
pub use core_modules::raster::RasterBuffer;
pub use core_modules::spatial_clusterer::{ClusterOptions, spatial_clusterer::cluster};
pub use error::{DiffError, Result};
pub use pipeline::{DiffConfig, DiffPipeline, DiffReport};
