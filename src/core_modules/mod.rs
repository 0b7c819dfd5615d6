pub mod diff_scanner;
pub mod geometry;
pub mod raster;
pub mod spatial_clusterer;
