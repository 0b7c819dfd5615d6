// THEORY:
// The `diff_scanner` is the first stage of the difference engine. It answers a
// single question: which pixels changed between two rasters of equal size?
//
// Key architectural principles:
// 1.  **Exact Matching**: a pixel differs when any of its three bytes differ. There
//     is no tolerance or perceptual model. Comparisons never read past the three
//     bytes of a pixel, so stride padding and neighbouring pixels cannot leak into
//     the result.
// 2.  **Scan Order Output**: pixels are visited row by row (y outer, x inner), so the
//     output is already sorted row-major.
// 3.  **Cheap Happy Paths**: identical buffers are answered without scanning, and
//     rows whose meaningful bytes are equal are skipped with one slice comparison.
// 4.  **Stateless Utility**: `compare` keeps nothing between calls, so independent
//     scans can run on different threads without coordination.

use crate::core_modules::geometry::Coordinate;
use crate::core_modules::raster::{BYTES_PER_PIXEL, RasterBuffer};
use crate::error::{DiffError, Result};

const MIN_DIFFERENCE_CAPACITY: usize = 4;

/// Tunables for the difference scan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareOptions {
    /// The percentage of pixels expected to differ. Only sizes the output
    /// allocation; it never changes which coordinates are reported.
    /// Values above 100 are rejected, negative values fall back to the minimum.
    pub assumed_difference_percentage: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { assumed_difference_percentage: 1.0 }
    }
}

impl CompareOptions {
    pub fn new(assumed_difference_percentage: f64) -> Self {
        Self { assumed_difference_percentage }
    }

    pub fn validate(&self) -> Result<()> {
        let percentage = self.assumed_difference_percentage;
        if percentage.is_nan() || percentage > 100.0 {
            return Err(DiffError::InvalidOption(format!(
                "assumed difference percentage must be at most 100 (was: {percentage})"
            )));
        }
        Ok(())
    }

    /// Initial capacity for the difference list of a `width` x `height` scan:
    /// `max(4, floor(width * height * percentage / 100))`.
    pub fn expected_capacity(&self, width: u32, height: u32) -> usize {
        let percentage = self.assumed_difference_percentage;
        if !percentage.is_finite() || percentage <= 0.0 {
            return MIN_DIFFERENCE_CAPACITY;
        }
        let pixels = width as f64 * height as f64;
        let desired = (pixels * percentage / 100.0).floor() as usize;
        desired.max(MIN_DIFFERENCE_CAPACITY)
    }
}

pub mod diff_scanner {
    use super::*;

    /// Lists every coordinate where `first` and `second` hold different pixel
    /// values, in row-major order.
    pub fn compare(
        first: &RasterBuffer<'_>,
        second: &RasterBuffer<'_>,
        options: &CompareOptions,
    ) -> Result<Vec<Coordinate>> {
        if first.is_same_buffer(second) {
            log::debug!("compare: both rasters share one buffer, skipping scan");
            return Ok(Vec::new());
        }

        if first.dimensions() != second.dimensions() {
            return Err(DiffError::DimensionMismatch {
                first: first.dimensions(),
                second: second.dimensions(),
            });
        }

        options.validate()?;

        let (width, height) = first.dimensions();
        let mut differences = Vec::with_capacity(options.expected_capacity(width, height));

        for y in 0..height {
            let first_row = first.row(y);
            let second_row = second.row(y);
            if first_row == second_row {
                continue;
            }

            let pixels = first_row
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(second_row.chunks_exact(BYTES_PER_PIXEL));
            for (x, (a, b)) in pixels.enumerate() {
                if a != b {
                    differences.push(Coordinate::new(x as u32, y));
                }
            }
        }

        log::debug!(
            "compare: scanned {}x{} raster, {} differing pixels",
            width,
            height,
            differences.len()
        );
        Ok(differences)
    }
}
