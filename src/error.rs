use thiserror::Error;

/// Every way the difference engine can reject its input.
///
/// All of these are deterministic caller errors: the same input always yields
/// the same error, so nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    /// The two rasters handed to `compare` do not share width and height.
    #[error("second image {second:?} does not match dimensions of first image {first:?}")]
    DimensionMismatch { first: (u32, u32), second: (u32, u32) },

    /// A tunable was outside its accepted range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A raster view was built over a byte buffer that cannot hold it.
    #[error("invalid raster: {0}")]
    InvalidRaster(String),
}

pub type Result<T> = std::result::Result<T, DiffError>;
