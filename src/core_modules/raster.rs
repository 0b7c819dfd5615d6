// THEORY:
// `RasterBuffer` is a borrowed, read-only view over 3-byte-per-pixel image data.
// It is the bridge between whatever decoded the image (the `image` crate, a
// screenshot API, a test fixture) and the scanner.
//
// Key principles:
// 1.  **No Ownership**: the view never copies or mutates pixel data. The caller keeps
//     the bytes alive and unchanged for as long as a scan runs.
// 2.  **Validated Once**: stride and length are checked at construction, so every
//     row slice taken afterwards is in bounds.
// 3.  **Padding Is Invisible**: `row` hands out only the `width * 3` meaningful bytes
//     of a row. Stride padding never takes part in a comparison.

use crate::error::{DiffError, Result};
use image::RgbImage;

pub const BYTES_PER_PIXEL: usize = 3;

/// A read-only 24-bit raster laid out row-major, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct RasterBuffer<'a> {
    width: u32,
    height: u32,
    /// Bytes between the starts of two consecutive rows.
    stride: usize,
    data: &'a [u8],
}

impl<'a> RasterBuffer<'a> {
    pub fn new(width: u32, height: u32, stride: usize, data: &'a [u8]) -> Result<Self> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        if stride < row_bytes {
            return Err(DiffError::InvalidRaster(format!(
                "stride {stride} is smaller than {row_bytes} bytes needed for {width} pixels"
            )));
        }

        // The final row may omit its trailing padding.
        let required = match height {
            0 => 0,
            rows => (rows as usize - 1) * stride + row_bytes,
        };
        if data.len() < required {
            return Err(DiffError::InvalidRaster(format!(
                "buffer holds {} bytes but a {width}x{height} raster with stride {stride} needs {required}",
                data.len()
            )));
        }

        Ok(Self { width, height, stride, data })
    }

    /// A raster whose rows are tightly packed (`stride == width * 3`).
    pub fn packed(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        Self::new(width, height, width as usize * BYTES_PER_PIXEL, data)
    }

    pub fn from_rgb_image(image: &'a RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            data: image.as_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The meaningful bytes of row `y`, without stride padding.
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = x as usize * BYTES_PER_PIXEL;
        let row = self.row(y);
        [row[offset], row[offset + 1], row[offset + 2]]
    }

    /// True when both views describe the very same memory with the same geometry.
    /// Equal contents in different allocations do not count.
    pub fn is_same_buffer(&self, other: &RasterBuffer<'_>) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
            && self.data.len() == other.data.len()
            && self.stride == other.stride
            && self.dimensions() == other.dimensions()
    }
}

impl<'a> From<&'a RgbImage> for RasterBuffer<'a> {
    fn from(image: &'a RgbImage) -> Self {
        RasterBuffer::from_rgb_image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_stride_narrower_than_row() {
        let data = vec![0u8; 64];
        let result = RasterBuffer::new(4, 2, 11, &data);
        assert!(matches!(result, Err(DiffError::InvalidRaster(_))));
    }

    #[test]
    fn rejects_short_buffer() {
        let data = vec![0u8; 11];
        let result = RasterBuffer::packed(2, 2, &data);
        assert!(matches!(result, Err(DiffError::InvalidRaster(_))));
    }

    #[test]
    fn last_row_may_skip_padding() {
        // Two rows of 2 pixels, stride 8: 8 + 6 bytes is enough.
        let data = vec![0u8; 14];
        assert!(RasterBuffer::new(2, 2, 8, &data).is_ok());
    }

    #[test]
    fn row_excludes_padding() {
        let data: Vec<u8> = (0..16).collect();
        let raster = RasterBuffer::new(2, 2, 8, &data).unwrap();
        assert_eq!(raster.row(0), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(raster.row(1), &[8, 9, 10, 11, 12, 13]);
        assert_eq!(raster.pixel(1, 1), [11, 12, 13]);
    }

    #[test]
    fn wraps_rgb_image_without_copying() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(2, 1, image::Rgb([10, 20, 30]));
        let raster = RasterBuffer::from(&image);
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.stride(), 9);
        assert_eq!(raster.pixel(2, 1), [10, 20, 30]);
        assert!(raster.is_same_buffer(&RasterBuffer::from(&image)));
    }

    #[test]
    fn equal_contents_are_not_the_same_buffer() {
        let first = vec![0u8; 12];
        let second = vec![0u8; 12];
        let a = RasterBuffer::packed(2, 2, &first).unwrap();
        let b = RasterBuffer::packed(2, 2, &second).unwrap();
        assert!(!a.is_same_buffer(&b));
        assert!(a.is_same_buffer(&a));
    }
}
