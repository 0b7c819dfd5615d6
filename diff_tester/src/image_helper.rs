// THEORY:
// `image_helper` is the file-format boundary of the tester. The difference engine
// only understands 3-byte rasters, so everything that touches encoded files or
// draws on pixels lives here:
// 1.  **Loading**: any format the `image` crate decodes, converted to RGB8.
// 2.  **Annotation**: both inputs placed side by side with every changed region
//     outlined in red on each half.
// 3.  **Saving**: PNG output through the `image` encoder.

use anyhow::{Context, Result};
use bitmap_diff::Rectangle;
use image::{GenericImage, ImageEncoder, Rgb, RgbImage};
use std::path::Path;

const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const OUTLINE_WIDTH: u32 = 2;

pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "failed to load {}. Please ensure the file exists and is readable",
            path.display()
        )
    })?;
    Ok(image.to_rgb8())
}

pub fn save_png(path: &Path, image: &RgbImage) -> Result<()> {
    let output = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), image::ExtendedColorType::Rgb8)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    Ok(())
}

/// Builds a `2w x h` canvas with `original` on the left and `changed` on the
/// right, outlining each region (grown by one pixel) on both halves.
pub fn annotate(original: &RgbImage, changed: &RgbImage, regions: &[Rectangle]) -> Result<RgbImage> {
    let (width, height) = original.dimensions();
    let mut canvas = RgbImage::new(width * 2, height);
    canvas.copy_from(original, 0, 0).context("failed to place original image")?;
    canvas.copy_from(changed, width, 0).context("failed to place changed image")?;

    for region in regions {
        let outline = region.inflate(1);
        draw_outline(&mut canvas, &outline, 0, width);
        draw_outline(&mut canvas, &outline, width, width);
    }
    Ok(canvas)
}

/// Strokes `rect` onto the half of `canvas` starting at column `offset_x`.
/// Pixels falling outside that half are clipped.
fn draw_outline(canvas: &mut RgbImage, rect: &Rectangle, offset_x: u32, half_width: u32) {
    let height = canvas.height();
    let mut plot = |x: u32, y: u32| {
        if x < half_width && y < height {
            canvas.put_pixel(offset_x + x, y, OUTLINE_COLOR);
        }
    };

    for stroke in 0..OUTLINE_WIDTH {
        for x in rect.x..=rect.right() {
            plot(x, rect.y + stroke);
            if let Some(y) = rect.bottom().checked_sub(stroke) {
                plot(x, y);
            }
        }
        for y in rect.y..=rect.bottom() {
            plot(rect.x + stroke, y);
            if let Some(x) = rect.right().checked_sub(stroke) {
                plot(x, y);
            }
        }
    }
}
