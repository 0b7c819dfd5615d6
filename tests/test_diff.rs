// tests/test_diff.rs -- Integration tests for the scan and clustering stages.
//
// These go through the public API only, the same way an external
// visual-regression tool would drive the crate.

use bitmap_diff::{
    ClusterOptions, CompareOptions, Coordinate, DiffError, RasterBuffer, Rectangle, cluster,
    compare,
};
use image::{Rgb, RgbImage};

fn coords(points: &[(u32, u32)]) -> Vec<Coordinate> {
    points.iter().copied().map(Coordinate::from).collect()
}

fn normalized(mut rects: Vec<Rectangle>) -> Vec<Rectangle> {
    rects.sort_by_key(|r| (r.y, r.x, r.width, r.height));
    rects
}

fn compare_images(first: &RgbImage, second: &RgbImage, options: &CompareOptions) -> bitmap_diff::Result<Vec<Coordinate>> {
    compare(&RasterBuffer::from(first), &RasterBuffer::from(second), options)
}

// ===== Scanner: contract checks =====

#[test]
fn different_width_is_rejected() {
    let original = RgbImage::new(5, 5);
    let changed = RgbImage::new(6, 5);
    let result = compare_images(&original, &changed, &CompareOptions::default());
    assert_eq!(
        result,
        Err(DiffError::DimensionMismatch { first: (5, 5), second: (6, 5) })
    );
}

#[test]
fn different_height_is_rejected() {
    let original = RgbImage::new(5, 5);
    let changed = RgbImage::new(5, 6);
    let result = compare_images(&original, &changed, &CompareOptions::default());
    assert!(matches!(result, Err(DiffError::DimensionMismatch { .. })));
}

#[test]
fn negative_assumed_percentage_is_accepted() {
    let original = RgbImage::new(5, 5);
    let changed = RgbImage::new(5, 5);
    let result = compare_images(&original, &changed, &CompareOptions::new(-0.1));
    assert_eq!(result, Ok(Vec::new()));
}

#[test]
fn assumed_percentage_above_hundred_is_rejected() {
    let original = RgbImage::new(5, 5);
    let changed = RgbImage::new(5, 5);
    let result = compare_images(&original, &changed, &CompareOptions::new(100.1));
    assert!(matches!(result, Err(DiffError::InvalidOption(_))));
    assert!(compare_images(&original, &changed, &CompareOptions::new(100.0)).is_ok());
}

#[test]
fn equal_images_have_no_differences() {
    let original = RgbImage::new(5, 5);
    let changed = RgbImage::new(5, 5);
    assert!(compare_images(&original, &changed, &CompareOptions::default()).unwrap().is_empty());
}

#[test]
fn same_buffer_returns_empty_for_any_options() {
    let mut image = RgbImage::new(4, 3);
    image.put_pixel(1, 1, Rgb([1, 2, 3]));
    let raster = RasterBuffer::from(&image);
    for percentage in [-5.0, 1.0, 100.0, 150.0] {
        let result = compare(&raster, &raster, &CompareOptions::new(percentage));
        assert_eq!(result, Ok(Vec::new()), "percentage {percentage}");
    }
}

// ===== Scanner: exactness =====

#[test]
fn single_changed_pixel_is_reported_at_every_corner() {
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let original = RgbImage::new(2, 2);
        let mut changed = RgbImage::new(2, 2);
        changed.put_pixel(x, y, Rgb([0, 255, 255]));
        let result = compare_images(&original, &changed, &CompareOptions::default()).unwrap();
        assert_eq!(result, vec![Coordinate::new(x, y)], "changed pixel at ({x}, {y})");
    }
}

#[test]
fn a_single_channel_change_counts() {
    let original = RgbImage::from_pixel(3, 1, Rgb([10, 10, 10]));
    for channel in 0..3 {
        let mut changed = original.clone();
        changed.get_pixel_mut(2, 0).0[channel] = 11;
        let result = compare_images(&original, &changed, &CompareOptions::default()).unwrap();
        assert_eq!(result, vec![Coordinate::new(2, 0)], "channel {channel}");
    }
}

#[test]
fn strided_rasters_compare_only_pixel_bytes() {
    // Same 2x2 picture, stored with different garbage in 2 padding bytes per row.
    let first = [1, 1, 1, 2, 2, 2, 0, 0, 3, 3, 3, 4, 4, 4, 0, 0];
    let second = [1, 1, 1, 2, 2, 2, 9, 9, 3, 3, 3, 5, 4, 4, 7, 7];
    let a = RasterBuffer::new(2, 2, 8, &first).unwrap();
    let b = RasterBuffer::new(2, 2, 8, &second).unwrap();
    let result = compare(&a, &b, &CompareOptions::default()).unwrap();
    assert_eq!(result, vec![Coordinate::new(1, 1)]);
}

// ===== Clusterer =====

#[test]
fn empty_input_gives_no_regions() {
    for threshold in [0, 1, 10] {
        assert!(cluster(&[], &ClusterOptions::new(threshold)).is_empty());
    }
}

#[test]
fn two_separate_points_stay_apart() {
    let result = cluster(&coords(&[(1, 1), (3, 3)]), &ClusterOptions::new(1));
    assert_eq!(
        normalized(result),
        vec![Rectangle::new(1, 1, 1, 1), Rectangle::new(3, 3, 1, 1)]
    );
}

#[test]
fn two_adjacent_points_merge() {
    let result = cluster(&coords(&[(1, 1), (2, 2)]), &ClusterOptions::new(1));
    assert_eq!(result, vec![Rectangle::new(1, 1, 2, 2)]);
}

#[test]
fn points_within_threshold_merge() {
    let result = cluster(&coords(&[(1, 1), (3, 3)]), &ClusterOptions::new(2));
    assert_eq!(result, vec![Rectangle::new(1, 1, 3, 3)]);
}

#[test]
fn two_clusters_within_their_own_threshold() {
    let points = coords(&[(1, 1), (3, 3), (6, 6), (6, 7)]);
    let result = cluster(&points, &ClusterOptions::new(2));
    assert_eq!(
        normalized(result),
        vec![Rectangle::new(1, 1, 3, 3), Rectangle::new(6, 6, 1, 2)]
    );
}

#[test]
fn three_points_chain_into_one_cluster() {
    let points = coords(&[(1, 1), (5, 2), (3, 3)]);
    let result = cluster(&points, &ClusterOptions::new(2));
    assert_eq!(result, vec![Rectangle::new(1, 1, 5, 3)]);
}

#[test]
fn diagonal_chain_back_merges_earlier_cluster() {
    let points = coords(&[(5, 1), (4, 2), (3, 3), (2, 4), (1, 5), (1, 2)]);
    let result = cluster(&points, &ClusterOptions::new(1));
    assert_eq!(result, vec![Rectangle::new(1, 1, 5, 5)]);
}

#[test]
fn reclustering_corners_reproduces_regions() {
    let points = coords(&[
        (1, 1), (3, 3), (6, 6), (6, 7), (20, 2), (22, 2), (30, 30), (12, 40), (13, 41),
    ]);
    let options = ClusterOptions::new(2);
    let regions = normalized(cluster(&points, &options));

    let corners: Vec<Coordinate> = regions.iter().flat_map(|r| r.corners()).collect();
    let again = normalized(cluster(&corners, &options));
    assert_eq!(again, regions);
}

// ===== End to end =====

/// Deterministic xorshift scatter of 120 changed pixels.
fn scattered_change(width: u32, height: u32) -> (RgbImage, RgbImage) {
    let original = RgbImage::from_pixel(width, height, Rgb([200, 200, 200]));
    let mut changed = original.clone();
    let mut state = 0x2545_f491_u32;
    for _ in 0..120 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let x = state % width;
        let y = (state / width) % height;
        changed.put_pixel(x, y, Rgb([255, 0, 0]));
    }
    (original, changed)
}

#[test]
fn regions_cover_every_difference_and_stay_separated() {
    let (original, changed) = scattered_change(64, 48);
    let differences = compare_images(&original, &changed, &CompareOptions::default()).unwrap();
    assert!(!differences.is_empty());

    let threshold = 3;
    let regions = cluster(&differences, &ClusterOptions::new(threshold));

    for point in &differences {
        let owners = regions.iter().filter(|r| r.contains(*point)).count();
        assert_eq!(owners, 1, "{point:?} must belong to exactly one region");
    }

    for (i, a) in regions.iter().enumerate() {
        for b in regions.iter().skip(i + 1) {
            assert!(
                !a.is_within(b, threshold),
                "{a:?} and {b:?} are still within the threshold"
            );
        }
    }

    // Each region is tight: every edge touches at least one difference.
    for region in &regions {
        let members: Vec<_> = differences.iter().filter(|p| region.contains(**p)).collect();
        assert!(members.iter().any(|p| p.x == region.x));
        assert!(members.iter().any(|p| p.x == region.right()));
        assert!(members.iter().any(|p| p.y == region.y));
        assert!(members.iter().any(|p| p.y == region.bottom()));
    }
}
