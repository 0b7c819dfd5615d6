// THEORY:
// The `geometry` module holds the two "dumb" data containers that flow through
// the difference engine.
//
// 1.  **Coordinate**: a single differing pixel. Produced once by the scanner and
//     consumed by the clusterer. Its ordering is row-major (`y`, then `x`), so a
//     plain sort puts points back into scan order.
// 2.  **Rectangle**: the bounding box of one cluster, using inclusive top-left plus
//     width/height semantics. A rectangle at (x, y) with size (w, h) covers columns
//     `x..=x+w-1` and rows `y..=y+h-1`. Width and height are never zero.
//
// The rectangle knows how to measure and combine itself (`intersects`, `is_within`,
// `union`, `inflate`), but it has no notion of clusters.

use std::cmp::Ordering;

/// The location of a single differing pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// Leftmost covered column.
    pub x: u32,
    /// Topmost covered row.
    pub y: u32,
    /// Number of covered columns, at least 1.
    pub width: u32,
    /// Number of covered rows, at least 1.
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        debug_assert!(width >= 1 && height >= 1, "rectangle must cover at least one pixel");
        Self { x, y, width, height }
    }

    /// Builds the rectangle spanning two inclusive corners.
    pub fn from_corners(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self::new(left, top, right - left + 1, bottom - top + 1)
    }

    /// The 1x1 rectangle covering exactly one coordinate.
    pub fn unit(coordinate: Coordinate) -> Self {
        Self::new(coordinate.x, coordinate.y, 1, 1)
    }

    /// Inclusive last column.
    pub fn right(&self) -> u32 {
        self.x + self.width - 1
    }

    /// Inclusive last row.
    pub fn bottom(&self) -> u32 {
        self.y + self.height - 1
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// True when the per-axis gap to `other` is at most `threshold` pixels.
    /// Equivalent to `self.inflate(threshold).intersects(other)`, but cannot
    /// overflow for thresholds near `u32::MAX`.
    pub fn is_within(&self, other: &Rectangle, threshold: u32) -> bool {
        other.x <= self.right().saturating_add(threshold)
            && self.x <= other.right().saturating_add(threshold)
            && other.y <= self.bottom().saturating_add(threshold)
            && self.y <= other.bottom().saturating_add(threshold)
    }

    /// The tightest rectangle covering both inputs.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grows the rectangle by `amount` on every side. The left and top edges stop
    /// at zero; the right and bottom edges always grow by the full amount.
    pub fn inflate(&self, amount: u32) -> Rectangle {
        Rectangle::from_corners(
            self.x.saturating_sub(amount),
            self.y.saturating_sub(amount),
            self.right().saturating_add(amount),
            self.bottom().saturating_add(amount),
        )
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.x..=self.right()).contains(&coordinate.x)
            && (self.y..=self.bottom()).contains(&coordinate.y)
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.x, self.y),
            Coordinate::new(self.right(), self.y),
            Coordinate::new(self.right(), self.bottom()),
            Coordinate::new(self.x, self.bottom()),
        ]
    }
}
