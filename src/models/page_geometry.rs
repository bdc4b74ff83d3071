//! Page-space geometry primitives.
//!
//! All coordinates are PDF points at 100% zoom. Screen pixels never reach
//! these types; `services::geometry` converts them first.

use serde::{Deserialize, Serialize};

/// A location on a page in page-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the page's left edge
    pub x: f64,
    /// Vertical offset from the page's top edge
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Origin-plus-extent rectangle produced while a drag gesture is live.
///
/// Width and height are never negative when built by
/// [`rectangle_from_points`](crate::services::geometry::rectangle_from_points).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rectangle {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts the rectangle into a corner-based [`Area`].
    #[must_use]
    pub fn to_area(&self) -> Area {
        Area::from_edges(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Crop region of a page, stored as top-left / bottom-right corners.
///
/// # Invariant
///
/// `x1 <= x2` and `y1 <= y2`. Every constructor normalizes its input with
/// min/max, and the fields are private so the invariant cannot be broken
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Area {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// One side of an [`Area`], used for numeric edge editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaEdge {
    /// `y1`
    Top,
    /// `x1`
    Left,
    /// `y2`
    Bottom,
    /// `x2`
    Right,
}

impl Area {
    /// Builds an area from two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::from_edges(a.x, a.y, b.x, b.y)
    }

    /// Builds an area from edge values, swapping them if they are inverted.
    #[must_use]
    pub fn from_edges(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn x1(&self) -> f64 {
        self.x1
    }

    /// Top edge.
    #[must_use]
    pub const fn y1(&self) -> f64 {
        self.y1
    }

    /// Right edge.
    #[must_use]
    pub const fn x2(&self) -> f64 {
        self.x2
    }

    /// Bottom edge.
    #[must_use]
    pub const fn y2(&self) -> f64 {
        self.y2
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns the value of a single edge.
    #[must_use]
    pub const fn edge(&self, edge: AreaEdge) -> f64 {
        match edge {
            AreaEdge::Top => self.y1,
            AreaEdge::Left => self.x1,
            AreaEdge::Bottom => self.y2,
            AreaEdge::Right => self.x2,
        }
    }

    /// Returns a copy with one edge moved, re-normalized so the invariant holds.
    ///
    /// Dragging the left edge past the right edge swaps them rather than
    /// producing a negative width.
    #[must_use]
    pub fn with_edge(&self, edge: AreaEdge, value: f64) -> Self {
        let (mut x1, mut y1, mut x2, mut y2) = (self.x1, self.y1, self.x2, self.y2);
        match edge {
            AreaEdge::Top => y1 = value,
            AreaEdge::Left => x1 = value,
            AreaEdge::Bottom => y2 = value,
            AreaEdge::Right => x2 = value,
        }
        Self::from_edges(x1, y1, x2, y2)
    }

    /// Converts back to an origin-plus-extent rectangle.
    #[must_use]
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(self.x1, self.y1, self.width(), self.height())
    }

    /// Checks whether an x-coordinate lies within the horizontal span (inclusive).
    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x1 && x <= self.x2
    }

    /// Rounds every edge to the nearest integer.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::from_edges(
            self.x1.round(),
            self.y1.round(),
            self.x2.round(),
            self.y2.round(),
        )
    }

    /// Row-major `[y1, x1, y2, x2]` array used by the interchange document.
    #[must_use]
    pub const fn to_row_major(&self) -> [f64; 4] {
        [self.y1, self.x1, self.y2, self.x2]
    }

    /// Builds an area from a row-major `[y1, x1, y2, x2]` array.
    #[must_use]
    pub fn from_row_major(values: [f64; 4]) -> Self {
        let [y1, x1, y2, x2] = values;
        Self::from_edges(x1, y1, x2, y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_normalizes() {
        let area = Area::from_edges(100.0, 200.0, 10.0, 20.0);
        assert_eq!(area.x1(), 10.0);
        assert_eq!(area.y1(), 20.0);
        assert_eq!(area.x2(), 100.0);
        assert_eq!(area.y2(), 200.0);
    }

    #[test]
    fn test_from_corners_any_direction() {
        let a = Point::new(20.0, 30.0);
        let b = Point::new(10.0, 10.0);
        assert_eq!(Area::from_corners(a, b), Area::from_corners(b, a));
        assert_eq!(Area::from_corners(a, b), Area::from_edges(10.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn test_zero_is_a_real_coordinate() {
        let area = Area::from_edges(0.0, 0.0, 0.0, 0.0);
        assert_eq!(area.width(), 0.0);
        assert_eq!(area.to_row_major(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_with_edge_swaps_when_crossed() {
        let area = Area::from_edges(10.0, 10.0, 50.0, 50.0);

        let moved = area.with_edge(AreaEdge::Right, 30.0);
        assert_eq!(moved.x2(), 30.0);

        let crossed = area.with_edge(AreaEdge::Left, 80.0);
        assert_eq!(crossed.x1(), 50.0);
        assert_eq!(crossed.x2(), 80.0);

        let top = area.with_edge(AreaEdge::Top, 5.0);
        assert_eq!(top.edge(AreaEdge::Top), 5.0);
        assert_eq!(top.edge(AreaEdge::Bottom), 50.0);
    }

    #[test]
    fn test_row_major_axis_order() {
        let area = Area::from_edges(1.0, 2.0, 3.0, 4.0);
        assert_eq!(area.to_row_major(), [2.0, 1.0, 4.0, 3.0]);
        assert_eq!(Area::from_row_major([2.0, 1.0, 4.0, 3.0]), area);
    }

    #[test]
    fn test_rectangle_area_conversion() {
        let rect = Rectangle::new(10.0, 10.0, 10.0, 20.0);
        let area = rect.to_area();
        assert_eq!(area, Area::from_edges(10.0, 10.0, 20.0, 30.0));
        assert_eq!(area.to_rectangle(), rect);
    }

    #[test]
    fn test_rounded_and_contains() {
        let area = Area::from_edges(0.4, 0.6, 99.5, 200.2).rounded();
        assert_eq!(area, Area::from_edges(0.0, 1.0, 100.0, 200.0));
        assert!(area.contains_x(0.0));
        assert!(area.contains_x(100.0));
        assert!(!area.contains_x(100.5));
    }
}
