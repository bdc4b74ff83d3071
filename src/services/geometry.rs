//! Pointer geometry.
//!
//! Pure functions that turn raw pointer positions into page-space points and
//! drag rectangles. Nothing here holds state, so every function is safe to call
//! on each motion event.

use crate::models::{PageSurface, Point, Rectangle};

/// Builds the rectangle spanned by a drag from `start` to `current`.
///
/// Returns `None` when either point is missing (drag not started, or the
/// pointer position is unknown). The result is the same whichever corner the
/// drag started from, and its width and height are never negative.
///
/// # Examples
///
/// ```
/// use tablecrop::models::{Point, Rectangle};
/// use tablecrop::services::geometry::rectangle_from_points;
///
/// let rect = rectangle_from_points(Some(Point::new(20.0, 30.0)), Some(Point::new(10.0, 10.0)));
/// assert_eq!(rect, Some(Rectangle::new(10.0, 10.0, 10.0, 20.0)));
/// ```
#[must_use]
pub fn rectangle_from_points(start: Option<Point>, current: Option<Point>) -> Option<Rectangle> {
    let (start, current) = (start?, current?);
    Some(Rectangle {
        x: start.x.min(current.x),
        y: start.y.min(current.y),
        width: (current.x - start.x).abs(),
        height: (current.y - start.y).abs(),
    })
}

/// Converts a screen-space pointer position into page space.
///
/// Subtracts the rendered page's on-screen origin and divides by the zoom
/// `scale`. The caller guarantees `scale > 0`.
#[must_use]
pub fn point_from_screen_coordinates(client: Point, page_origin: Point, scale: f64) -> Point {
    debug_assert!(scale > 0.0, "zoom scale must be positive");
    Point {
        x: (client.x - page_origin.x) / scale,
        y: (client.y - page_origin.y) / scale,
    }
}

/// Converts a screen-space pointer position using a rendering surface.
///
/// Returns `None` while the surface has not laid out a page yet.
#[must_use]
pub fn surface_point<S: PageSurface + ?Sized>(surface: &S, client: Point) -> Option<Point> {
    let origin = surface.page_origin()?;
    Some(point_from_screen_coordinates(client, origin, surface.scale()))
}
