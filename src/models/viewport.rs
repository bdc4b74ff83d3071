//! Rendered-page viewport state.
//!
//! The PDF renderer itself lives outside this crate. The viewport only tracks
//! what the geometry conversion needs from it: which page is shown, at what
//! zoom, and where the page sits on screen.

use crate::models::{PageRole, Point};
use serde::{Deserialize, Serialize};

/// Boundary exposed by whatever renders the PDF page.
pub trait PageSurface {
    /// 1-based number of the page currently rendered.
    fn page_number(&self) -> u32;

    /// Current zoom factor (page points to screen pixels). Always > 0.
    fn scale(&self) -> f64;

    /// Screen-space top-left corner of the rendered page, or `None` while
    /// no page has been laid out yet.
    fn page_origin(&self) -> Option<Point>;
}

/// Zoom bounds and step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    /// Smallest allowed scale
    pub min: f64,
    /// Largest allowed scale
    pub max: f64,
    /// Increment applied by zoom in/out
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 1.5,
            step: 0.1,
        }
    }
}

impl ZoomLimits {
    /// Brings `scale` into range, or `None` when the limits leave no
    /// positive finite scale to use.
    fn clamp(&self, scale: f64) -> Option<f64> {
        // Strip the float noise that repeated 0.1 steps accumulate.
        let snapped = (scale * 10_000.0).round() / 10_000.0;
        // f64::clamp panics on NaN or inverted bounds.
        let clamped = snapped.max(self.min).min(self.max);
        (clamped.is_finite() && clamped > 0.0).then_some(clamped)
    }
}

/// Page navigation and zoom state of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    page: u32,
    total_pages: u32,
    scale: f64,
    limits: ZoomLimits,
    page_origin: Option<Point>,
}

impl Viewport {
    /// Creates a viewport showing page 1 at 100% zoom (clamped to `limits`).
    ///
    /// Limits that admit no positive scale leave the zoom at 100%.
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            scale: limits.clamp(1.0).unwrap_or(1.0),
            limits,
            page_origin: None,
        }
    }

    /// Current 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of pages in the loaded document.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Sets the page count after a document loads, keeping the current page in range.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page = self.page.clamp(1, self.total_pages);
    }

    /// Jumps to a page, clamped to the document.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Advances one page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    /// Goes back one page. Returns false when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Page role whose layout applies to the page on screen.
    #[must_use]
    pub const fn page_role(&self) -> PageRole {
        PageRole::for_page(self.page)
    }

    /// Sets the zoom, clamped to the configured limits.
    pub fn set_scale(&mut self, scale: f64) {
        if let Some(scale) = self.limits.clamp(scale) {
            self.scale = scale;
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + self.limits.step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - self.limits.step);
    }

    /// Records where the renderer placed the page on screen.
    pub fn set_page_origin(&mut self, origin: Option<Point>) {
        self.page_origin = origin;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl PageSurface for Viewport {
    fn page_number(&self) -> u32 {
        self.page
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn page_origin(&self) -> Option<Point> {
        self.page_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_navigation_clamps() {
        let mut viewport = Viewport::default();
        assert!(!viewport.next_page());
        viewport.set_total_pages(3);
        assert!(viewport.next_page());
        assert!(viewport.next_page());
        assert!(!viewport.next_page());
        assert_eq!(viewport.page(), 3);
        assert_eq!(viewport.page_number(), 3);
        assert_eq!(viewport.page_role(), PageRole::Default);

        viewport.go_to_page(0);
        assert_eq!(viewport.page(), 1);
        assert_eq!(viewport.page_role(), PageRole::First);
        assert!(!viewport.previous_page());
    }

    #[test]
    fn test_shrinking_document_pulls_page_back() {
        let mut viewport = Viewport::default();
        viewport.set_total_pages(10);
        viewport.go_to_page(9);
        viewport.set_total_pages(4);
        assert_eq!(viewport.page(), 4);
        viewport.set_total_pages(0);
        assert_eq!(viewport.total_pages(), 1);
        assert_eq!(viewport.page(), 1);
    }

    #[test]
    fn test_zoom_steps_and_limits() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        assert_eq!(viewport.scale(), 1.1);
        for _ in 0..10 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.scale(), 1.5);
        for _ in 0..20 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale(), 0.5);
    }

    #[test]
    fn test_bad_limits_never_panic() {
        let inverted = ZoomLimits {
            min: 2.0,
            max: 1.0,
            step: 0.1,
        };
        let mut viewport = Viewport::new(inverted);
        assert_eq!(viewport.scale(), 1.0);
        viewport.zoom_in();
        assert_eq!(viewport.scale(), 1.0);

        let nan_min = ZoomLimits {
            min: f64::NAN,
            ..ZoomLimits::default()
        };
        let mut viewport = Viewport::new(nan_min);
        assert_eq!(viewport.scale(), 1.0);
        viewport.set_scale(3.0);
        assert_eq!(viewport.scale(), 1.5);

        let zero = ZoomLimits {
            min: 0.0,
            max: 0.0,
            step: 0.1,
        };
        let mut viewport = Viewport::new(zero);
        assert_eq!(viewport.scale(), 1.0);
        viewport.zoom_out();
        assert!(viewport.scale() > 0.0);
    }

    #[test]
    fn test_nan_scale_falls_back_to_minimum() {
        let mut viewport = Viewport::default();
        viewport.set_scale(f64::NAN);
        assert_eq!(viewport.scale(), 0.5);
    }

    #[test]
    fn test_page_origin_starts_unset() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.page_origin(), None);
        viewport.set_page_origin(Some(Point::new(40.0, 12.0)));
        assert_eq!(viewport.page_origin(), Some(Point::new(40.0, 12.0)));
    }
}
