/// The visible window at one scroll position, in document pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }
}

/// Vertical extent of a page region in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionGeometry {
    pub offset_top: f64,
    pub height: f64,
}

impl RegionGeometry {
    pub fn new(offset_top: f64, height: f64) -> Self {
        Self { offset_top, height }
    }

    /// Distance from the top of the viewport to the top of the region.
    pub fn top_in(&self, viewport: &Viewport) -> f64 {
        self.offset_top - viewport.scroll_y
    }

    /// Fraction of the region's height inside the viewport, which is grown by
    /// `root_margin` pixels at both ends.
    ///
    /// A zero-height region counts as fully visible while its edge is inside.
    pub fn visible_ratio(&self, viewport: &Viewport, root_margin: f64) -> f64 {
        let top = self.top_in(viewport);
        let view_top = -root_margin;
        let view_bottom = viewport.height + root_margin;

        if !(self.height > 0.0) {
            return if top >= view_top && top <= view_bottom { 1.0 } else { 0.0 };
        }

        let bottom = top + self.height;
        let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        (overlap / self.height).clamp(0.0, 1.0)
    }

    /// Parallax progress in `[0, 1]`: how much of the region has scrolled
    /// into view from the bottom edge. Stays at 1 once the region has passed
    /// the top. Zero-height regions report 0.
    pub fn scroll_progress(&self, viewport: &Viewport) -> f64 {
        if !(self.height > 0.0) {
            return 0.0;
        }
        let top = self.top_in(viewport);
        let visible_height = (viewport.height - top.max(0.0)).min(self.height).max(0.0);
        (visible_height / self.height).clamp(0.0, 1.0)
    }
}
