// File: crates/chart-core/src/types.rs
// Summary: Shared sizes and margins for the raster surface and the plot area inside it.

use crate::geometry::RectI32;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Font sizes used by the renderer, in pixels.
pub const TITLE_SIZE: f32 = 18.0;
pub const LABEL_SIZE: f32 = 14.0;
pub const TICK_SIZE: f32 = 11.0;

/// Screen margins around the plot area, in pixels.
/// The defaults leave room for the title above and tick labels/axis titles on the left and bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Plot rectangle for a `width` x `height` surface. Never inverted, even when
    /// the surface is smaller than the insets.
    pub fn plot_rect(&self, width: i32, height: i32) -> RectI32 {
        let left = self.left as i32;
        let top = self.top as i32;
        let right = (width - self.right as i32).max(left + 1);
        let bottom = (height - self.bottom as i32).max(top + 1);
        RectI32::from_ltrb(left, top, right, bottom)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(84, 28, 52, 64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_uses_margins() {
        let r = Insets::default().plot_rect(WIDTH, HEIGHT);
        assert_eq!(r.left, 84);
        assert_eq!(r.top, 52);
        assert_eq!(r.right, WIDTH - 28);
        assert_eq!(r.bottom, HEIGHT - 64);
    }

    #[test]
    fn plot_rect_never_inverts() {
        let r = Insets::default().plot_rect(10, 10);
        assert!(r.width() >= 1);
        assert!(r.height() >= 1);
    }
}
