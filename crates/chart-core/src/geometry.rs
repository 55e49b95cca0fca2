// File: crates/chart-core/src/geometry.rs
// Summary: Pixel rectangle used for the plot area and data <-> pixel mapping.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    /// Inclusive hit test in pixel space.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left as f64 && x <= self.right as f64 && y >= self.top as f64 && y <= self.bottom as f64
    }

    pub fn as_array(&self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}
