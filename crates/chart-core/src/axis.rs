// File: crates/chart-core/src/axis.rs
// Summary: Axis model: title and visible data range.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    /// Axis with a title and a placeholder `[0, 1]` range, to be autoscaled later.
    pub fn titled(label: impl Into<String>) -> Self {
        Self::new(label, 0.0, 1.0)
    }

    /// Range width, clamped away from zero so it can be divided by.
    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-9)
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::titled("")
    }
}
