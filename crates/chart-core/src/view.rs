// File: crates/chart-core/src/view.rs
// First-class view state: visible ranges and helpers for pan/zoom/autoscale.

use crate::types::Insets;
use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Extents of every finite point in the chart, with a 2% margin on Y.
    /// Falls back to the unit square when there is nothing to show.
    pub fn from_chart(chart: &Chart) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for (x, y) in chart.series.iter().flat_map(|s| s.finite_points()) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * 0.02;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn from_axes(chart: &Chart) -> Self {
        Self {
            x_min: chart.x_axis.min,
            x_max: chart.x_axis.max,
            y_min: chart.y_axis.min,
            y_max: chart.y_axis.max,
        }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }

    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, width: i32, height: i32, insets: &Insets) {
        let plot = insets.plot_rect(width, height);
        let plot_w = (plot.width() as f64).max(1.0);
        let plot_h = (plot.height() as f64).max(1.0);
        let x_span = self.x_max - self.x_min;
        let y_span = self.y_max - self.y_min;
        // screen y grows downward, data y grows upward
        let wx = -dx / plot_w * x_span;
        let wy = dy / plot_h * y_span;
        self.x_min += wx; self.x_max += wx;
        self.y_min += wy; self.y_max += wy;
    }

    /// Zoom keeping the data point under the cursor fixed. Positive `scroll` zooms in.
    pub fn zoom_at_pixel(&mut self, scroll: f64, cursor_x: f64, cursor_y: f64, width: i32, height: i32, insets: &Insets) {
        let plot = insets.plot_rect(width, height);
        let (l, rpx) = (plot.left as f64, plot.right as f64);
        let (t, bpx) = (plot.top as f64, plot.bottom as f64);
        let plot_w = (rpx - l).max(1.0);
        let plot_h = (bpx - t).max(1.0);
        let cx = cursor_x.clamp(l, rpx);
        let cy = cursor_y.clamp(t, bpx);
        let x_span = self.x_max - self.x_min;
        let y_span = self.y_max - self.y_min;
        let wx = self.x_min + (cx - l) / plot_w * x_span;
        let wy = self.y_max - (cy - t) / plot_h * y_span;
        let factor = (1.0 - scroll).clamp(0.1, 10.0);
        let nx = x_span * factor;
        let ny = y_span * factor;
        let rx = (wx - self.x_min) / x_span;
        let ry = (self.y_max - wy) / y_span;
        self.x_min = wx - rx * nx;
        self.x_max = self.x_min + nx;
        self.y_max = wy + ry * ny;
        self.y_min = self.y_max - ny;
    }

    /// Fit Y to the points inside the current X range. Returns false when none are visible.
    pub fn autoscale_y_visible(&mut self, chart: &Chart) -> bool {
        if let Some((ymin, ymax)) = visible_y_range(chart, self.x_min, self.x_max) {
            let (ymin, ymax) = if (ymax - ymin).abs() < 1e-9 { (ymin - 0.5, ymax + 0.5) } else { (ymin, ymax) };
            let m = (ymax - ymin) * 0.02;
            self.y_min = ymin - m;
            self.y_max = ymax + m;
            true
        } else {
            false
        }
    }
}

pub fn visible_y_range(chart: &Chart, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;
    for (x, y) in chart.series.iter().flat_map(|s| s.finite_points()) {
        if x >= x_min && x <= x_max {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
            any = true;
        }
    }
    if any { Some((y_min, y_max)) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Series;

    fn chart() -> Chart {
        let mut c = Chart::new("t");
        c.add_series(Series::line("a", &[0.0, 1.0, 2.0, 3.0], &[1.0, 5.0, f64::NAN, 3.0]));
        c
    }

    #[test]
    fn extents_skip_gaps() {
        let v = ViewState::from_chart(&chart());
        assert_eq!(v.x_min, 0.0);
        assert_eq!(v.x_max, 3.0);
        assert!(v.y_min < 1.0 && v.y_min > 0.9);
        assert!(v.y_max > 5.0 && v.y_max < 5.1);
    }

    #[test]
    fn empty_chart_is_unit_square() {
        let v = ViewState::from_chart(&Chart::new("empty"));
        assert_eq!(v, ViewState { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 });
    }

    #[test]
    fn pan_right_moves_window_left() {
        let mut v = ViewState { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
        let insets = Insets::default();
        let w = insets.left as i32 + insets.right as i32 + 100;
        let h = insets.top as i32 + insets.bottom as i32 + 100;
        v.pan_by_pixels(10.0, 0.0, w, h, &insets);
        assert!((v.x_min + 1.0).abs() < 1e-9);
        assert!((v.x_max - 9.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_shrinks_span() {
        let mut v = ViewState { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
        v.zoom_at_pixel(0.5, 500.0, 300.0, 1024, 640, &Insets::default());
        assert!((v.x_max - v.x_min - 5.0).abs() < 1e-9);
        assert!((v.y_max - v.y_min - 5.0).abs() < 1e-9);
    }

    #[test]
    fn autoscale_uses_visible_points() {
        let c = chart();
        let mut v = ViewState { x_min: 2.5, x_max: 3.5, y_min: -100.0, y_max: 100.0 };
        assert!(v.autoscale_y_visible(&c));
        assert!(v.y_min < 3.0 && v.y_max > 3.0 && v.y_max < 4.0);
        let mut none = ViewState { x_min: 10.0, x_max: 11.0, y_min: 0.0, y_max: 1.0 };
        assert!(!none.autoscale_y_visible(&c));
    }
}
