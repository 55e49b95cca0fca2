// File: crates/chart-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use chart_core::{Axis, Chart, RenderOptions, Series, Theme};

#[test]
fn render_rgba8_buffer() {
    let mut chart = Chart::new("rgba");
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(Series::line("diag", &[0.0, 4.0], &[0.0, 4.0]));

    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    let (px, w, h, stride) = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel sits in the margin: opaque theme background
    let bg = Theme::dark().background;
    assert_eq!(&px[0..4], &[bg.r(), bg.g(), bg.b(), 255]);
}

#[test]
fn render_respects_requested_size() {
    let chart = Chart::new("small");
    let mut opts = RenderOptions::default();
    opts.width = 320;
    opts.height = 200;
    opts.draw_labels = false;
    let (px, w, h, _) = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!((w, h), (320, 200));
    assert_eq!(px.len(), 320 * 200 * 4);
}
