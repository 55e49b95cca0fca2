// File: crates/chart-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests writing PNG and HTML.

use chart_core::{Chart, RenderOptions, Series};

fn sample_chart() -> Chart {
    let mut chart = Chart::new("Demo-Speed");
    chart.x_axis.label = "time".into();
    chart.y_axis.label = "m/s".into();
    let t = [0.0, 1.0, 2.0, 3.0, 4.0];
    chart.add_series(Series::line("v1", &t, &[0.0, 2.0, 1.0, 3.5, 2.5]));
    chart.add_series(Series::line("v2", &t, &[1.0, f64::NAN, 2.0, 2.5, 4.0]));
    chart.autoscale_axes();
    chart
}

#[test]
fn render_smoke_png() {
    let chart = sample_chart();
    let opts = RenderOptions::default();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_smoke_html() {
    let chart = sample_chart();
    let opts = RenderOptions::default();
    let html = chart_core::render_to_html(&chart, &opts).expect("html");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Demo-Speed</title>"));
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains(r#""name":"v1""#));
    assert!(html.contains(r#""name":"v2""#));
    // the gap in v2 is carried as null
    assert!(html.contains("null"));
    assert!(!html.contains("__DATA__"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Demo-Speed.html");
    chart_core::write_html(&chart, &opts, &path).expect("write html");
    assert!(std::fs::read_to_string(&path).unwrap().contains("chart-data"));
}

#[test]
fn title_is_escaped_in_html() {
    let mut chart = sample_chart();
    chart.title = "a<b>".into();
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    let html = chart_core::render_to_html(&chart, &opts).expect("html");
    assert!(html.contains("<title>a&lt;b&gt;</title>"));
}
