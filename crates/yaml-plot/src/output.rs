// File: crates/yaml-plot/src/output.rs
// Summary: Turning chart specs into charts, and where they go: HTML files or the viewer.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chart_core::{Chart, RenderOptions, Series};
use tracing::info;

use crate::builder::ChartSpec;

/// Values of `-o` that mean "next to the config file".
pub const CURRENT_DIR_SENTINELS: &[&str] = &[".", "", "current"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One `<title>.html` per chart in this directory.
    Directory(PathBuf),
    /// Show the charts in a window.
    Interactive,
}

impl OutputTarget {
    /// Map the `-o` argument: absent → interactive, a sentinel → the config
    /// directory, anything else → that path as given.
    pub fn from_arg(arg: Option<&str>, config_dir: &Path) -> Self {
        match arg {
            None => OutputTarget::Interactive,
            Some(a) if CURRENT_DIR_SENTINELS.contains(&a) => OutputTarget::Directory(config_dir.to_path_buf()),
            Some(a) => OutputTarget::Directory(PathBuf::from(a)),
        }
    }
}

/// Chart with autoscaled axes for a spec.
pub fn to_chart(spec: &ChartSpec) -> Chart {
    let mut chart = Chart::new(spec.title.clone());
    chart.x_axis.label = spec.x_label.clone();
    chart.y_axis.label = spec.y_label.clone();
    chart.show_legend = spec.show_legend;
    for s in &spec.series {
        let mut series = Series::line(s.label.clone(), &s.x, &s.y);
        series.series_type = spec.chart_type;
        chart.add_series(series);
    }
    chart.autoscale_axes();
    chart
}

/// File name for a chart title; path separators become `_`.
pub fn html_file_name(title: &str) -> String {
    let stem: String = title.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect();
    format!("{stem}.html")
}

/// Write every chart as HTML into `dir`. Returns the written paths in chart order.
pub fn write_html_files(specs: &[ChartSpec], dir: &Path, opts: &RenderOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(specs.len());
    for spec in specs {
        let path = dir.join(html_file_name(&spec.title));
        chart_core::write_html(&to_chart(spec), opts, &path)?;
        info!(path = %path.display(), "wrote chart");
        written.push(path);
    }
    Ok(written)
}

/// Open the interactive viewer on all charts. With no charts there is nothing to open.
pub fn show(specs: &[ChartSpec], opts: &RenderOptions) -> Result<()> {
    if specs.is_empty() {
        info!("no plots configured; nothing to show");
        return Ok(());
    }
    let charts = specs.iter().map(to_chart).collect();
    chart_window::show(charts, *opts)
}
