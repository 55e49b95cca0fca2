// File: crates/yaml-plot/src/lib.rs
// Summary: Library entry point; config resolution, dataset loading, chart-spec building and output.

//! Line charts from a CSV file, declared in a YAML config.
//!
//! The pipeline is: [`config::load_config`] → [`dataset::Dataset::from_path`] →
//! [`builder::build_chart_specs`] → [`output`]. Every chart is validated before
//! anything is rendered, so a bad plot entry produces no output at all.

pub mod builder;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;

use std::path::Path;

use tracing::info;

pub use builder::{build_chart_specs, compose_title, ChartSpec, SeriesSpec};
pub use config::{load_config, PlotSpec, ResolvedConfig, YKeys};
pub use dataset::Dataset;
pub use error::{PlotError, Result};
pub use output::OutputTarget;

/// Load the config at `input`, its dataset, and build every chart spec.
pub fn prepare(input: &Path) -> Result<(ResolvedConfig, Vec<ChartSpec>)> {
    let config = load_config(input)?;
    let dataset = Dataset::from_path(&config.data_path)?;
    let specs = build_chart_specs(&config.group_name, &config.plots, &dataset)?;
    info!(charts = specs.len(), "chart specs ready");
    Ok((config, specs))
}
