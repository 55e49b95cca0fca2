// File: crates/yaml-plot/src/error.rs
// Summary: Error types for config resolution, dataset loading and chart-spec building.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure is fatal: the run stops at the first one.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("missing input: please use -i/--input for the yaml config path")]
    MissingInput,

    #[error("missing field: \"{field}\" not found in yaml")]
    MissingField { field: &'static str },

    #[error("missing plot field: plot \"{plot}\" has no \"{field}\"")]
    MissingPlotField { plot: String, field: &'static str },

    #[error("unknown column: plot \"{plot}\" references \"{column}\", which is not in the csv file")]
    UnknownColumn { plot: String, column: String },

    #[error("unsupported chart type: plot \"{plot}\" has type \"{found}\"; supported types: {supported}")]
    UnsupportedChartType { plot: String, found: String, supported: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid dataset {}: {}", .path.display(), .reason)]
    Dataset { path: PathBuf, reason: String },

    #[error("failed to parse yaml {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;
