// File: crates/yaml-plot/src/config.rs
// Summary: YAML configuration: the fixed top-level schema and the ordered plot collection.

//! Expected layout:
//!
//! ```yaml
//! DataPath: data.csv        # relative to this file's directory
//! GroupName: Demo           # optional title prefix
//! Plots:
//!   Speed:
//!     x_key: time
//!     key_list: [v1, v2]
//!     ylabel: m/s
//!   Everything:
//!     x_key: time
//!     all_columns: true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::error::{PlotError, Result};

/// Plot name that selects every non-X column when `all_columns` is not given.
pub const ALL_COLUMNS_PLOT: &str = "All";

/// Top-level document. Everything is optional here so absence can be reported
/// as a `MissingField` naming the key instead of a serde message.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(rename = "DataPath")]
    pub data_path: Option<String>,
    #[serde(rename = "GroupName")]
    pub group_name: Option<String>,
    /// Legacy group title key; recognized only to warn that it is ignored.
    #[serde(rename = "Name")]
    pub legacy_name: Option<Value>,
    #[serde(rename = "Plots")]
    pub plots: Option<Mapping>,
}

/// One entry of `Plots`, as written. Column references are checked later,
/// against the dataset, by the chart-spec builder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlotSpec {
    pub x_key: Option<String>,
    pub key_list: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    pub ylabel: Option<String>,
    pub all_columns: Option<bool>,
}

/// Which columns become Y series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YKeys {
    Named(Vec<String>),
    AllColumns,
}

impl PlotSpec {
    /// Resolve the Y-key selection for the plot called `name`.
    /// `all_columns` wins when present; otherwise the legacy `"All"` name selects every column.
    pub fn y_keys(&self, name: &str) -> Result<YKeys> {
        let all = self.all_columns.unwrap_or(name == ALL_COLUMNS_PLOT);
        if all {
            if self.key_list.is_some() {
                debug!(plot = name, "key_list ignored for an all-columns plot");
            }
            return Ok(YKeys::AllColumns);
        }
        match &self.key_list {
            Some(keys) => Ok(YKeys::Named(keys.clone())),
            None => Err(PlotError::MissingPlotField { plot: name.to_owned(), field: "key_list" }),
        }
    }
}

/// Config with required fields present and paths made usable.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Dataset path joined onto the config file's directory.
    pub data_path: PathBuf,
    /// Empty when the config has no `GroupName`.
    pub group_name: String,
    /// Plot entries in document order.
    pub plots: Vec<(String, PlotSpec)>,
    /// Directory holding the config file.
    pub config_dir: PathBuf,
}

/// Read and resolve the config at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<ResolvedConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PlotError::Io { path: path.to_path_buf(), source })?;
    let config_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let raw = parse_config(&text).map_err(|source| PlotError::Yaml { path: path.to_path_buf(), source })?;
    resolve(raw, &config_dir)
}

/// Parse YAML text into the raw schema. An empty document is an empty mapping.
pub fn parse_config(text: &str) -> std::result::Result<RawConfig, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Null => Ok(RawConfig::default()),
        other => serde_yaml::from_value(other),
    }
}

/// Check required fields and turn the plot mapping into an ordered list.
pub fn resolve(raw: RawConfig, config_dir: &Path) -> Result<ResolvedConfig> {
    let data_path = raw.data_path.ok_or(PlotError::MissingField { field: "DataPath" })?;

    let group_name = match raw.group_name {
        Some(name) => name,
        None => {
            if raw.legacy_name.is_some() {
                warn!("\"Name\" is no longer supported for the group title; use \"GroupName\"");
            }
            String::new()
        }
    };

    let plots = raw.plots.ok_or(PlotError::MissingField { field: "Plots" })?;
    let plots = plots
        .into_iter()
        .map(|(key, value)| {
            let name = plot_name(&key)?;
            let spec = match value {
                // entry with no body
                Value::Null => PlotSpec::default(),
                value => serde_yaml::from_value(value).map_err(|e| PlotError::InvalidConfig {
                    reason: format!("plot \"{name}\": {e}"),
                })?,
            };
            Ok((name, spec))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(group = %group_name, plots = plots.len(), "resolved config");
    Ok(ResolvedConfig { data_path: config_dir.join(data_path), group_name, plots, config_dir: config_dir.to_path_buf() })
}

fn plot_name(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(PlotError::InvalidConfig { reason: format!("plot names must be scalars, found {other:?}") }),
    }
}
