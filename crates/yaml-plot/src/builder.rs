// File: crates/yaml-plot/src/builder.rs
// Summary: Chart-spec builder; validates each plot entry against the dataset and
// produces render-ready chart descriptions, in plot order.

use chart_core::SeriesType;
use tracing::debug;

use crate::config::{PlotSpec, YKeys};
use crate::dataset::Dataset;
use crate::error::{PlotError, Result};

/// One Y column traced against the X column.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Fully resolved description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub chart_type: SeriesType,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesSpec>,
    pub show_legend: bool,
}

/// `"{group}-{plot}"`, or just the plot name when the group is empty.
pub fn compose_title(group_name: &str, plot_name: &str) -> String {
    if group_name.is_empty() {
        plot_name.to_owned()
    } else {
        format!("{group_name}-{plot_name}")
    }
}

/// Build every chart, stopping at the first invalid entry.
pub fn build_chart_specs(group_name: &str, plots: &[(String, PlotSpec)], dataset: &Dataset) -> Result<Vec<ChartSpec>> {
    plots
        .iter()
        .map(|(name, spec)| build_chart_spec(group_name, name, spec, dataset))
        .collect()
}

pub fn build_chart_spec(group_name: &str, plot_name: &str, spec: &PlotSpec, dataset: &Dataset) -> Result<ChartSpec> {
    let unknown = |column: &str| PlotError::UnknownColumn { plot: plot_name.to_owned(), column: column.to_owned() };

    let x_key = spec
        .x_key
        .as_deref()
        .ok_or_else(|| PlotError::MissingPlotField { plot: plot_name.to_owned(), field: "x_key" })?;
    if !dataset.contains(x_key) {
        return Err(unknown(x_key));
    }
    let x_values = dataset.numeric_column(x_key)?;

    let y_keys: Vec<String> = match spec.y_keys(plot_name)? {
        // text columns are only an error when named explicitly
        YKeys::AllColumns => dataset
            .columns()
            .iter()
            .filter(|c| c.as_str() != x_key && dataset.is_numeric(c))
            .cloned()
            .collect(),
        YKeys::Named(keys) => keys,
    };
    // every key is checked before any series is built
    if let Some(missing) = y_keys.iter().find(|k| !dataset.contains(k)) {
        return Err(unknown(missing));
    }
    let y_values = y_keys.iter().map(|k| dataset.numeric_column(k)).collect::<Result<Vec<_>>>()?;

    let type_name = spec.chart_type.as_deref().unwrap_or(SeriesType::Line.as_str());
    let chart_type = SeriesType::from_name(type_name).ok_or_else(|| PlotError::UnsupportedChartType {
        plot: plot_name.to_owned(),
        found: type_name.to_owned(),
        supported: SeriesType::supported_names(),
    })?;

    let y_label = spec.ylabel.clone().unwrap_or_default();

    let series = y_keys
        .into_iter()
        .zip(y_values)
        .map(|(label, y)| SeriesSpec { label, x: x_values.to_vec(), y: y.to_vec() })
        .collect::<Vec<_>>();

    let title = compose_title(group_name, plot_name);
    debug!(%title, x = x_key, series = series.len(), "built chart spec");

    Ok(ChartSpec {
        title,
        chart_type,
        x_label: x_key.to_owned(),
        y_label,
        series,
        show_legend: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn dataset() -> Dataset {
        Dataset::from_reader("t,a,b\n0,1,2\n1,3,4\n2,5,6\n".as_bytes(), Path::new("d.csv")).unwrap()
    }

    fn named(x: &str, keys: &[&str]) -> PlotSpec {
        PlotSpec {
            x_key: Some(x.into()),
            key_list: Some(keys.iter().map(|k| k.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn title_composition() {
        assert_eq!(compose_title("Run1", "Speed"), "Run1-Speed");
        assert_eq!(compose_title("", "Speed"), "Speed");
    }

    #[test]
    fn one_series_per_key_with_full_length() {
        let spec = build_chart_spec("G", "P", &named("t", &["b", "a"]), &dataset()).unwrap();
        let labels: Vec<_> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["b", "a"]);
        for s in &spec.series {
            assert_eq!(s.x, vec![0.0, 1.0, 2.0]);
            assert_eq!(s.y.len(), 3);
        }
        assert_eq!(spec.series[0].y, vec![2.0, 4.0, 6.0]);
        assert_eq!(spec.x_label, "t");
        assert!(spec.show_legend);
    }

    #[test]
    fn unknown_x_key() {
        let err = build_chart_spec("", "P", &named("time", &["a"]), &dataset()).unwrap_err();
        assert!(matches!(err, PlotError::UnknownColumn { ref column, .. } if column == "time"));
    }

    #[test]
    fn unknown_y_key() {
        let err = build_chart_spec("", "P", &named("t", &["a", "zz"]), &dataset()).unwrap_err();
        assert!(matches!(err, PlotError::UnknownColumn { ref column, .. } if column == "zz"));
    }

    #[test]
    fn all_sentinel_uses_every_other_column() {
        // key_list is ignored for the All plot
        let spec = build_chart_spec("", "All", &named("t", &["zz"]), &dataset()).unwrap();
        let labels: Vec<_> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
    }

    #[test]
    fn all_sentinel_with_unknown_x_key() {
        let spec = PlotSpec { x_key: Some("time".into()), ..Default::default() };
        let err = build_chart_spec("G", "All", &spec, &dataset()).unwrap_err();
        assert!(matches!(err, PlotError::UnknownColumn { ref plot, ref column } if plot == "All" && column == "time"));
    }

    fn with_notes() -> Dataset {
        Dataset::from_reader("t,a,note\n0,1,start\n1,2,end\n".as_bytes(), Path::new("d.csv")).unwrap()
    }

    #[test]
    fn unused_text_column_is_fine() {
        let chart = build_chart_spec("", "P", &named("t", &["a"]), &with_notes()).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].y, vec![1.0, 2.0]);

        // and All skips it
        let all = PlotSpec { x_key: Some("t".into()), ..Default::default() };
        let chart = build_chart_spec("", "All", &all, &with_notes()).unwrap();
        let labels: Vec<_> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a"]);
    }

    #[test]
    fn plotting_a_text_column_fails() {
        let err = build_chart_spec("", "P", &named("t", &["a", "note"]), &with_notes()).unwrap_err();
        assert!(matches!(err, PlotError::Dataset { .. }));
        assert!(err.to_string().contains("\"note\""), "{err}");

        let err = build_chart_spec("", "P", &named("note", &["a"]), &with_notes()).unwrap_err();
        assert!(matches!(err, PlotError::Dataset { .. }));
    }

    #[test]
    fn all_columns_flag_without_key_list() {
        let spec = PlotSpec { x_key: Some("a".into()), all_columns: Some(true), ..Default::default() };
        let chart = build_chart_spec("", "Overview", &spec, &dataset()).unwrap();
        let labels: Vec<_> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["t", "b"]);
    }

    #[test]
    fn type_defaults_to_line() {
        let spec = build_chart_spec("", "P", &named("t", &["a"]), &dataset()).unwrap();
        assert_eq!(spec.chart_type, SeriesType::Line);
    }

    #[test]
    fn other_types_are_rejected() {
        let mut spec = named("t", &["a"]);
        spec.chart_type = Some("Bar".into());
        let err = build_chart_spec("", "P", &spec, &dataset()).unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedChartType { ref found, .. } if found == "Bar"));
        assert!(err.to_string().contains("supported types: Line"));
    }

    // Regression: ylabel comes from the plot's own fields, not from its name.
    #[test]
    fn ylabel_is_read_from_the_plot_spec() {
        let mut spec = named("t", &["a"]);
        assert_eq!(build_chart_spec("", "P", &spec, &dataset()).unwrap().y_label, "");
        spec.ylabel = Some("m/s".into());
        assert_eq!(build_chart_spec("", "P", &spec, &dataset()).unwrap().y_label, "m/s");
        // a plot literally named "ylabel" does not change the default
        spec.ylabel = None;
        assert_eq!(build_chart_spec("", "ylabel", &spec, &dataset()).unwrap().y_label, "");
    }

    #[test]
    fn missing_fields_in_entry() {
        let no_x = PlotSpec { key_list: Some(vec!["a".into()]), ..Default::default() };
        assert!(matches!(
            build_chart_spec("", "P", &no_x, &dataset()),
            Err(PlotError::MissingPlotField { field: "x_key", .. })
        ));
        let no_keys = PlotSpec { x_key: Some("t".into()), ..Default::default() };
        assert!(matches!(
            build_chart_spec("", "P", &no_keys, &dataset()),
            Err(PlotError::MissingPlotField { field: "key_list", .. })
        ));
    }

    #[test]
    fn first_failure_aborts_the_batch() {
        let plots = vec![
            ("Good".to_string(), named("t", &["a"])),
            ("Bad".to_string(), named("t", &["nope"])),
            ("Later".to_string(), named("t", &["b"])),
        ];
        let err = build_chart_specs("G", &plots, &dataset()).unwrap_err();
        assert!(matches!(err, PlotError::UnknownColumn { ref plot, .. } if plot == "Bad"));
    }

    #[test]
    fn preserves_plot_order() {
        let plots = vec![("Z".to_string(), named("t", &["a"])), ("A".to_string(), named("t", &["b"]))];
        let specs = build_chart_specs("G", &plots, &dataset()).unwrap();
        let titles: Vec<_> = specs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["G-Z", "G-A"]);
    }
}
