// File: crates/chart-core/src/series.rs
// Summary: Series model. Only line series are drawn; the type enum names what the renderer supports.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
}

impl SeriesType {
    /// Every series type the renderer can draw.
    pub const ALL: &'static [SeriesType] = &[SeriesType::Line];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Line => "Line",
        }
    }

    /// Look up a series type by its exact name (`"Line"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }

    /// Comma separated list of supported names, for error messages.
    pub fn supported_names() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    /// Legend label.
    pub label: String,
    /// Points in data space. Non-finite coordinates mark gaps.
    pub data_xy: Vec<(f64, f64)>,
}

impl Series {
    pub fn with_data(series_type: SeriesType, label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { series_type, label: label.into(), data_xy: data }
    }

    /// Pair `xs[i]` with `ys[i]`; the shorter slice bounds the length.
    pub fn line(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        let data = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self::with_data(SeriesType::Line, label, data)
    }

    pub fn len(&self) -> usize {
        self.data_xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_xy.is_empty()
    }

    /// Iterator over points with both coordinates finite.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.data_xy.iter().copied().filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}
