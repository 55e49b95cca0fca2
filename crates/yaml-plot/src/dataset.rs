// File: crates/yaml-plot/src/dataset.rs
// Summary: Column-oriented view of the CSV file.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PlotError, Result};

/// Columns keyed by header name. Column order follows the header row and every
/// numeric column has the same length. Empty cells are stored as `NaN`.
///
/// A column with a cell that is not a number loads fine; asking for its
/// values is what fails.
#[derive(Debug, Clone)]
pub struct Dataset {
    origin: PathBuf,
    columns: Vec<String>,
    values: HashMap<String, Column>,
    rows: usize,
}

#[derive(Debug, Clone)]
enum Column {
    Numeric(Vec<f64>),
    /// First cell that did not parse.
    Text { line: usize, cell: String },
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PlotError::Io { path: path.to_path_buf(), source })?;
        let dataset = Self::from_reader(file, path)?;
        info!(path = %path.display(), columns = dataset.columns.len(), rows = dataset.rows, "loaded dataset");
        Ok(dataset)
    }

    /// Parse CSV from `reader`; `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let invalid = |reason: String| PlotError::Dataset { path: origin.to_path_buf(), reason };

        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| invalid(e.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(invalid("no header row".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(invalid(format!("duplicate column \"{dup}\"")));
        }
        debug!(?columns, "csv headers");

        let mut data: Vec<Column> = vec![Column::Numeric(Vec::new()); columns.len()];
        let mut rows = 0usize;
        for (i, rec) in rdr.records().enumerate() {
            // strict record length: ragged rows are a csv::Error here
            let rec = rec.map_err(|e| invalid(e.to_string()))?;
            // header is line 1
            let line = i + 2;
            for (column, cell) in data.iter_mut().zip(rec.iter()) {
                if let Column::Numeric(values) = column {
                    match parse_cell(cell) {
                        Some(v) => values.push(v),
                        None => *column = Column::Text { line, cell: cell.to_owned() },
                    }
                }
            }
            rows += 1;
        }

        for (name, column) in columns.iter().zip(&data) {
            if let Column::Text { line, .. } = column {
                debug!(column = %name, line, "non-numeric column");
            }
        }

        let values = columns.iter().cloned().zip(data).collect();
        Ok(Self { origin: origin.to_path_buf(), columns, values, rows })
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of a column that is about to be plotted. Fails for a column
    /// holding text, naming the first offending cell.
    pub fn numeric_column(&self, name: &str) -> Result<&[f64]> {
        let invalid = |reason: String| PlotError::Dataset { path: self.origin.clone(), reason };
        match self.values.get(name) {
            Some(Column::Numeric(values)) => Ok(values.as_slice()),
            Some(Column::Text { line, cell }) => {
                Err(invalid(format!("line {line}, column \"{name}\": \"{cell}\" is not a number")))
            }
            None => Err(invalid(format!("no column \"{name}\""))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Column::Numeric(_)))
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Dataset> {
        Dataset::from_reader(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn keeps_header_order() {
        let ds = load("t,b,a\n0,1,2\n1,3,4\n").unwrap();
        assert_eq!(ds.columns(), &["t", "b", "a"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.numeric_column("b").unwrap(), &[1.0, 3.0]);
        assert!(ds.contains("a"));
        assert!(!ds.contains("c"));
    }

    #[test]
    fn empty_cells_are_nan() {
        let ds = load("t,v\n0,\n1, 2.5 \n").unwrap();
        let v = ds.numeric_column("v").unwrap();
        assert!(v[0].is_nan());
        assert_eq!(v[1], 2.5);
    }

    #[test]
    fn text_columns_load_but_cannot_be_plotted() {
        let ds = load("t,a,note\n0,1,start\n1,2,end\n").unwrap();
        assert_eq!(ds.columns(), &["t", "a", "note"]);
        assert_eq!(ds.numeric_column("a").unwrap(), &[1.0, 2.0]);
        assert!(ds.contains("note"));
        assert!(!ds.is_numeric("note"));

        let err = ds.numeric_column("note").unwrap_err();
        assert!(matches!(err, PlotError::Dataset { .. }));
        assert!(err.to_string().contains("line 2, column \"note\": \"start\""), "{err}");
    }

    #[test]
    fn first_bad_cell_is_reported() {
        let ds = load("t,v\n0,1\n1,abc\n2,xyz\n").unwrap();
        let err = ds.numeric_column("v").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
        assert!(err.to_string().contains("\"abc\""), "{err}");
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(load("t,v\n0,1\n2\n"), Err(PlotError::Dataset { .. })));
    }

    #[test]
    fn rejects_duplicate_headers() {
        let err = load("t,v,v\n0,1,2\n").unwrap_err();
        assert!(err.to_string().contains("duplicate column \"v\""));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(load(""), Err(PlotError::Dataset { .. })));
    }

    #[test]
    fn header_only_has_zero_rows() {
        let ds = load("t,v\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert!(ds.numeric_column("t").unwrap().is_empty());
    }
}
