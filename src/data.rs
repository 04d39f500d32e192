//! CSV ingestion for labeled tabular data.
//!
//! Every column but the last is a numeric feature; the last column holds a
//! class label that is one-hot encoded through a [`Vocabulary`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::Matrix;

/// Ordered set of class labels; a label's position is its one-hot index
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The three iris species
    pub fn iris() -> Self {
        Vocabulary::new(["setosa", "versicolor", "virginica"])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Case-insensitive lookup of a (trimmed) label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.labels.iter().position(|l| l.eq_ignore_ascii_case(label))
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::iris()
    }
}

/// Features and one-hot labels, one sample per row
#[derive(Debug, Clone)]
pub struct Dataset {
    pub inputs: Matrix,
    pub labels: Matrix,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.nrows() == 0
    }

    pub fn feature_count(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn class_count(&self) -> usize {
        self.labels.ncols()
    }
}

pub fn load_csv<P: AsRef<Path>>(path: P, vocabulary: &Vocabulary) -> Result<Dataset> {
    let file = File::open(path.as_ref())?;
    debug!(path = ?path.as_ref(), "reading dataset");
    from_reader(file, vocabulary)
}

/// Parses CSV with a header row. All records must have the header's width.
pub fn from_reader<R: Read>(reader: R, vocabulary: &Vocabulary) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let width = reader.headers()?.len();
    if width < 2 {
        return Err(Error::MissingColumns { found: width });
    }
    let features = width - 1;
    let classes = vocabulary.len();

    let mut inputs = Vec::new();
    let mut labels = Vec::new();
    let mut rows = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        for (column, field) in record.iter().take(features).enumerate() {
            let value = field.parse::<f64>().map_err(|source| Error::MalformedField {
                line,
                column,
                value: field.to_string(),
                source,
            })?;
            inputs.push(value);
        }

        let label = &record[features];
        let class = vocabulary.index_of(label).ok_or_else(|| Error::UnknownLabel {
            line,
            label: label.to_string(),
        })?;
        labels.extend((0..classes).map(|j| if j == class { 1.0 } else { 0.0 }));
        rows += 1;
    }

    if rows == 0 {
        return Err(Error::EmptyDataset);
    }

    let inputs = Array2::from_shape_vec((rows, features), inputs)
        .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
    let labels = Array2::from_shape_vec((rows, classes), labels)
        .map_err(|e| Error::ShapeMismatch(e.to_string()))?;

    debug!(rows, features, classes, "parsed dataset");
    Ok(Dataset { inputs, labels })
}
