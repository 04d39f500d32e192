use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{Error, Result};

pub type Matrix = Array2<f64>;

/// Output normalization used by the network's final layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Normalization {
    /// One softmax over every entry of the matrix; all entries sum to 1.
    #[default]
    Global,
    /// Softmax per sample; each row sums to 1.
    PerRow,
}

impl Normalization {
    pub fn apply(&self, m: &Matrix) -> Result<Matrix> {
        match self {
            Normalization::Global => softmax(m),
            Normalization::PerRow => softmax_rows(m),
        }
    }
}

/// Sums `m` along `axis`.
///
/// `Axis(0)` collapses the rows into a 1×C vector of column totals, `Axis(1)`
/// collapses the columns into an R×1 vector of row totals.
pub fn sum_along_axis(axis: Axis, m: &Matrix) -> Result<Matrix> {
    match axis.index() {
        0 => Ok(m.sum_axis(Axis(0)).insert_axis(Axis(0))),
        1 => Ok(m.sum_axis(Axis(1)).insert_axis(Axis(1))),
        other => Err(Error::InvalidArgument(format!(
            "invalid axis {}, must be 0 or 1",
            other
        ))),
    }
}

/// Largest entry, or `None` when any entry is NaN or infinite.
fn finite_max(values: ArrayView1<'_, f64>) -> Option<f64> {
    values.iter().try_fold(f64::NEG_INFINITY, |acc, &v| {
        if v.is_finite() {
            Some(acc.max(v))
        } else {
            None
        }
    })
}

/// Softmax across the whole matrix: every entry is shifted by the global
/// maximum, exponentiated and divided by the sum of all exponentials.
///
/// Returns a new matrix; the input is left untouched.
pub fn softmax(m: &Matrix) -> Result<Matrix> {
    if m.is_empty() {
        return Err(Error::InvalidArgument("softmax of an empty matrix".to_string()));
    }
    if m.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument("softmax input must be finite".to_string()));
    }
    let max = m.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));

    let exps = m.mapv(|v| (v - max).exp());
    let sum = exps.sum();
    Ok(exps / sum)
}

/// Softmax applied independently to every row.
pub fn softmax_rows(m: &Matrix) -> Result<Matrix> {
    if m.is_empty() {
        return Err(Error::InvalidArgument("softmax of an empty matrix".to_string()));
    }

    let mut out = m.clone();
    for (i, mut row) in out.rows_mut().into_iter().enumerate() {
        let max = finite_max(row.view()).ok_or_else(|| {
            Error::InvalidArgument(format!("softmax input must be finite, row {} is not", i))
        })?;
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    Ok(out)
}

/// Adds the 1×C `row` to every row of the N×C matrix `m`.
pub fn broadcast_add(m: &Matrix, row: &Matrix) -> Result<Matrix> {
    if row.nrows() != 1 || row.ncols() != m.ncols() {
        return Err(Error::ShapeMismatch(format!(
            "cannot broadcast {:?} over rows of {:?}",
            row.dim(),
            m.dim()
        )));
    }
    Ok(m + row)
}

/// Index of the largest entry in each row.
pub fn argmax_rows(m: &Matrix) -> Vec<usize> {
    m.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (j, &v)| {
                    if v > best.1 {
                        (j, v)
                    } else {
                        best
                    }
                })
                .0
        })
        .collect()
}
