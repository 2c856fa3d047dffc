use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::{ForwardError, ShapeContext};

/// Dense row-major matrix of `f64`.
///
/// Weight matrices are stored as `fan_in × fan_out`, so a layer maps a row
/// vector `x` (length `rows`) to `x · W` (length `cols`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform samples in [-1, 1) from a seeded generator, so the same seed
    /// always yields the same matrix.
    pub fn random_seeded(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from nested rows. Fails if the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, ForwardError> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(ForwardError::mismatch(0, ShapeContext::RaggedRow, cols, bad.len()));
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Single-row matrix, used for bias vectors.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Vector-matrix product `v · self`. Returns `None` when
    /// `v.len() != self.rows`; nothing is truncated or padded.
    pub fn row_times(&self, v: &[f64]) -> Option<Vec<f64>> {
        if v.len() != self.rows {
            return None;
        }

        let mut res = vec![0.0; self.cols];
        for (x, row) in v.iter().zip(&self.data) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += x * w;
            }
        }

        Some(res)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_times_sums_over_rows() {
        let m = Matrix::from_data(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
        assert_eq!(m.row_times(&[1., 10.]), Some(vec![41., 52., 63.]));
    }

    #[test]
    fn row_times_rejects_wrong_length() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(m.row_times(&[1., 2., 3.]), None);
        assert_eq!(m.row_times(&[1.]), None);
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1., 2.], vec![3.]]).unwrap_err();
        assert_eq!(
            err,
            ForwardError::mismatch(0, ShapeContext::RaggedRow, 2, 1)
        );
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = Matrix::from_data(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
        let t = m.transpose();
        assert_eq!((t.rows, t.cols), (3, 2));
        assert_eq!(t.data[2], vec![3., 6.]);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = Matrix::random_seeded(3, 4, &mut StdRng::seed_from_u64(7));
        let b = Matrix::random_seeded(3, 4, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.data.iter().flatten().all(|x| (-1.0..1.0).contains(x)));
    }
}
