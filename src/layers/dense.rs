use serde::{Serialize, Deserialize};

use crate::{
    activation::activation::ActivationFunction,
    error::{ForwardError, ShapeContext},
    math::matrix::Matrix,
};

/// One fitted layer: `weights` is `fan_in × size`, `biases` is `1 × size`.
///
/// Layers are read-only once built; `feed_from` borrows and never stores
/// activations, so the same layer can be evaluated any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Fails if the bias length differs from the weight column count, or if
    /// the weight matrix's stored shape disagrees with its rows.
    /// `index` is the 1-based layer position, used only for error reporting.
    pub fn new(
        index: usize,
        weights: Matrix,
        biases: Vec<f64>,
        activation: ActivationFunction,
    ) -> Result<Layer, ForwardError> {
        let layer = Layer {
            weights,
            biases: Matrix::row(biases),
            activator: activation
        };
        layer.validate(index)?;
        Ok(layer)
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Returns `(z, a)` where `z = input · W + b` and `a = f(z)`.
    ///
    /// Shapes are re-checked on every call.
    pub fn feed_from(&self, index: usize, input: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ForwardError> {
        self.validate(index)?;

        let context = if index == 1 { ShapeContext::Input } else { ShapeContext::WeightRows };
        let mut z = self.weights
            .row_times(input)
            .ok_or_else(|| ForwardError::mismatch(index, context, self.input_size(), input.len()))?;

        for (zi, b) in z.iter_mut().zip(&self.biases.data[0]) {
            *zi += b;
        }

        let a = z.iter().map(|&x| self.activator.function(x)).collect();
        Ok((z, a))
    }

    /// Checks that the stored row/column counts match the data and that the
    /// bias has one entry per unit.
    pub(crate) fn validate(&self, index: usize) -> Result<(), ForwardError> {
        if self.weights.data.len() != self.weights.rows {
            return Err(ForwardError::mismatch(index, ShapeContext::RowCount, self.weights.rows, self.weights.data.len()));
        }
        if let Some(row) = self.weights.data.iter().find(|row| row.len() != self.weights.cols) {
            return Err(ForwardError::mismatch(index, ShapeContext::RaggedRow, self.weights.cols, row.len()));
        }

        let bias_len = self.biases.data.first().map_or(0, Vec::len);
        if self.biases.rows != 1 || bias_len != self.size() {
            return Err(ForwardError::mismatch(index, ShapeContext::Bias, self.size(), bias_len));
        }
        Ok(())
    }
}
