use std::fmt;

use crate::activation::activation::ActivationFunction;

/// Which pair of dimensions disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeContext {
    /// Input vector length vs. the first weight matrix's row count.
    Input,
    /// Weight matrix row count vs. the previous layer's output width.
    WeightRows,
    /// Bias vector length vs. the weight matrix's column count.
    Bias,
    /// A matrix row whose length differs from the first row.
    RaggedRow,
    /// A matrix's stored row count vs. the number of rows it holds.
    RowCount,
    /// Output layer width vs. the single probability unit of a classifier.
    Output,
    /// Feature count vs. the minimum of one.
    Features,
}

impl fmt::Display for ShapeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input length vs. weight rows"),
            Self::WeightRows => write!(f, "weight rows vs. previous layer width"),
            Self::Bias => write!(f, "bias length vs. weight columns"),
            Self::RaggedRow => write!(f, "row length vs. first row"),
            Self::RowCount => write!(f, "stored row count vs. row data"),
            Self::Output => write!(f, "output units vs. single probability"),
            Self::Features => write!(f, "feature count vs. at least one"),
        }
    }
}

/// All errors that can occur while building or evaluating a network.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardError {
    /// Two consecutive shapes do not line up. `layer` is 1-based; 0 refers
    /// to the input vector itself.
    DimensionMismatch {
        layer: usize,
        context: ShapeContext,
        expected: usize,
        actual: usize,
    },
    /// A network needs at least one (output) layer.
    EmptyNetwork,
    /// A probability was requested from an output layer that is not a
    /// sigmoid unit.
    NotAProbability { activation: ActivationFunction },
}

impl ForwardError {
    pub(crate) fn mismatch(
        layer: usize,
        context: ShapeContext,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::DimensionMismatch {
            layer,
            context,
            expected,
            actual,
        }
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                layer,
                context,
                expected,
                actual,
            } => write!(
                f,
                "dimension mismatch at layer {layer} ({context}): expected {expected}, got {actual}"
            ),
            Self::EmptyNetwork => write!(f, "network has no layers"),
            Self::NotAProbability { activation } => write!(
                f,
                "output layer uses {} and does not produce a probability",
                activation.name()
            ),
        }
    }
}

impl std::error::Error for ForwardError {}
