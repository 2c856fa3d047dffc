use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;

/// Values produced by one layer during a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerTrace {
    /// 1-based position in the network.
    pub index: usize,
    pub activation: ActivationFunction,
    /// `z = a_prev · W + b`
    pub pre_activation: Vec<f64>,
    /// `f(z)`
    pub post_activation: Vec<f64>,
}

/// Full record of one forward pass: the input and every layer's `z` and `a`.
///
/// Values are stored at full precision. Rounding for display happens in
/// `report` and never feeds back into these vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardTrace {
    pub input: Vec<f64>,
    pub layers: Vec<LayerTrace>,
}

impl ForwardTrace {
    /// Post-activation of the last layer; empty when there are no layers.
    pub fn output(&self) -> &[f64] {
        match self.layers.last() {
            Some(l) => &l.post_activation,
            None => &[],
        }
    }

    /// First output unit, read as the positive-class probability when the
    /// output layer is a sigmoid unit.
    pub fn prediction(&self) -> Option<f64> {
        self.output().first().copied()
    }

    /// Every layer except the output layer.
    pub fn hidden(&self) -> &[LayerTrace] {
        match self.layers.split_last() {
            Some((_, hidden)) => hidden,
            None => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
