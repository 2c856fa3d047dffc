//! The small teaching model: a 2 → 4 → 2 → 1 classifier over two binary
//! features (AUD use, NUD use), plus a logistic regression over the same
//! features. Parameters are the rounded values of an already-fitted model.

use crate::{
    error::ForwardError,
    math::matrix::Matrix,
    network::{metadata::ModelMetadata, network::Network},
};

/// One patient: AUD present, NUD absent.
pub const INPUT: [f64; 2] = [1.0, 0.0];

pub const FEATURE_NAMES: [&str; 2] = ["AUD", "NUD"];

/// First hidden layer, one row per hidden unit (the usual printed layout).
const W1_BY_UNIT: [[f64; 2]; 4] = [
    [0.00, 0.00],
    [0.00, 0.00],
    [1.25, 1.25],
    [1.25, 1.27],
];
const B1: [f64; 4] = [-0.64, -0.70, -1.26, 0.00];

/// Second hidden layer, `fan_in × fan_out`.
const W2: [[f64; 2]; 4] = [
    [0.31, -0.42],
    [-0.27, 0.55],
    [0.88, -0.61],
    [1.20, -0.50],
];
const B2: [f64; 2] = [0.10, 0.30];

const W_OUT: [f64; 2] = [-1.45, 0.62];
const B_OUT: f64 = 0.23;

const LOGIT_COEFS: [f64; 2] = [-2.0, 0.5];
const LOGIT_INTERCEPT: f64 = -0.1;

fn metadata(description: &str) -> ModelMetadata {
    ModelMetadata {
        description: Some(description.to_string()),
        feature_names: Some(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()),
        positive_label: Some("positive outcome".to_string()),
    }
}

fn rows<const N: usize>(rows: &[[f64; N]]) -> Result<Matrix, ForwardError> {
    Matrix::from_data(rows.iter().map(|r| r.to_vec()).collect())
}

pub fn mlp() -> Result<Network, ForwardError> {
    let w1 = rows(&W1_BY_UNIT)?.transpose();
    let w2 = rows(&W2)?;
    let w_out = Matrix::from_data(W_OUT.iter().map(|&w| vec![w]).collect())?;

    Ok(Network::mlp_classifier(vec![
        (w1, B1.to_vec()),
        (w2, B2.to_vec()),
        (w_out, vec![B_OUT]),
    ])?
    .with_metadata(metadata("MLP classifier, hidden layers (4, 2), ReLU")))
}

pub fn logistic_regression() -> Result<Network, ForwardError> {
    Ok(Network::logistic_regression(LOGIT_COEFS.to_vec(), LOGIT_INTERCEPT)?
        .with_metadata(metadata("logistic regression")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_layer_is_stored_fan_in_major() {
        let net = mlp().unwrap();
        let w1 = &net.layers[0].weights;
        assert_eq!((w1.rows, w1.cols), (2, 4));
        assert_eq!(w1.data[1], vec![0.00, 0.00, 1.25, 1.27]);
    }

    #[test]
    fn hidden_vector_matches_hand_computation() {
        let trace = mlp().unwrap().evaluate(&INPUT).unwrap();
        let h1 = &trace.layers[0].post_activation;
        let expected = [0.0, 0.0, 0.0, 1.25];
        for (got, want) in h1.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{h1:?}");
        }
        // Unit 3 sits just below zero before the ReLU.
        assert!(trace.layers[0].pre_activation[2] < 0.0);
    }

    #[test]
    fn prediction_is_about_eleven_percent() {
        let p = mlp().unwrap().predict_proba(&INPUT).unwrap();
        assert!((p - 0.11).abs() < 0.005, "{p}");
    }
}
