use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::{
    activation::activation::ActivationFunction,
    error::{ForwardError, ShapeContext},
    layers::dense::Layer,
    math::matrix::Matrix,
    network::{
        metadata::ModelMetadata,
        trace::{ForwardTrace, LayerTrace},
    },
};

/// An ordered stack of fitted layers. The last layer is the output layer;
/// all preceding layers are hidden layers.
///
/// Construction and deserialization check that consecutive shapes line up.
/// The fields stay public, so `evaluate` checks them again before running.
/// Evaluation borrows `&self` and is pure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkParams")]
pub struct Network {
    pub layers: Vec<Layer>,
    pub metadata: Option<ModelMetadata>,
}

/// Unchecked wire form of `Network`.
#[derive(Deserialize)]
struct NetworkParams {
    layers: Vec<Layer>,
    #[serde(default)]
    metadata: Option<ModelMetadata>,
}

impl TryFrom<NetworkParams> for Network {
    type Error = ForwardError;

    fn try_from(params: NetworkParams) -> Result<Self, Self::Error> {
        let network = Network {
            layers: params.layers,
            metadata: params.metadata,
        };
        network.validate()?;
        Ok(network)
    }
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Result<Network, ForwardError> {
        let network = Network { layers, metadata: None };
        network.validate()?;
        Ok(network)
    }

    /// Builds a binary MLP classifier from `(weights, biases)` pairs: ReLU on
    /// every hidden layer, a single sigmoid unit on the output layer.
    pub fn mlp_classifier(params: Vec<(Matrix, Vec<f64>)>) -> Result<Network, ForwardError> {
        let n = params.len();
        let layers = params
            .into_iter()
            .enumerate()
            .map(|(i, (weights, biases))| {
                let activation = if i + 1 == n {
                    ActivationFunction::Sigmoid
                } else {
                    ActivationFunction::ReLU
                };
                Layer::new(i + 1, weights, biases, activation)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let network = Network::new(layers)?;
        network.check_single_output()?;
        Ok(network)
    }

    /// A fitted logistic regression is the zero-hidden-layer case: one
    /// sigmoid unit over the raw features.
    pub fn logistic_regression(coefficients: Vec<f64>, intercept: f64) -> Result<Network, ForwardError> {
        if coefficients.is_empty() {
            return Err(ForwardError::mismatch(1, ShapeContext::Features, 1, 0));
        }
        let weights = Matrix::from_data(coefficients.into_iter().map(|c| vec![c]).collect())?;
        Network::mlp_classifier(vec![(weights, vec![intercept])])
    }

    /// Reproducible random parameters for the widths in `sizes`
    /// (`sizes[0]` is the input dimension, the last entry the output width).
    pub fn random_mlp(sizes: &[usize], seed: u64) -> Result<Network, ForwardError> {
        if sizes.len() < 2 {
            return Err(ForwardError::EmptyNetwork);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let params = sizes
            .windows(2)
            .map(|w| {
                let weights = Matrix::random_seeded(w[0], w[1], &mut rng);
                let biases = Matrix::random_seeded(1, w[1], &mut rng);
                (weights, biases.data.into_iter().next().unwrap_or_default())
            })
            .collect();

        Network::mlp_classifier(params)
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    /// Forward pass keeping every intermediate vector.
    pub fn evaluate(&self, input: &[f64]) -> Result<ForwardTrace, ForwardError> {
        self.validate()?;

        let mut layers = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();

        for (i, layer) in self.layers.iter().enumerate() {
            let index = i + 1;
            let (pre_activation, post_activation) = layer.feed_from(index, &current)?;
            debug!(
                "layer {index} ({}): z = {pre_activation:?}, a = {post_activation:?}",
                layer.activator.name()
            );

            current = post_activation.clone();
            layers.push(LayerTrace {
                index,
                activation: layer.activator,
                pre_activation,
                post_activation,
            });
        }

        Ok(ForwardTrace {
            input: input.to_vec(),
            layers,
        })
    }

    /// Probability of the positive class for one input. The output layer
    /// must be a single sigmoid unit.
    pub fn predict_proba(&self, input: &[f64]) -> Result<f64, ForwardError> {
        self.check_single_output()?;
        if let Some(last) = self.layers.last() {
            if last.activator != ActivationFunction::Sigmoid {
                return Err(ForwardError::NotAProbability { activation: last.activator });
            }
        }

        self.evaluate(input)?
            .prediction()
            .ok_or_else(|| ForwardError::mismatch(self.layers.len(), ShapeContext::Output, 1, 0))
    }

    /// `predict_proba(input) >= threshold`.
    pub fn classify(&self, input: &[f64], threshold: f64) -> Result<bool, ForwardError> {
        Ok(self.predict_proba(input)? >= threshold)
    }

    /// Evaluates each input independently. Stops at the first malformed one.
    pub fn evaluate_batch(&self, inputs: &[Vec<f64>]) -> Result<Vec<ForwardTrace>, ForwardError> {
        inputs.iter().map(|input| self.evaluate(input)).collect()
    }

    /// Serializes the network parameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        info!("saved {} layer network to {path}", self.layers.len());
        Ok(())
    }

    /// Deserializes a network from a JSON file; shapes are checked while
    /// deserializing.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        info!(
            "loaded network from {path}: {} inputs, {} layers",
            network.input_size(),
            network.layers.len()
        );
        Ok(network)
    }

    fn validate(&self) -> Result<(), ForwardError> {
        if self.layers.is_empty() {
            return Err(ForwardError::EmptyNetwork);
        }

        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i + 1)?;
            if i > 0 {
                let prev = self.layers[i - 1].size();
                if layer.input_size() != prev {
                    return Err(ForwardError::mismatch(i + 1, ShapeContext::WeightRows, prev, layer.input_size()));
                }
            }
        }

        Ok(())
    }

    fn check_single_output(&self) -> Result<(), ForwardError> {
        if self.output_size() != 1 {
            return Err(ForwardError::mismatch(self.layers.len(), ShapeContext::Output, 1, self.output_size()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(rows).unwrap()
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Network::new(vec![]).unwrap_err(), ForwardError::EmptyNetwork);
    }

    #[test]
    fn new_rejects_mismatched_consecutive_layers() {
        let err = Network::mlp_classifier(vec![
            (Matrix::zeros(2, 4), vec![0.0; 4]),
            (Matrix::zeros(3, 1), vec![0.0]),
        ])
        .unwrap_err();
        assert_eq!(err, ForwardError::mismatch(2, ShapeContext::WeightRows, 4, 3));
    }

    #[test]
    fn classifier_needs_single_output() {
        let err = Network::mlp_classifier(vec![(Matrix::zeros(2, 2), vec![0.0; 2])]).unwrap_err();
        assert_eq!(err, ForwardError::mismatch(1, ShapeContext::Output, 1, 2));
    }

    #[test]
    fn mlp_classifier_assigns_activations() {
        let net = Network::random_mlp(&[3, 5, 4, 1], 1).unwrap();
        let acts: Vec<_> = net.layers.iter().map(|l| l.activator).collect();
        assert_eq!(
            acts,
            vec![ActivationFunction::ReLU, ActivationFunction::ReLU, ActivationFunction::Sigmoid]
        );
        assert_eq!(net.input_size(), 3);
        assert_eq!(net.output_size(), 1);
    }

    #[test]
    fn evaluate_chains_layers() {
        let net = Network::mlp_classifier(vec![
            (m(vec![vec![1.0, -1.0], vec![2.0, 0.5]]), vec![0.0, 0.0]),
            (m(vec![vec![1.0], vec![1.0]]), vec![-3.0]),
        ])
        .unwrap();

        let trace = net.evaluate(&[1.0, 1.0]).unwrap();
        assert_eq!(trace.layers[0].pre_activation, vec![3.0, -0.5]);
        assert_eq!(trace.layers[0].post_activation, vec![3.0, 0.0]);
        assert_eq!(trace.layers[1].pre_activation, vec![0.0]);
        assert_eq!(trace.prediction(), Some(0.5));
    }

    #[test]
    fn evaluate_rejects_input_length() {
        let net = Network::random_mlp(&[2, 3, 1], 0).unwrap();
        let err = net.evaluate(&[1.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(err, ForwardError::mismatch(1, ShapeContext::Input, 2, 3));
    }

    #[test]
    fn batch_stops_on_bad_input() {
        let net = Network::random_mlp(&[2, 3, 1], 0).unwrap();
        assert_eq!(net.evaluate_batch(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap().len(), 2);
        assert!(net.evaluate_batch(&[vec![1.0, 0.0], vec![1.0]]).is_err());
    }

    #[test]
    fn deserialize_rejects_empty_network() {
        let err = serde_json::from_str::<Network>(r#"{"layers": []}"#).unwrap_err();
        assert!(err.to_string().contains("network has no layers"), "{err}");
    }

    #[test]
    fn deserialize_rejects_short_bias() {
        let mut json = serde_json::to_value(Network::random_mlp(&[2, 4, 1], 5).unwrap()).unwrap();
        json["layers"][0]["biases"] = serde_json::json!({"rows": 1, "cols": 3, "data": [[0.0, 0.0, 0.0]]});
        let err = serde_json::from_value::<Network>(json).unwrap_err();
        assert!(err.to_string().contains("layer 1 (bias length vs. weight columns)"), "{err}");
    }

    #[test]
    fn evaluate_rechecks_literal_networks() {
        let empty = Network { layers: vec![], metadata: None };
        assert_eq!(empty.evaluate(&[5.0]).unwrap_err(), ForwardError::EmptyNetwork);
        assert_eq!(empty.predict_proba(&[5.0]).unwrap_err(), ForwardError::mismatch(0, ShapeContext::Output, 1, 0));

        let mut net = Network::random_mlp(&[2, 4, 1], 5).unwrap();
        net.layers[1].weights = Matrix::zeros(3, 1);
        assert_eq!(
            net.evaluate(&[1.0, 0.0]).unwrap_err(),
            ForwardError::mismatch(2, ShapeContext::WeightRows, 4, 3)
        );
    }

    #[test]
    fn predict_proba_needs_sigmoid_output() {
        for activation in [ActivationFunction::ReLU, ActivationFunction::Identity, ActivationFunction::Tanh] {
            let layer = Layer::new(1, m(vec![vec![3.0], vec![0.0]]), vec![0.0], activation).unwrap();
            let net = Network::new(vec![layer]).unwrap();
            assert_eq!(
                net.predict_proba(&[1.0, 0.0]).unwrap_err(),
                ForwardError::NotAProbability { activation }
            );
            assert!(net.classify(&[1.0, 0.0], 0.5).is_err());
            // The raw trace is still available.
            assert_eq!(net.evaluate(&[1.0, 0.0]).unwrap().output().len(), 1);
        }

        let wide = Layer::new(1, Matrix::zeros(2, 2), vec![0.0; 2], ActivationFunction::Sigmoid).unwrap();
        let net = Network::new(vec![wide]).unwrap();
        assert_eq!(
            net.predict_proba(&[1.0, 0.0]).unwrap_err(),
            ForwardError::mismatch(1, ShapeContext::Output, 1, 2)
        );
    }

    #[test]
    fn logistic_regression_needs_features() {
        assert_eq!(
            Network::logistic_regression(vec![], 0.3).unwrap_err(),
            ForwardError::mismatch(1, ShapeContext::Features, 1, 0)
        );
    }

    #[test]
    fn classify_uses_threshold() {
        let net = Network::logistic_regression(vec![1.0], 0.0).unwrap();
        assert!(net.classify(&[0.0], 0.5).unwrap());
        assert!(!net.classify(&[-0.1], 0.5).unwrap());
    }
}
