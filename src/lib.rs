pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod error;
pub mod report;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::trace::{ForwardTrace, LayerTrace};
pub use network::metadata::ModelMetadata;
pub use error::{ForwardError, ShapeContext};
pub use report::ReportConfig;
