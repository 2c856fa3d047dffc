pub mod metadata;
pub mod network;
pub mod trace;
pub mod worked_example;

pub use metadata::ModelMetadata;
pub use network::Network;
pub use trace::{ForwardTrace, LayerTrace};
