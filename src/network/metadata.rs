use serde::{Deserialize, Serialize};

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so bare parameter files deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// One name per input feature, in input order (e.g. ["AUD", "NUD"]).
    pub feature_names: Option<Vec<String>>,
    /// What a prediction of 1.0 stands for.
    pub positive_label: Option<String>,
}
