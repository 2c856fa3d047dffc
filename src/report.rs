//! Plain-text rendering of a forward pass.
//!
//! Rounding happens only on the way to the string; the trace and the
//! network are never modified.

use std::fmt::Write;

use crate::network::{network::Network, trace::ForwardTrace};

/// Display options for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Decimal places shown for every number.
    pub precision: usize,
    /// Also print each layer's weights (one row per unit) and biases.
    pub show_parameters: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            precision: 2,
            show_parameters: true,
        }
    }
}

fn round_to(x: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    // `+ 0.0` folds -0.0 into 0.0 so rounded negatives print without a sign.
    (x * scale).round() / scale + 0.0
}

fn fmt_vec(values: &[f64], precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|&x| format!("{:.*}", precision, round_to(x, precision)))
        .collect();
    format!("[{}]", parts.join(", "))
}

pub fn render(network: &Network, trace: &ForwardTrace, config: &ReportConfig) -> String {
    let p = config.precision;
    let mut out = String::new();

    if let Some(desc) = network.metadata.as_ref().and_then(|m| m.description.as_ref()) {
        let _ = writeln!(out, "Model: {desc}");
    }

    let features = network
        .metadata
        .as_ref()
        .and_then(|m| m.feature_names.as_ref())
        .map(|names| format!(" [{}]", names.join(", ")))
        .unwrap_or_default();
    let _ = writeln!(out, "Input{features}: {}", fmt_vec(&trace.input, p));

    for (layer, step) in network.layers.iter().zip(&trace.layers) {
        let role = if step.index == trace.layers.len() { "output" } else { "hidden" };
        let _ = writeln!(
            out,
            "\nLayer {} ({role}, {}, {} -> {})",
            step.index,
            step.activation.name(),
            layer.input_size(),
            layer.size()
        );

        if config.show_parameters {
            let by_unit = layer.weights.transpose().map(|x| round_to(x, p));
            let _ = writeln!(out, "  weights (per unit):");
            for row in &by_unit.data {
                let _ = writeln!(out, "    {}", fmt_vec(row, p));
            }
            let _ = writeln!(out, "  bias: {}", fmt_vec(&layer.biases.data[0], p));
        }

        let _ = writeln!(out, "  pre-activation:  {}", fmt_vec(&step.pre_activation, p));
        let _ = writeln!(out, "  post-activation: {}", fmt_vec(&step.post_activation, p));
    }

    if let Some(prob) = trace.prediction() {
        let label = network
            .metadata
            .as_ref()
            .and_then(|m| m.positive_label.as_deref())
            .unwrap_or("positive class");
        let _ = writeln!(out, "\nP({label}) = {:.*}", p, round_to(prob, p));
    }

    out
}
