//! mlp-trace
//!
//! Prints a layer-by-layer forward pass for a fitted classifier.
//!
//! Usage:
//!   mlp-trace                      # built-in 2 -> 4 -> 2 -> 1 model, input [1, 0]
//!   mlp-trace MODEL.json           # saved model, input of zeros
//!   mlp-trace MODEL.json 1,0       # saved model, given input
//!   mlp-trace --logistic 1,0       # built-in logistic regression
//!
//! Set RUST_LOG=debug to see per-layer log events.

use std::env;
use std::error::Error;

use log::info;
use mlp_trace::{network::worked_example, report, Network, ReportConfig};

fn parse_input(arg: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    arg.split(',').map(|s| s.trim().parse::<f64>()).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let (network, input) = match args.first().map(String::as_str) {
        None => (worked_example::mlp()?, worked_example::INPUT.to_vec()),
        Some("--logistic") => {
            let input = match args.get(1) {
                Some(arg) => parse_input(arg)?,
                None => worked_example::INPUT.to_vec(),
            };
            (worked_example::logistic_regression()?, input)
        }
        Some(path) => {
            let network = Network::load_json(path)?;
            let input = match args.get(1) {
                Some(arg) => parse_input(arg)?,
                None => vec![0.0; network.input_size()],
            };
            (network, input)
        }
    };

    info!("evaluating {} layer network on {input:?}", network.layers.len());
    let trace = network.evaluate(&input)?;
    print!("{}", report::render(&network, &trace, &ReportConfig::default()));

    Ok(())
}
