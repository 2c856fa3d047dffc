use mlp_trace::{network::worked_example, report, ReportConfig};

fn main() {
    env_logger::init();

    let mlp = worked_example::mlp().expect("built-in parameters are well-formed");
    let logit = worked_example::logistic_regression().expect("built-in parameters are well-formed");
    let config = ReportConfig::default();

    let trace = mlp.evaluate(&worked_example::INPUT).expect("input has two features");
    print!("{}", report::render(&mlp, &trace, &config));

    // Each hidden unit by hand, to show the matrix product is nothing more.
    println!("\nFirst hidden layer, unit by unit:");
    let layer = &mlp.layers[0];
    for unit in 0..layer.size() {
        let terms: Vec<String> = worked_example::INPUT
            .iter()
            .enumerate()
            .map(|(i, x)| format!("{x:.0}*{:.2}", layer.weights.data[i][unit]))
            .collect();
        let z = trace.layers[0].pre_activation[unit];
        println!(
            "  h{} = max({} + {:.2}, 0) = max({z:.2}, 0) = {:.2}",
            unit + 1,
            terms.join(" + "),
            layer.biases.data[0][unit],
            z.max(0.0)
        );
    }

    println!("\nSame patient through the logistic regression:");
    let trace = logit.evaluate(&worked_example::INPUT).expect("input has two features");
    print!("{}", report::render(&logit, &trace, &config));

    let inputs = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
    println!("\nAll feature combinations (MLP vs. logistic):");
    for input in &inputs {
        let p_mlp = mlp.predict_proba(input).expect("input has two features");
        let p_logit = logit.predict_proba(input).expect("input has two features");
        println!("  {input:?} -> {p_mlp:.4} vs. {p_logit:.4}");
    }
}
