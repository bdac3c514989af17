//! CLI demo for the scalar autodiff engine.
//!
//! Builds small expression graphs, runs the backward pass, prints the layered
//! graph view, and trains a tiny MLP with plain gradient descent.

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sg_core::graph::{log_graph, render};
use sg_core::{
    add, check_gradients, finite_diff_grad, leaf, max_grad_error, multiply, tanh, Value,
};
use sg_nn::{sse_loss, Mlp, Module, Neuron, Sgd};

#[derive(Parser)]
#[command(name = "sg")]
#[command(about = "Scalar reverse-mode autodiff demos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Differentiate a single tanh neuron and print its graph
    Neuron,

    /// Run one forward/backward pass through a 3 -> 4 -> 4 -> 1 MLP
    Mlp {
        /// Seed for parameter initialization
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Train the MLP on the four-sample demo dataset
    Train {
        /// Seed for parameter initialization
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Number of gradient descent steps
        #[arg(long, default_value = "50")]
        steps: usize,

        /// Step size for the parameter update
        #[arg(long, default_value = "0.05")]
        learning_rate: f64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Neuron => run_neuron(),
        Commands::Mlp { seed } => run_mlp(seed),
        Commands::Train {
            seed,
            steps,
            learning_rate,
        } => run_train(seed, steps, learning_rate),
    }
}

fn neuron_graph(v: &[Value]) -> Value {
    // tanh(x1*w1 + x2*w2 + b)
    let w1x1 = multiply(&v[2], &v[0]);
    let w2x2 = multiply(&v[3], &v[1]);
    tanh(&add(&add(&w1x1, &w2x2), &v[4]))
}

fn run_neuron() -> Result<()> {
    println!("=== Single Neuron ===\n");

    // inputs x1, x2; weights w1, w2; bias b
    let point = [2.0, 0.0, -3.0, 1.0, 6.8813735870195432];
    let names = ["x1", "x2", "w1", "w2", "b"];
    let inputs: Vec<Value> = point.iter().map(|&v| leaf(v)).collect();

    let o = neuron_graph(&inputs);
    o.backward();

    println!("o = tanh(x1*w1 + x2*w2 + b) = {:.10}\n", o.value());
    for (name, input) in names.iter().zip(&inputs) {
        println!("  do/d{:<2} = {:.10}", name, input.grad());
    }
    println!("\n{}", render(&o));

    let fd = finite_diff_grad(
        |vals: &[f64]| {
            let leaves: Vec<Value> = vals.iter().map(|&v| leaf(v)).collect();
            neuron_graph(&leaves).value()
        },
        &point,
        1e-7,
    );
    let grads: Vec<f64> = inputs.iter().map(Value::grad).collect();
    println!("Max |autodiff - fd| (eps=1e-7): {:.2e}", max_grad_error(&grads, &fd));

    check_gradients(neuron_graph, &point, 1e-6, 1e-4)?;
    info!("gradients agree with finite differences");
    Ok(())
}

fn run_mlp(seed: u64) -> Result<()> {
    println!("=== MLP 3 -> 4 -> 4 -> 1 (seed {}) ===\n", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);
    let x: Vec<Value> = [2.0, 3.0, -1.0].iter().map(|&v| leaf(v)).collect();

    let out = mlp.forward(&x)?;
    out[0].backward();

    for (i, layer) in mlp.layers.iter().enumerate() {
        let nin = layer.neurons.first().map_or(0, Neuron::nin);
        println!("layer {}: {} -> {}", i, nin, layer.nout());
    }
    println!("output = {:.10}", out[0].value());
    println!("parameters = {}", mlp.parameters().len());
    println!("graph nodes = {}", sg_core::topological_order(&out[0]).len());

    info!("set RUST_LOG=debug to dump the full graph");
    log_graph(&out[0]);
    Ok(())
}

fn run_train(seed: u64, steps: usize, learning_rate: f64) -> Result<()> {
    ensure!(learning_rate > 0.0, "learning rate must be positive, got {}", learning_rate);

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let mut rng = StdRng::seed_from_u64(seed);
    let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);
    let opt = Sgd::new(learning_rate);
    let params = mlp.parameters();
    info!(
        "training {} parameters for {} steps, learning rate {}",
        params.len(),
        steps,
        learning_rate
    );

    let mut preds = Vec::new();
    for step in 0..steps {
        // the graph is rebuilt every step from the updated parameter leaves
        preds.clear();
        for x in &xs {
            let input: Vec<Value> = x.iter().map(|&v| leaf(v)).collect();
            preds.push(mlp.forward(&input)?[0].clone());
        }
        let targets: Vec<Value> = ys.iter().map(|&y| leaf(y)).collect();
        let loss = sse_loss(&preds, &targets)?;

        opt.zero_grad(&params);
        loss.backward();
        opt.step(&params);

        info!("step {:3}: loss = {:.6}", step, loss.value());
        debug!(
            "predictions: {:?}",
            preds.iter().map(Value::value).collect::<Vec<_>>()
        );
    }

    println!("\nfinal predictions vs targets:");
    for (x, y) in xs.iter().zip(ys) {
        let input: Vec<Value> = x.iter().map(|&v| leaf(v)).collect();
        let pred = mlp.forward(&input)?[0].value();
        println!("  {:?} -> {:+.4} (target {:+.1})", x, pred, y);
    }
    Ok(())
}
