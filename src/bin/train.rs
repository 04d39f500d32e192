//! Trains the network on a CSV dataset and prints the learned parameters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use irisnet::{data, ActivationType, Network, NetworkConfig, Normalization, Vocabulary};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Softmax {
    /// Normalize over the whole output matrix
    Global,
    /// Normalize each sample separately
    Rows,
}

#[derive(Parser)]
#[command(name = "irisnet-train")]
#[command(about = "Train a single-hidden-layer classifier on a CSV dataset", long_about = None)]
struct Cli {
    /// Path to training data (header row, features, then a class label)
    #[arg(short, long, default_value = "train.csv")]
    data: PathBuf,

    /// Hidden layer width
    #[arg(long, default_value = "3")]
    hidden: usize,

    /// Number of training epochs
    #[arg(short, long, default_value = "5000")]
    epochs: usize,

    /// Learning rate
    #[arg(short, long, default_value = "0.3")]
    learning_rate: f64,

    /// Seed for parameter initialization; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use a sigmoid hidden layer instead of ReLU
    #[arg(long)]
    sigmoid: bool,

    #[arg(long, value_enum, default_value = "global")]
    softmax: Softmax,

    /// Verbosity level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let vocabulary = Vocabulary::iris();
    let dataset = data::load_csv(&cli.data, &vocabulary)
        .with_context(|| format!("Failed to load dataset from {:?}", cli.data))?;
    info!(samples = dataset.len(), features = dataset.feature_count(), "dataset loaded");

    let config = NetworkConfig {
        input_neurons: dataset.feature_count(),
        output_neurons: vocabulary.len(),
        hidden_neurons: cli.hidden,
        num_epochs: cli.epochs,
        learning_rate: cli.learning_rate,
        hidden_activation: if cli.sigmoid {
            ActivationType::Sigmoid
        } else {
            ActivationType::ReLU
        },
        normalization: match cli.softmax {
            Softmax::Global => Normalization::Global,
            Softmax::Rows => Normalization::PerRow,
        },
        ..Default::default()
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut network = Network::new(config);
    let report = network
        .train(&dataset.inputs, &dataset.labels, &mut rng)
        .context("Training failed")?;
    let accuracy = network.accuracy(&dataset.inputs, &dataset.labels)?;
    info!(epochs = report.epochs_run, final_loss = ?report.final_loss, accuracy, "done");

    if let Some(params) = network.parameters() {
        println!("{}", params);
    }

    Ok(())
}
