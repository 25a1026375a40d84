//! glyphnet CLI
//!
//! Command-line driver for training and evaluating feed-forward glyph
//! classifiers on labelled image data.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use glyphnet::data::{load_file, Instance};
use glyphnet::{
    num_correct, train_instance, train_rounds, LabelCodec, LabelEncoding, Network, RoundStats,
    TrainConfig,
};

#[derive(Parser)]
#[command(name = "glyphnet")]
#[command(about = "Train and evaluate feed-forward glyph classifiers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a classifier and report its test-set accuracy
    Experiment {
        /// File containing training instances
        #[arg(long)]
        train: PathBuf,

        /// File containing test instances
        #[arg(long)]
        test: PathBuf,

        /// File containing validation instances, scored after every round
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Number of training rounds (full passes over the training set)
        #[arg(long)]
        rounds: Option<usize>,

        /// Maximum number of instances to load from each file
        #[arg(long)]
        max_instances: Option<usize>,

        /// The learning rate to use
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Number of hidden units to use
        #[arg(long)]
        hidden: Option<usize>,

        /// Number of input lines (pixels per image)
        #[arg(long)]
        num_inputs: Option<usize>,

        /// Number of classes the labels range over
        #[arg(long)]
        classes: Option<usize>,

        /// Label encoding: distributed or binary
        #[arg(long)]
        encoding: Option<LabelEncoding>,

        /// Scale of the uniform weight initialisation
        #[arg(long)]
        weight_scale: Option<f64>,

        /// Stop training early once validation accuracy plateaus
        #[arg(long)]
        enable_stopping: bool,

        /// JSON config file; explicit flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write per-round stats to this file as pretty JSON
        #[arg(long)]
        stats_out: Option<PathBuf>,
    },

    /// Train a tiny network on the four XOR instances and print its outputs
    Xor {
        /// Number of online passes over the four instances
        #[arg(long, default_value = "5000")]
        passes: usize,

        /// The learning rate to use
        #[arg(long, default_value = "0.5")]
        learning_rate: f64,
    },
}

/// Experiment hyperparameters, loadable from a JSON file via `--config`.
/// Explicit flags override file values; anything left unset falls back to
/// the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ExperimentConfig {
    rounds: usize,
    learning_rate: f64,
    hidden: Option<usize>,
    num_inputs: usize,
    classes: usize,
    encoding: LabelEncoding,
    weight_scale: f64,
    max_instances: Option<usize>,
    enable_stopping: bool,
    /// Rounds without a new best validation accuracy before stopping.
    patience: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            rounds: 10,
            learning_rate: 1.0,
            hidden: None,
            num_inputs: 120,
            classes: 26,
            encoding: LabelEncoding::Distributed,
            weight_scale: 0.01,
            max_instances: None,
            enable_stopping: false,
            patience: 3,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; progress goes to stderr so stdout carries only results.
    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Experiment {
            train,
            test,
            validation,
            rounds,
            max_instances,
            learning_rate,
            hidden,
            num_inputs,
            classes,
            encoding,
            weight_scale,
            enable_stopping,
            config,
            stats_out,
        } => {
            let mut cfg = match config {
                Some(path) => read_config(&path)?,
                None => ExperimentConfig::default(),
            };
            if let Some(rounds) = rounds {
                cfg.rounds = rounds;
            }
            if let Some(rate) = learning_rate {
                cfg.learning_rate = rate;
            }
            if hidden.is_some() {
                cfg.hidden = hidden;
            }
            if let Some(inputs) = num_inputs {
                cfg.num_inputs = inputs;
            }
            if let Some(classes) = classes {
                cfg.classes = classes;
            }
            if let Some(encoding) = encoding {
                cfg.encoding = encoding;
            }
            if let Some(scale) = weight_scale {
                cfg.weight_scale = scale;
            }
            if max_instances.is_some() {
                cfg.max_instances = max_instances;
            }
            if enable_stopping {
                cfg.enable_stopping = true;
            }
            run_experiment(&train, &test, validation.as_deref(), &cfg, stats_out.as_deref())?;
        }

        Commands::Xor {
            passes,
            learning_rate,
        } => {
            learn_xor(passes, learning_rate)?;
        }
    }

    Ok(())
}

fn run_experiment(
    train_path: &Path,
    test_path: &Path,
    validation_path: Option<&Path>,
    cfg: &ExperimentConfig,
    stats_out: Option<&Path>,
) -> Result<()> {
    if cfg.classes == 0 {
        bail!("classes must be at least 1");
    }
    let codec = LabelCodec::new(cfg.encoding, cfg.classes);

    let train_set = load_set(train_path, cfg)?;
    let test_set = load_set(test_path, cfg)?;
    let validation_set = validation_path.map(|path| load_set(path, cfg)).transpose()?;
    if train_set.is_empty() {
        bail!("{} contains no instances", train_path.display());
    }
    if test_set.is_empty() {
        bail!("{} contains no instances", test_path.display());
    }

    // A two-element width list builds the zero-layer identity network, which
    // cannot learn anything.
    let hidden = match cfg.hidden {
        Some(units) => units,
        None => bail!(
            "a network without a hidden layer has no trainable weights; \
             pass --hidden or set \"hidden\" in the config"
        ),
    };
    let widths = [cfg.num_inputs, hidden, codec.target_width()];
    info!(
        num_inputs = cfg.num_inputs,
        hidden,
        outputs = codec.target_width(),
        encoding = %cfg.encoding,
        weight_scale = cfg.weight_scale,
        "building network"
    );
    let mut network = Network::build(&widths, cfg.weight_scale)?;

    info!(
        rounds = cfg.rounds,
        learning_rate = cfg.learning_rate,
        "training configuration"
    );
    let mut train_config = TrainConfig::new(cfg.rounds, cfg.learning_rate);
    if cfg.enable_stopping {
        train_config = train_config.with_early_stopping(cfg.patience);
    }

    let stats = train_rounds(
        &mut network,
        &train_set,
        validation_set.as_deref(),
        &codec,
        &train_config,
    )?;

    if let Some(path) = stats_out {
        write_stats(path, &stats)?;
    }

    let correct = num_correct(&network, &test_set, &codec)?;
    let total = test_set.len();
    println!(
        "correct: {correct} out of {total} ({:.1}%)",
        100.0 * correct as f64 / total as f64
    );
    Ok(())
}

/// Loads one dataset file and checks every instance against the configured
/// input width and class count, so the core never sees a malformed instance.
fn load_set(path: &Path, cfg: &ExperimentConfig) -> Result<Vec<Instance>> {
    let instances = load_file(path, cfg.max_instances)
        .with_context(|| format!("failed to load {}", path.display()))?;
    info!(count = instances.len(), file = %path.display(), "loaded instances");
    for (position, instance) in instances.iter().enumerate() {
        if instance.features.len() != cfg.num_inputs {
            bail!(
                "{}: instance {} has {} features, expected {}",
                path.display(),
                position + 1,
                instance.features.len(),
                cfg.num_inputs
            );
        }
        if instance.label >= cfg.classes {
            bail!(
                "{}: instance {} has label {} outside 0..{}",
                path.display(),
                position + 1,
                instance.label,
                cfg.classes
            );
        }
    }
    Ok(instances)
}

fn read_config(path: &Path) -> Result<ExperimentConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cfg = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid experiment config", path.display()))?;
    Ok(cfg)
}

fn write_stats(path: &Path, stats: &[RoundStats]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), stats)?;
    info!(file = %path.display(), "wrote per-round stats");
    Ok(())
}

/// The classic sanity check: teach a 2-2-1 network XOR, then print each
/// target next to what the network actually produces.
fn learn_xor(passes: usize, learning_rate: f64) -> Result<()> {
    let instances = [
        (Instance::new(0, vec![-1.0, -1.0]), 0.1),
        (Instance::new(1, vec![-1.0, 1.0]), 0.9),
        (Instance::new(1, vec![1.0, -1.0]), 0.9),
        (Instance::new(0, vec![1.0, 1.0]), 0.1),
    ];
    let mut network = Network::build(&[2, 2, 1], 0.5)?;
    for _ in 0..passes {
        for (instance, target) in &instances {
            train_instance(&mut network, instance, learning_rate, &[*target])?;
        }
    }
    for (instance, target) in &instances {
        let output = network.feed_forward(&instance.features)?;
        println!("{target} {:.6}", output[0]);
    }
    Ok(())
}
