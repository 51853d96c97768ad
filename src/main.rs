use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{info, Level};
use tracing::subscriber::SetGlobalDefaultError;

use ferrite_online::train::train_and_test_with;
use ferrite_online::{MnistDataSet, Network, RunConfig};

/// Train a 3-layer sigmoid network online on integer CSV records and report
/// its hit rate on the test file.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON run configuration; omitted fields keep the MNIST defaults
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the record files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,
    #[arg(long, value_name = "FILE")]
    train: Option<String>,
    #[arg(long, value_name = "FILE")]
    validation: Option<String>,
    #[arg(long, value_name = "FILE")]
    test: Option<String>,
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    #[arg(long, value_name = "INT")]
    hidden: Option<usize>,
    #[arg(short, long, value_name = "REAL")]
    learning_rate: Option<f64>,
    /// Log each opened file and every record read (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load_json(&path.to_string_lossy())?,
            None => RunConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            cfg.dataset.path_name = dir.clone();
        }
        if let Some(name) = &self.train {
            cfg.dataset.training_file_name = name.clone();
        }
        if let Some(name) = &self.validation {
            cfg.dataset.validation_file_name = name.clone();
        }
        if let Some(name) = &self.test {
            cfg.dataset.test_file_name = name.clone();
        }
        if let Some(epochs) = self.epochs {
            cfg.network.epochs = epochs;
        }
        if let Some(hidden) = self.hidden {
            cfg.network.hidden_nodes = hidden;
        }
        if let Some(lr) = self.learning_rate {
            cfg.network.learning_rate = lr;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}

fn install_logger(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    install_logger(cli.log_level())?;

    let cfg = cli.run_config()?;

    let start = Instant::now();
    info!(
        epochs = cfg.network.epochs,
        hidden = cfg.network.hidden_nodes,
        learning_rate = cfg.network.learning_rate,
        "starting run"
    );

    let mut network = Network::new(cfg.network.clone());
    let mut data_set = MnistDataSet::new(cfg.dataset.clone())?;
    let report = train_and_test_with(&mut network, &mut data_set, cfg.dataset.has_validation())?;

    if let Some(v) = report.validation_accuracy {
        println!("Validation hit rate: {:.2}%", v * 100.0);
    }
    println!(
        "Hit rate: {:.2}% ({} of {} correct)",
        report.accuracy * 100.0,
        report.test_score.successes,
        report.test_score.total()
    );
    println!("used time: {:?}", start.elapsed());
    Ok(())
}
