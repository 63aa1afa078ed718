use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use student_predictor::{JitterMode, Settings};

#[derive(Debug, Parser)]
#[command(name = "student-predictor", version, about = "Explainable student pass/fail risk scoring")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file of `feature = weight` overrides
    #[arg(long, global = true, env = "STUDENT_PREDICTOR_WEIGHTS")]
    pub weights: Option<PathBuf>,

    /// Seed the jitter source for reproducible scores
    #[arg(long, global = true, env = "STUDENT_PREDICTOR_SEED", conflicts_with = "no_jitter")]
    pub seed: Option<u64>,

    /// Score without the random perturbation
    #[arg(long, global = true, env = "STUDENT_PREDICTOR_NO_JITTER")]
    pub no_jitter: bool,

    /// Base URL of a remote prediction service to use instead of the local scorer
    #[arg(long, global = true, env = "STUDENT_PREDICTOR_REMOTE")]
    pub remote: Option<String>,

    #[arg(long, global = true, env = "STUDENT_PREDICTOR_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the prediction API over HTTP
    Serve {
        #[arg(long, env = "STUDENT_PREDICTOR_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "STUDENT_PREDICTOR_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Score one record (JSON file, or the sample student when omitted)
    Predict {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Score every row of a CSV file
    Batch { csv: PathBuf },
    /// Print the accepted fields and their domains
    Features,
}

impl Args {
    pub fn settings(&self) -> Settings {
        let jitter = match (self.no_jitter, self.seed) {
            (true, _) => JitterMode::Disabled,
            (false, Some(seed)) => JitterMode::Seeded(seed),
            (false, None) => JitterMode::Random,
        };

        Settings {
            weights_path: self.weights.clone(),
            jitter,
            remote_url: self.remote.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
