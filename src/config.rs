use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::jitter::{FixedJitter, JitterSource, SeededJitter, ThreadRngJitter};
use crate::model::Scorer;
use crate::predictor::Predictor;
use crate::remote::{RemoteClient, DEFAULT_TIMEOUT};
use crate::weights::FeatureWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JitterMode {
    #[default]
    Random,
    Seeded(u64),
    Disabled,
}

impl JitterMode {
    pub fn source(self) -> Arc<dyn JitterSource> {
        match self {
            JitterMode::Random => Arc::new(ThreadRngJitter),
            JitterMode::Seeded(seed) => Arc::new(SeededJitter::new(seed)),
            JitterMode::Disabled => Arc::new(FixedJitter(0.0)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub weights_path: Option<PathBuf>,
    pub jitter: JitterMode,
    pub remote_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weights_path: None,
            jitter: JitterMode::Random,
            remote_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn scorer(&self) -> Result<Scorer> {
        let weights = match &self.weights_path {
            Some(path) => FeatureWeights::load(path)?,
            None => FeatureWeights::default(),
        };
        Ok(Scorer::new(weights, self.jitter.source()))
    }

    /// A remote URL takes precedence over the local scorer.
    pub fn predictor(&self) -> Result<Predictor> {
        let predictor = match &self.remote_url {
            Some(url) => Predictor::Remote(RemoteClient::new(url.clone(), self.timeout)?),
            None => Predictor::Local(self.scorer()?),
        };
        tracing::info!(source = predictor.source(), jitter = ?self.jitter, "predictor configured");
        Ok(predictor)
    }
}
