use serde::{Deserialize, Serialize};

use crate::batch::{BatchEntry, BatchPredictResponse, StudentPrediction};
use crate::error::Result;
use crate::factors::RankedFactor;
use crate::model::{PredictionResult, Scorer};
use crate::record::StudentRecord;
use crate::remote::RemoteClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySplit {
    pub pass: f64,
    pub fail: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorImportance {
    pub feature: String,
    #[serde(default)]
    pub description: String,
    pub importance: f64,
    #[serde(default)]
    pub base_importance: f64,
}

impl From<&RankedFactor> for FactorImportance {
    fn from(factor: &RankedFactor) -> Self {
        FactorImportance {
            feature: factor.feature.key().to_string(),
            description: factor.description.clone(),
            importance: factor.importance,
            base_importance: factor.base_weight,
        }
    }
}

fn success() -> String {
    "success".to_string()
}

/// JSON body returned by `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// 1 for pass, 0 for fail.
    pub prediction: u8,
    pub prediction_text: String,
    pub confidence: f64,
    pub probability: ProbabilitySplit,
    pub top_factors: Vec<FactorImportance>,
    #[serde(default = "success")]
    pub status: String,
}

impl From<&PredictionResult> for PredictionResponse {
    fn from(result: &PredictionResult) -> Self {
        PredictionResponse {
            prediction: u8::from(result.verdict.is_pass()),
            prediction_text: result.verdict.label().to_string(),
            confidence: result.confidence,
            probability: ProbabilitySplit {
                pass: result.probability,
                fail: 1.0 - result.probability,
            },
            top_factors: result.ranked_factors.iter().map(FactorImportance::from).collect(),
            status: success(),
        }
    }
}

/// Where predictions come from: the in-process scorer or a remote service.
#[derive(Debug, Clone)]
pub enum Predictor {
    Local(Scorer),
    Remote(RemoteClient),
}

impl Predictor {
    pub fn source(&self) -> &'static str {
        match self {
            Predictor::Local(_) => "local",
            Predictor::Remote(_) => "remote",
        }
    }

    pub async fn predict(&self, record: &StudentRecord) -> Result<PredictionResponse> {
        match self {
            Predictor::Local(scorer) => Ok(PredictionResponse::from(&scorer.score(record))),
            Predictor::Remote(client) => client.predict(record).await,
        }
    }

    /// Scores every entry in order. The first failure aborts the batch.
    pub async fn batch_predict(&self, entries: &[BatchEntry]) -> Result<BatchPredictResponse> {
        let mut predictions = Vec::with_capacity(entries.len());
        for entry in entries {
            let response = self.predict(&entry.record).await.map_err(|e| e.in_batch(&entry.name))?;
            predictions.push(StudentPrediction::new(entry, &response));
        }

        let batch = BatchPredictResponse::from_predictions(predictions);
        tracing::info!(
            source = self.source(),
            total = batch.total_students,
            passed = batch.summary.pass_count,
            "batch scored"
        );
        Ok(batch)
    }
}
