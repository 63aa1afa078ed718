use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::predictor::PredictionResponse;
use crate::record::{StudentRecord, StudentRecordInput};

/// A named student as submitted to `/batch-predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEntryInput {
    pub name: String,
    #[serde(flatten)]
    pub record: StudentRecordInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub name: String,
    pub record: StudentRecord,
}

impl BatchEntry {
    pub fn new(name: impl Into<String>, record: StudentRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}

impl TryFrom<BatchEntryInput> for BatchEntry {
    type Error = crate::error::PredictorError;

    fn try_from(input: BatchEntryInput) -> Result<Self> {
        let record = StudentRecord::try_from(input.record).map_err(|e| e.in_batch(&input.name))?;
        Ok(BatchEntry {
            name: input.name,
            record,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPrediction {
    pub name: String,
    pub passed: bool,
    pub prediction_text: String,
    pub probability: f64,
    pub confidence: f64,
    pub top_factor: Option<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_rate: f64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictResponse {
    pub total_students: usize,
    pub predictions: Vec<StudentPrediction>,
    pub summary: BatchSummary,
}

/// Advice for one student given the verdict and the attributes behind it.
pub fn recommendation(record: &StudentRecord, passed: bool, confidence: f64) -> &'static str {
    if passed {
        if confidence > 0.8 {
            "Maintain current study habits"
        } else {
            "Keep building consistent study habits"
        }
    } else if record.studytime() <= 2 {
        "Increase weekly study time"
    } else if record.failures() > 0 {
        "Seek tutoring to address past course failures"
    } else if record.absences() > 10 {
        "Reduce school absences"
    } else {
        "Leverage family and school support systems"
    }
}

impl StudentPrediction {
    pub fn new(entry: &BatchEntry, response: &PredictionResponse) -> Self {
        let passed = response.prediction == 1;
        StudentPrediction {
            name: entry.name.clone(),
            passed,
            prediction_text: response.prediction_text.clone(),
            probability: response.probability.pass,
            confidence: response.confidence,
            top_factor: response.top_factors.first().map(|f| f.description.clone()),
            recommendation: recommendation(&entry.record, passed, response.confidence).to_string(),
        }
    }
}

impl BatchPredictResponse {
    pub fn from_predictions(predictions: Vec<StudentPrediction>) -> Self {
        let total_students = predictions.len();
        let pass_count = predictions.iter().filter(|p| p.passed).count();
        let total_confidence: f64 = predictions.iter().map(|p| p.confidence).sum();

        let (pass_rate, avg_confidence) = if total_students > 0 {
            (
                pass_count as f64 / total_students as f64,
                total_confidence / total_students as f64,
            )
        } else {
            (0.0, 0.0)
        };

        BatchPredictResponse {
            total_students,
            predictions,
            summary: BatchSummary {
                pass_count,
                fail_count: total_students - pass_count,
                pass_rate,
                avg_confidence,
            },
        }
    }
}
