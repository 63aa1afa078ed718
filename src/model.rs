use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::factors::{self, RankedFactor};
use crate::jitter::{JitterSource, ThreadRngJitter, JITTER_AMPLITUDE};
use crate::record::{StudentRecord, StudentRecordInput};
use crate::weights::{Feature, FeatureWeights};

pub const BASE_PROBABILITY: f64 = 0.5;
pub const DECISION_THRESHOLD: f64 = 0.5;
pub const MIN_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        if probability > DECISION_THRESHOLD {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub verdict: Verdict,
    pub probability: f64,
    pub confidence: f64,
    pub ranked_factors: Vec<RankedFactor>,
}

/// One additive component of the score: a raw impact scaled by a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTerm {
    StudyTime,
    ParentEducation,
    Failures,
    Age,
    Health,
    Absences,
    FamilySupport,
    SchoolSupport,
    Internet,
}

impl ScoreTerm {
    pub const ALL: [ScoreTerm; 9] = [
        ScoreTerm::StudyTime,
        ScoreTerm::ParentEducation,
        ScoreTerm::Failures,
        ScoreTerm::Age,
        ScoreTerm::Health,
        ScoreTerm::Absences,
        ScoreTerm::FamilySupport,
        ScoreTerm::SchoolSupport,
        ScoreTerm::Internet,
    ];

    /// Unweighted contribution of this term for `record`.
    pub fn raw_impact(self, record: &StudentRecord) -> f64 {
        match self {
            ScoreTerm::StudyTime => (f64::from(record.studytime()) - 1.0) * 0.15,
            ScoreTerm::ParentEducation => {
                let combined = f64::from(record.mother_education()) + f64::from(record.father_education());
                (combined / 8.0) * 0.3
            }
            ScoreTerm::Failures => f64::from(record.failures()) * -0.2,
            ScoreTerm::Age => (f64::from(record.age()) - 15.0) / 4.0 * 0.1,
            ScoreTerm::Health => (f64::from(record.health()) - 1.0) / 4.0 * 0.1,
            ScoreTerm::Absences => -(f64::from(record.absences()) / 20.0).min(1.0) * 0.15,
            ScoreTerm::FamilySupport => bonus(record.family_support(), 0.05),
            ScoreTerm::SchoolSupport => bonus(record.school_support(), 0.03),
            ScoreTerm::Internet => bonus(record.internet(), 0.03),
        }
    }

    /// Weight applied to the raw impact. Parental education is scaled once by
    /// the sum of both parents' weights.
    pub fn weight(self, weights: &FeatureWeights) -> f64 {
        match self {
            ScoreTerm::StudyTime => weights.get(Feature::StudyTime),
            ScoreTerm::ParentEducation => {
                weights.get(Feature::MotherEducation) + weights.get(Feature::FatherEducation)
            }
            ScoreTerm::Failures => weights.get(Feature::Failures),
            ScoreTerm::Age => weights.get(Feature::Age),
            ScoreTerm::Health => weights.get(Feature::Health),
            ScoreTerm::Absences => weights.get(Feature::Absences),
            ScoreTerm::FamilySupport => weights.get(Feature::FamilySupport),
            ScoreTerm::SchoolSupport => weights.get(Feature::SchoolSupport),
            ScoreTerm::Internet => weights.get(Feature::Internet),
        }
    }

    pub fn impact(self, record: &StudentRecord, weights: &FeatureWeights) -> f64 {
        self.raw_impact(record) * self.weight(weights)
    }
}

fn bonus(flag: bool, amount: f64) -> f64 {
    if flag {
        amount
    } else {
        -amount
    }
}

pub fn confidence_for(probability: f64) -> f64 {
    ((probability - DECISION_THRESHOLD).abs() * 2.0).max(MIN_CONFIDENCE)
}

/// Explainable pass/fail scorer.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads. The jitter source is the only thing consulted per call.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: FeatureWeights,
    jitter: Arc<dyn JitterSource>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(FeatureWeights::default(), Arc::new(ThreadRngJitter))
    }
}

impl Scorer {
    pub fn new(weights: FeatureWeights, jitter: Arc<dyn JitterSource>) -> Self {
        Self { weights, jitter }
    }

    pub fn with_jitter(jitter: impl JitterSource + 'static) -> Self {
        Self::new(FeatureWeights::default(), Arc::new(jitter))
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Probability before jitter and clamping.
    pub fn base_probability(&self, record: &StudentRecord) -> f64 {
        BASE_PROBABILITY
            + ScoreTerm::ALL
                .iter()
                .map(|term| term.impact(record, &self.weights))
                .sum::<f64>()
    }

    pub fn score(&self, record: &StudentRecord) -> PredictionResult {
        let noise = self.jitter.draw().clamp(-JITTER_AMPLITUDE, JITTER_AMPLITUDE);
        let probability = (self.base_probability(record) + noise).clamp(0.0, 1.0);
        let verdict = Verdict::from_probability(probability);
        let confidence = confidence_for(probability);

        tracing::debug!(probability, confidence, verdict = verdict.label(), "scored student record");

        PredictionResult {
            verdict,
            probability,
            confidence,
            ranked_factors: factors::rank_factors(record, &self.weights),
        }
    }

    /// Validates raw input and scores it.
    pub fn score_input(&self, input: StudentRecordInput) -> Result<PredictionResult> {
        let record = StudentRecord::try_from(input)?;
        Ok(self.score(&record))
    }
}
