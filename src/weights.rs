use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{PredictorError, Result};

/// The fields that carry an importance weight.
///
/// Declaration order is the tie-break order when two weights are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Feature {
    #[serde(rename = "studytime")]
    StudyTime,
    #[serde(rename = "Fedu")]
    FatherEducation,
    #[serde(rename = "Medu")]
    MotherEducation,
    #[serde(rename = "failures")]
    Failures,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "absences")]
    Absences,
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "famsup")]
    FamilySupport,
    #[serde(rename = "internet")]
    Internet,
    #[serde(rename = "schoolsup")]
    SchoolSupport,
}

impl Feature {
    pub const COUNT: usize = 10;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::StudyTime,
        Feature::FatherEducation,
        Feature::MotherEducation,
        Feature::Failures,
        Feature::Age,
        Feature::Absences,
        Feature::Health,
        Feature::FamilySupport,
        Feature::Internet,
        Feature::SchoolSupport,
    ];

    /// Wire name of the field, matching the record's JSON keys.
    pub fn key(self) -> &'static str {
        match self {
            Feature::StudyTime => "studytime",
            Feature::FatherEducation => "Fedu",
            Feature::MotherEducation => "Medu",
            Feature::Failures => "failures",
            Feature::Age => "age",
            Feature::Absences => "absences",
            Feature::Health => "health",
            Feature::FamilySupport => "famsup",
            Feature::Internet => "internet",
            Feature::SchoolSupport => "schoolsup",
        }
    }

    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Static, record-independent importance per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureWeights {
    weights: [f64; Feature::COUNT],
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            weights: [0.245, 0.154, 0.135, 0.090, 0.078, 0.046, 0.042, 0.038, 0.035, 0.032],
        }
    }
}

impl FeatureWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        self.weights[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(PredictorError::InvalidWeights(format!(
                "weight for `{}` must be a non-negative number, got {}",
                feature.key(),
                weight
            )));
        }
        self.weights[feature.index()] = weight;
        Ok(())
    }

    /// Features ordered by descending weight; equal weights keep declaration order.
    pub fn ranked(&self) -> Vec<(Feature, f64)> {
        let mut ranked: Vec<(Feature, f64)> = Feature::ALL.iter().map(|&f| (f, self.get(f))).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Applies `key = weight` overrides on top of the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: BTreeMap<String, f64> =
            toml::from_str(source).map_err(|e| PredictorError::InvalidWeights(e.to_string()))?;

        let mut weights = FeatureWeights::default();
        for (key, weight) in table {
            let feature = Feature::from_key(&key)
                .ok_or_else(|| PredictorError::InvalidWeights(format!("unknown feature `{}`", key)))?;
            weights.set(feature, weight)?;
        }
        Ok(weights)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let weights = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded feature weight overrides");
        Ok(weights)
    }
}
