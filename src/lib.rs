//! Explainable student pass/fail risk scoring.
//!
//! A [`Scorer`] maps a validated [`StudentRecord`] to a [`PredictionResult`]:
//! a bounded probability, a verdict, a floored confidence and the five
//! heaviest features explained for that record. The [`api`] module serves it
//! over HTTP and [`RemoteClient`] lets a remote service stand in for it.

pub mod api;
pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod factors;
pub mod jitter;
pub mod model;
pub mod predictor;
pub mod record;
pub mod remote;
pub mod weights;

pub use batch::{BatchEntry, BatchPredictResponse};
pub use config::{JitterMode, Settings};
pub use error::{PredictorError, Result};
pub use factors::RankedFactor;
pub use jitter::{FixedJitter, JitterSource, SeededJitter, ThreadRngJitter};
pub use model::{PredictionResult, Scorer, Verdict};
pub use predictor::{PredictionResponse, Predictor};
pub use record::{StudentRecord, StudentRecordInput};
pub use remote::RemoteClient;
pub use weights::{Feature, FeatureWeights};
