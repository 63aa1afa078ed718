use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictorError>;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has value {value}, expected {domain}")]
    DomainViolation {
        field: &'static str,
        value: String,
        domain: String,
    },

    #[error("invalid feature weights: {0}")]
    InvalidWeights(String),

    #[error("record `{name}`: {source}")]
    BatchEntry {
        name: String,
        #[source]
        source: Box<PredictorError>,
    },

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("prediction service unreachable: {0}")]
    Remote(String),

    #[error("prediction service returned status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictorError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_caller_error(&self) -> bool {
        match self {
            PredictorError::MissingField(_)
            | PredictorError::DomainViolation { .. }
            | PredictorError::MalformedRequest(_) => true,
            PredictorError::BatchEntry { source, .. } => source.is_caller_error(),
            _ => false,
        }
    }

    pub(crate) fn in_batch(self, name: &str) -> Self {
        PredictorError::BatchEntry {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}
