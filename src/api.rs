use actix_web::http::StatusCode;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::batch::{BatchEntry, BatchEntryInput};
use crate::error::PredictorError;
use crate::predictor::Predictor;
use crate::record::{FeatureCatalogue, StudentRecord, StudentRecordInput};

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: &'static str,
}

/// HTTP-facing wrapper that renders a [`PredictorError`] as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub PredictorError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<PredictorError> for ApiError {
    fn from(err: PredictorError) -> Self {
        ApiError(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            err if err.is_caller_error() => StatusCode::BAD_REQUEST,
            PredictorError::Remote(_) | PredictorError::RemoteStatus { .. } => StatusCode::BAD_GATEWAY,
            PredictorError::BatchEntry { source, .. }
                if matches!(**source, PredictorError::Remote(_) | PredictorError::RemoteStatus { .. }) =>
            {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.to_string(),
            status: "error",
        })
    }
}

async fn home() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        message: "Student Performance Prediction API",
        status: "Active",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn predict(
    web::Json(input): web::Json<StudentRecordInput>,
    predictor: web::Data<Predictor>,
) -> Result<HttpResponse, ApiError> {
    let record = StudentRecord::try_from(input).map_err(|e| {
        tracing::info!(error = %e, "rejected prediction request");
        e
    })?;
    let response = predictor.predict(&record).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn batch_predict(
    web::Json(students): web::Json<Vec<BatchEntryInput>>,
    predictor: web::Data<Predictor>,
) -> Result<HttpResponse, ApiError> {
    let entries = students
        .into_iter()
        .map(BatchEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let batch = predictor.batch_predict(&entries).await?;
    Ok(HttpResponse::Ok().json(batch))
}

async fn feature_info() -> HttpResponse {
    HttpResponse::Ok().json(FeatureCatalogue::new())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Student Performance Predictor API is running!")
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            ApiError(PredictorError::MalformedRequest(message)).error_response(),
        )
        .into()
    })
}

/// Registers every route; shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(home))
        .route("/predict", web::post().to(predict))
        .route("/batch-predict", web::post().to(batch_predict))
        .route("/feature_info", web::get().to(feature_info))
        .route("/health", web::get().to(health_check));
}

pub async fn start_api(predictor: Predictor, host: &str, port: u16) -> std::io::Result<()> {
    let source = predictor.source();
    let predictor = web::Data::new(predictor);

    tracing::info!(host, port, source, "starting prediction API");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(predictor.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
