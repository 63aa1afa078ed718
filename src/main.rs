use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use student_predictor::record::FeatureCatalogue;
use student_predictor::{api, data, Predictor, StudentRecord, StudentRecordInput};

mod cli;
use cli::{Args, Command};

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            std::env::var("STUDENT_PREDICTOR_LOG")
                .unwrap_or_else(|_| "student_predictor=info,actix_web=info".into()),
        )
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Student Performance Predictor starting");

    let settings = args.settings();
    let predictor = || settings.predictor().context("failed to configure predictor");

    match args.command {
        Command::Serve { host, port } => {
            api::start_api(predictor()?, &host, port).await?;
            Ok(())
        }
        Command::Predict { input } => predict_one(&predictor()?, input).await,
        Command::Batch { csv } => predict_batch(&predictor()?, csv).await,
        Command::Features => print_json(&FeatureCatalogue::new()),
    }
}

async fn predict_one(predictor: &Predictor, input: Option<PathBuf>) -> Result<()> {
    let record = match input {
        Some(path) => {
            let source = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let input: StudentRecordInput = serde_json::from_str(&source)
                .with_context(|| format!("{} is not a valid student record", path.display()))?;
            StudentRecord::try_from(input)?
        }
        None => {
            tracing::info!("no input given, scoring the sample student");
            StudentRecord::sample()
        }
    };

    let response = predictor.predict(&record).await?;
    print_json(&response)
}

async fn predict_batch(predictor: &Predictor, csv: PathBuf) -> Result<()> {
    let entries = data::load_entries(&csv)?;
    let batch = predictor.batch_predict(&entries).await?;
    print_json(&batch)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
