use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use env_logger::{Builder, Env};
use log::{debug, info};
use polars::prelude::*;

use insurance_premium::artifacts::load_predictor;
use insurance_premium::config::PredictArgs;
use insurance_premium::{InsuranceRecord, PremiumError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = PredictArgs::parse();

    let env = Env::new().filter("PREMIUM_LOG");
    Builder::new()
        .filter(Some("insurance_premium"), cli.log_level())
        .filter(Some("premium_predict"), cli.log_level())
        .parse_env(env)
        .init();

    debug!("Arguments {:#?}", cli);

    let start_time = Instant::now();
    let predictor = load_predictor(&cli.artifact_paths()).await?;
    info!("artifacts loaded in {:?}", start_time.elapsed());

    let record = read_record(cli.input.as_deref())?;
    if !cli.skip_form_checks {
        record.validate_form()?;
    }

    let prediction = predictor.predict_detailed(&record)?;
    if let Some(path) = &cli.features_out {
        let mut df = prediction.features.frame().clone();
        write_csv(path, &mut df)?;
        info!("feature row written to {:?}", path);
    }

    println!(
        "{}",
        serde_json::json!({ "premium": prediction.premium, "bundle": prediction.bundle })
    );
    Ok(())
}

fn read_record(input: Option<&Path>) -> Result<InsuranceRecord, PremiumError> {
    let mut text = String::new();
    let read = match input {
        Some(path) => File::open(path).and_then(|mut file| file.read_to_string(&mut text)),
        None => std::io::stdin().read_to_string(&mut text),
    };
    read.map_err(|source| PremiumError::Io {
        path: input.map(Path::to_path_buf).unwrap_or_else(|| "<stdin>".into()),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file).finish(df)?;

    Ok(())
}
