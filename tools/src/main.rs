//! dataset-runner: headless generator for the synthetic fraud training set.
//!
//! Usage:
//!   dataset-runner
//!   dataset-runner --config data/generator_config.json --output out.csv
//!   dataset-runner --seed 7 --rows 50000 --summary-json run.json

use anyhow::{Context, Result};
use fraudgen_core::{
    config::GeneratorConfig,
    generator::{DatasetGenerator, RunSummary},
};
use std::env;

#[derive(serde::Serialize)]
struct RunManifest<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    version: &'static str,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = parse_flag::<u64>(&args, "--seed")? {
        config.seed = seed;
    }
    if let Some(rows) = parse_flag::<usize>(&args, "--rows")? {
        config.row_count = rows;
    }
    if let Some(output) = flag_value(&args, "--output") {
        config.output_path = output.to_string();
    }
    let summary_json = flag_value(&args, "--summary-json");

    let generator = DatasetGenerator::build(config).context("invalid generator configuration")?;
    log::info!("output: {}", generator.config().output_path);

    let dataset = generator.run();
    dataset
        .write_csv(&dataset.config.output_path)
        .with_context(|| format!("failed to write {}", dataset.config.output_path))?;

    let summary = dataset.summary();
    for line in summary.summary_lines() {
        println!("{line}");
    }

    if let Some(path) = summary_json {
        write_manifest(path, &summary)?;
    }

    Ok(())
}

fn write_manifest(path: &str, summary: &RunSummary) -> Result<()> {
    let manifest = RunManifest {
        generated_at: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        summary,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
    log::info!("run manifest written to {path}");
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// A present-but-unparseable flag is an error rather than a silent default.
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("invalid value for {flag}: {raw}"))
        })
        .transpose()
}
