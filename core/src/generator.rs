//! The dataset generator: the whole pipeline in one place.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   1. Configuration validated, RNG seeded
//!   2. Fraud plan drawn (rate + exact target count)
//!   3. Risky merchant set sampled
//!   4. Rows synthesized and scored
//!   5. Fraud rows selected and labels attached
//!
//! Serialization happens outside, on the finished Dataset.
//!
//! RULES:
//!   - One RNG per run, seeded once, threaded through every stage.
//!   - No I/O before the Dataset is complete.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    fraud_selection::{self, FraudPlan, LabeledRow},
    risk::RiskyMerchantSet,
    rng::DatasetRng,
    row_synthesis,
    serializer::{self, TransactionRecord},
};
use serde::Serialize;
use std::path::Path;

pub struct DatasetGenerator {
    config: GeneratorConfig,
    rng: DatasetRng,
}

impl DatasetGenerator {
    /// Validate the configuration and seed the run's RNG.
    pub fn build(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        let rng = DatasetRng::new(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run every stage and return the labeled rows in generation order.
    pub fn run(mut self) -> Dataset {
        let plan = FraudPlan::draw(&self.config, &mut self.rng);
        log::info!(
            "seed={} rows={} fraud plan: rate={:.5} target={}",
            self.config.seed,
            self.config.row_count,
            plan.fraud_rate,
            plan.target_fraud_count
        );

        let risky_merchants = RiskyMerchantSet::sample(&self.config, &mut self.rng);
        log::debug!(
            "{} of {} merchants flagged risky",
            risky_merchants.len(),
            self.config.merchant_pool_size
        );

        let scored = row_synthesis::synthesize_rows(&self.config, &risky_merchants, &mut self.rng);

        let selection = fraud_selection::select_fraud(&scored, &plan, &mut self.rng);
        let rows = fraud_selection::label_rows(scored, &selection);
        log::info!(
            "labeled {} fraud rows from a pool of {}",
            selection.selected.len(),
            selection.candidate_pool_size
        );

        Dataset {
            config: self.config,
            plan,
            risky_merchants,
            candidate_pool_size: selection.candidate_pool_size,
            rows,
        }
    }
}

/// A finished run. Rows are final; nothing downstream mutates them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub config: GeneratorConfig,
    pub plan: FraudPlan,
    pub risky_merchants: RiskyMerchantSet,
    pub candidate_pool_size: usize,
    pub rows: Vec<LabeledRow>,
}

impl Dataset {
    pub fn fraud_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_fraud).count()
    }

    pub fn to_records(&self) -> Vec<TransactionRecord> {
        self.rows.iter().map(TransactionRecord::from).collect()
    }

    /// Write the CSV artifact to `path`.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> GenResult<()> {
        serializer::write_csv_file(path, &self.to_records())
    }

    pub fn to_csv_string(&self) -> GenResult<String> {
        serializer::to_csv_string(&self.to_records())
    }

    pub fn summary(&self) -> RunSummary {
        let rows = self.rows.len();
        let fraud_rows = self.fraud_count();
        RunSummary {
            seed: self.config.seed,
            rows,
            output_path: self.config.output_path.clone(),
            fraud_rows,
            fraud_pct: fraud_rows as f64 / rows as f64 * 100.0,
            target_fraud_rate: self.plan.fraud_rate,
            target_fraud_rows: self.plan.target_fraud_count,
            candidate_pool_size: self.candidate_pool_size,
            risky_merchants: self.risky_merchants.len(),
        }
    }
}

/// End-of-run statistics for the console and the optional JSON manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub rows: usize,
    pub output_path: String,
    pub fraud_rows: usize,
    pub fraud_pct: f64,
    pub target_fraud_rate: f64,
    pub target_fraud_rows: usize,
    pub candidate_pool_size: usize,
    pub risky_merchants: usize,
}

impl RunSummary {
    /// The three human-readable status lines.
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("Wrote {} rows to {}", self.rows, self.output_path),
            format!("Fraud rows: {} ({:.3}%)", self.fraud_rows, self.fraud_pct),
            format!(
                "Target fraud rate was ~{:.3}% (exact fraud rows chosen: {})",
                self.target_fraud_rate * 100.0,
                self.target_fraud_rows
            ),
        ]
    }
}
