//! Latent risk scoring and the run-scoped risky merchant set.
//!
//! The risk score only ranks and weights rows for fraud assignment.
//! It never reaches the output file.

use crate::{
    config::GeneratorConfig,
    rng::DatasetRng,
    types::{Hour, MerchantNum},
};
use std::collections::BTreeSet;

const AMOUNT_WEIGHT: f64 = 0.6;
const HIGH_RISK_COUNTRY_BUMP: f64 = 2.0;
const OFF_HOURS_BUMP: f64 = 1.2;
const RISKY_MERCHANT_BUMP: f64 = 1.0;

/// Hours 0 through 5 count as off-hours for both amount shift and risk.
pub fn is_off_hours(hour: Hour) -> bool {
    hour <= 5
}

/// Pure function of the already-drawn attributes.
pub fn risk_score(amount: f64, high_risk_country: bool, hour: Hour, risky_merchant: bool) -> f64 {
    let mut score = amount.ln_1p() * AMOUNT_WEIGHT;
    if high_risk_country {
        score += HIGH_RISK_COUNTRY_BUMP;
    }
    if is_off_hours(hour) {
        score += OFF_HOURS_BUMP;
    }
    if risky_merchant {
        score += RISKY_MERCHANT_BUMP;
    }
    score
}

/// Merchants chosen once per run, before any row is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskyMerchantSet {
    merchants: BTreeSet<MerchantNum>,
}

impl RiskyMerchantSet {
    /// Sample `floor(pool * ratio)` distinct merchant numbers without replacement.
    pub fn sample(config: &GeneratorConfig, rng: &mut DatasetRng) -> Self {
        let count = config.risky_merchant_count();
        let merchants = rng
            .sample_distinct(1..=config.merchant_pool_size, count)
            .into_iter()
            .collect();
        Self { merchants }
    }

    pub fn contains(&self, merchant: MerchantNum) -> bool {
        self.merchants.contains(&merchant)
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MerchantNum> + '_ {
        self.merchants.iter().copied()
    }
}
