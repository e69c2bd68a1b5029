//! Row synthesis: one ScoredRow per transaction.
//!
//! Per-row draw order is fixed: country, hour, merchant, customer, amount.
//! Rows are immutable once built; fraud labels are attached later by
//! fraud_selection without touching these values.

use crate::{
    config::GeneratorConfig,
    risk::{self, RiskyMerchantSet},
    rng::DatasetRng,
    sampler::weighted_choice,
    types::{CustomerNum, Hour, MerchantNum},
};

pub const MIN_AMOUNT: f64 = 1.00;
pub const MAX_AMOUNT: f64 = 25_000.00;

const AMOUNT_MU: f64 = 3.5;
const AMOUNT_SIGMA: f64 = 1.0;
const OFF_HOURS_MU_SHIFT: f64 = 0.10;
const HIGH_RISK_MU_SHIFT: f64 = 0.15;

const PEAK_SHARE: f64 = 0.70;
const SHOULDER_SHARE_CUMULATIVE: f64 = 0.90;
const SHOULDER_HOURS: [Hour; 4] = [6, 7, 8, 23];

/// A synthesized transaction with its latent risk score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub amount: f64,
    pub country: String,
    pub currency: String,
    pub merchant: MerchantNum,
    pub customer: CustomerNum,
    pub hour: Hour,
    pub risk_score: f64,
}

impl ScoredRow {
    pub fn merchant_id(&self) -> String {
        merchant_id(self.merchant)
    }

    pub fn customer_id(&self) -> String {
        customer_id(self.customer)
    }
}

pub fn merchant_id(merchant: MerchantNum) -> String {
    format!("m_{merchant:04}")
}

pub fn customer_id(customer: CustomerNum) -> String {
    format!("c_{customer:05}")
}

/// Tri-modal hour of day.
/// 70% peak (9..=22), 20% shoulder {6, 7, 8, 23}, 10% off-hours (0..=5).
pub fn draw_hour(rng: &mut DatasetRng) -> Hour {
    let roll = rng.next_f64();
    if roll < PEAK_SHARE {
        rng.int_inclusive(9, 22) as Hour
    } else if roll < SHOULDER_SHARE_CUMULATIVE {
        *rng.choose(&SHOULDER_HOURS)
    } else {
        rng.int_inclusive(0, 5) as Hour
    }
}

/// Log-normal amount, clamped to [1.00, 25000.00] and rounded to cents.
/// Both risk shifts move mu before exponentiation.
pub fn draw_amount(rng: &mut DatasetRng, off_hours: bool, high_risk_country: bool) -> f64 {
    let mut mu = AMOUNT_MU;
    if off_hours {
        mu += OFF_HOURS_MU_SHIFT;
    }
    if high_risk_country {
        mu += HIGH_RISK_MU_SHIFT;
    }
    let raw = rng.normal(mu, AMOUNT_SIGMA).exp();
    round_cents(raw.clamp(MIN_AMOUNT, MAX_AMOUNT))
}

pub fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Draw one row.
pub fn synthesize_row(
    config: &GeneratorConfig,
    country_table: &[(&str, f64)],
    risky: &RiskyMerchantSet,
    rng: &mut DatasetRng,
) -> ScoredRow {
    let country = *weighted_choice(country_table, rng);
    let currency = config.currency_for(country).to_string();

    let hour = draw_hour(rng);
    let off_hours = risk::is_off_hours(hour);

    let merchant = rng.int_inclusive(1, config.merchant_pool_size);
    let customer = rng.int_inclusive(1, config.customer_pool_size);

    let high_risk_country = config.is_high_risk(country);
    let amount = draw_amount(rng, off_hours, high_risk_country);

    let risk_score = risk::risk_score(amount, high_risk_country, hour, risky.contains(merchant));

    ScoredRow {
        amount,
        country: country.to_string(),
        currency,
        merchant,
        customer,
        hour,
        risk_score,
    }
}

/// Stage 2: draw `config.row_count` rows in generation order.
pub fn synthesize_rows(
    config: &GeneratorConfig,
    risky: &RiskyMerchantSet,
    rng: &mut DatasetRng,
) -> Vec<ScoredRow> {
    let country_table = config.country_weights();
    let rows: Vec<ScoredRow> = (0..config.row_count)
        .map(|_| synthesize_row(config, &country_table, risky, rng))
        .collect();

    log::info!(
        "synthesized {} rows ({} off-hours, {} high-risk country)",
        rows.len(),
        rows.iter().filter(|r| risk::is_off_hours(r.hour)).count(),
        rows.iter().filter(|r| config.is_high_risk(&r.country)).count()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_zero_padded() {
        assert_eq!(merchant_id(42), "m_0042");
        assert_eq!(customer_id(391), "c_00391");
        assert_eq!(merchant_id(9_999), "m_9999");
    }

    #[test]
    fn round_cents_keeps_two_places() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(1.0), 1.0);
    }
}
