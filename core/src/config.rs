use crate::error::{GenError, GenResult};
use crate::types::{CustomerNum, MerchantNum};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Merchant IDs are rendered as `m_` + 4 digits.
pub const MAX_MERCHANT_POOL: MerchantNum = 9_999;
/// Customer IDs are rendered as `c_` + 5 digits.
pub const MAX_CUSTOMER_POOL: CustomerNum = 99_999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryWeight {
    pub code: String,
    pub weight: f64,
}

impl CountryWeight {
    fn new(code: &str, weight: f64) -> Self {
        Self {
            code: code.into(),
            weight,
        }
    }
}

/// Every knob of a generation run. Missing JSON fields fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub row_count: usize,
    pub fraud_rate_min: f64,
    pub fraud_rate_max: f64,
    pub output_path: String,
    /// Order matters: the sampler walks this list front to back.
    pub countries: Vec<CountryWeight>,
    pub currency_by_country: BTreeMap<String, String>,
    pub fallback_currency: String,
    pub high_risk_countries: BTreeSet<String>,
    pub merchant_pool_size: MerchantNum,
    pub customer_pool_size: CustomerNum,
    pub risky_merchant_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let countries = vec![
            CountryWeight::new("AU", 0.35),
            CountryWeight::new("US", 0.25),
            CountryWeight::new("GB", 0.10),
            CountryWeight::new("NZ", 0.05),
            CountryWeight::new("CA", 0.05),
            CountryWeight::new("SG", 0.05),
            CountryWeight::new("IN", 0.07),
            CountryWeight::new("BR", 0.03),
            CountryWeight::new("NG", 0.02),
            CountryWeight::new("RU", 0.02),
            CountryWeight::new("ZA", 0.01),
        ];

        let currency_by_country = [
            ("AU", "AUD"),
            ("NZ", "NZD"),
            ("US", "USD"),
            ("CA", "CAD"),
            ("GB", "GBP"),
            ("SG", "SGD"),
            ("IN", "INR"),
            ("BR", "BRL"),
            ("NG", "NGN"),
            ("RU", "RUB"),
            ("ZA", "ZAR"),
        ]
        .into_iter()
        .map(|(c, cur)| (c.to_string(), cur.to_string()))
        .collect();

        Self {
            seed: 42,
            row_count: 10_000,
            fraud_rate_min: 0.001,
            fraud_rate_max: 0.003,
            output_path: "transactions_training.csv".into(),
            countries,
            currency_by_country,
            fallback_currency: "USD".into(),
            high_risk_countries: ["NG", "RU"].into_iter().map(String::from).collect(),
            merchant_pool_size: 800,
            customer_pool_size: 4_000,
            risky_merchant_ratio: 0.03,
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Fields absent from the file keep their defaults.
    /// In tests, use GeneratorConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config with a smaller row count for fast tests.
    /// The fraud-rate range is widened so every run labels a few dozen rows.
    pub fn default_test() -> Self {
        Self {
            seed: 1234,
            row_count: 2_000,
            fraud_rate_min: 0.01,
            fraud_rate_max: 0.02,
            output_path: "transactions_test.csv".into(),
            ..Self::default()
        }
    }

    /// Reject configurations the pipeline is not total over.
    pub fn validate(&self) -> GenResult<()> {
        if self.row_count == 0 {
            return Err(GenError::invalid_config("row_count must be at least 1"));
        }
        let rate_ok = |r: f64| r.is_finite() && (0.0..=1.0).contains(&r);
        if !rate_ok(self.fraud_rate_min) || !rate_ok(self.fraud_rate_max) {
            return Err(GenError::invalid_config(format!(
                "fraud rate bounds must lie in [0, 1], got [{}, {}]",
                self.fraud_rate_min, self.fraud_rate_max
            )));
        }
        if self.fraud_rate_min > self.fraud_rate_max {
            return Err(GenError::invalid_config(format!(
                "fraud_rate_min {} exceeds fraud_rate_max {}",
                self.fraud_rate_min, self.fraud_rate_max
            )));
        }
        if self.countries.is_empty() {
            return Err(GenError::invalid_config("country weight table is empty"));
        }
        if let Some(bad) = self
            .countries
            .iter()
            .find(|c| !c.weight.is_finite() || c.weight < 0.0)
        {
            return Err(GenError::invalid_config(format!(
                "country {} has invalid weight {}",
                bad.code, bad.weight
            )));
        }
        if self.merchant_pool_size == 0 || self.merchant_pool_size > MAX_MERCHANT_POOL {
            return Err(GenError::invalid_config(format!(
                "merchant_pool_size must be in 1..={MAX_MERCHANT_POOL}, got {}",
                self.merchant_pool_size
            )));
        }
        if self.customer_pool_size == 0 || self.customer_pool_size > MAX_CUSTOMER_POOL {
            return Err(GenError::invalid_config(format!(
                "customer_pool_size must be in 1..={MAX_CUSTOMER_POOL}, got {}",
                self.customer_pool_size
            )));
        }
        if !rate_ok(self.risky_merchant_ratio) {
            return Err(GenError::invalid_config(format!(
                "risky_merchant_ratio must lie in [0, 1], got {}",
                self.risky_merchant_ratio
            )));
        }
        Ok(())
    }

    /// Currency for a country code, or the fallback when unmapped.
    pub fn currency_for(&self, country: &str) -> &str {
        self.currency_by_country
            .get(country)
            .map(String::as_str)
            .unwrap_or(self.fallback_currency.as_str())
    }

    pub fn is_high_risk(&self, country: &str) -> bool {
        self.high_risk_countries.contains(country)
    }

    /// Country table as (code, weight) pairs for the categorical sampler.
    pub fn country_weights(&self) -> Vec<(&str, f64)> {
        self.countries
            .iter()
            .map(|c| (c.code.as_str(), c.weight))
            .collect()
    }

    /// Number of merchants flagged risky for the run (floor of ratio * pool).
    pub fn risky_merchant_count(&self) -> usize {
        (f64::from(self.merchant_pool_size) * self.risky_merchant_ratio) as usize
    }
}
