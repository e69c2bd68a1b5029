//! Configuration loading and validation.

use fraudgen_core::{
    config::{CountryWeight, GeneratorConfig},
    error::GenError,
    generator::DatasetGenerator,
};

fn shipped_config_path() -> String {
    format!("{}/../data/generator_config.json", env!("CARGO_MANIFEST_DIR"))
}

fn expect_invalid(config: GeneratorConfig) {
    match DatasetGenerator::build(config) {
        Err(GenError::InvalidConfig { .. }) => {}
        Err(other) => panic!("expected InvalidConfig, got {other:?}"),
        Ok(_) => panic!("expected InvalidConfig, got a generator"),
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let loaded = GeneratorConfig::load(&shipped_config_path()).expect("load shipped config");
    assert_eq!(loaded, GeneratorConfig::default());
}

#[test]
fn partial_json_keeps_defaults() {
    let config: GeneratorConfig =
        serde_json::from_str(r#"{ "seed": 7, "row_count": 500 }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.row_count, 500);
    assert_eq!(config.countries, GeneratorConfig::default().countries);
    assert_eq!(config.fallback_currency, "USD");
}

#[test]
fn missing_file_names_the_path() {
    let err = GeneratorConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn default_weights_sum_to_one() {
    let total: f64 = GeneratorConfig::default().countries.iter().map(|c| c.weight).sum();
    assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
}

#[test]
fn default_config_is_valid() {
    GeneratorConfig::default().validate().expect("defaults validate");
    GeneratorConfig::default_test().validate().expect("test defaults validate");
}

#[test]
fn rejects_zero_rows() {
    expect_invalid(GeneratorConfig {
        row_count: 0,
        ..GeneratorConfig::default_test()
    });
}

#[test]
fn rejects_inverted_rate_range() {
    expect_invalid(GeneratorConfig {
        fraud_rate_min: 0.3,
        fraud_rate_max: 0.1,
        ..GeneratorConfig::default_test()
    });
}

#[test]
fn rejects_rate_above_one() {
    expect_invalid(GeneratorConfig {
        fraud_rate_max: 1.5,
        ..GeneratorConfig::default_test()
    });
}

#[test]
fn rejects_empty_or_negative_country_table() {
    expect_invalid(GeneratorConfig {
        countries: Vec::new(),
        ..GeneratorConfig::default_test()
    });
    expect_invalid(GeneratorConfig {
        countries: vec![CountryWeight { code: "AU".into(), weight: -0.1 }],
        ..GeneratorConfig::default_test()
    });
    expect_invalid(GeneratorConfig {
        countries: vec![CountryWeight { code: "AU".into(), weight: f64::NAN }],
        ..GeneratorConfig::default_test()
    });
}

#[test]
fn rejects_pools_outside_id_width() {
    expect_invalid(GeneratorConfig {
        merchant_pool_size: 0,
        ..GeneratorConfig::default_test()
    });
    expect_invalid(GeneratorConfig {
        merchant_pool_size: 10_000,
        ..GeneratorConfig::default_test()
    });
    expect_invalid(GeneratorConfig {
        customer_pool_size: 100_000,
        ..GeneratorConfig::default_test()
    });
}

#[test]
fn rejects_risky_ratio_above_one() {
    expect_invalid(GeneratorConfig {
        risky_merchant_ratio: 1.01,
        ..GeneratorConfig::default_test()
    });
}
